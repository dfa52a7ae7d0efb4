//! Persistence models for the `messages` table.

mod history_entry;
mod turn_record;

pub use history_entry::HistoryEntry;
pub use turn_record::{TurnRecord, TurnRole};
