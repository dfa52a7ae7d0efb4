//! User-facing texts.

pub const WELCOME_TEXT: &str = "👋 Добро пожаловать в Юрист GPT!

Я - ваш виртуальный юридический помощник. Задайте мне любой юридический вопрос, и я постараюсь помочь.

Примеры вопросов:
- Как составить договор аренды?
- Какие документы нужны для развода?
- Что делать при незаконном увольнении?

⚠️ Важно: мои ответы носят информационный характер и не заменяют консультацию живого юриста.";

pub const CHOOSE_CATEGORY_TEXT: &str = "Выберите категорию:";

pub const HELP_TEXT: &str = "📝 Как пользоваться ботом:

Просто напишите ваш юридический вопрос, и я постараюсь помочь.

Некоторые примеры вопросов:
- Как подать в суд на работодателя?
- Какие права у арендатора квартиры?
- Как оформить наследство?

⚠️ Ограничения:
- Я не могу представлять вас в суде
- Мои ответы носят справочный характер
- Для сложных случаев рекомендую обратиться к живому юристу

Используйте /start для повторного приветствия.";

pub const HISTORY_CLEARED_TEXT: &str = "История диалога очищена";

pub const NOTHING_TO_REGENERATE_TEXT: &str = "Нет запроса для повторной генерации. Задайте вопрос.";
