//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Texts use Telegram's legacy Markdown: `*bold*`, `_emphasis_`.

pub const WELCOME: &str = concat!(
    "*Добро пожаловать!* 👋\n\n",
    "Я ваш чат-бот соцподдержки сотрудников РЖД. Выберите одну из опций ниже:\n\n",
    "Нажмите на кнопку 'Функции', чтобы узнать, как я могу помочь вам."
);

pub const FUNCTIONS: &str = concat!(
    "*Функции бота:*\n",
    "1. Информация о льготах\n",
    "2. Помощь в трудных ситуациях\n",
    "3. Связь с HR\n\n",
    "Выберите опцию, чтобы получить подробную информацию."
);

pub const CONTACTS: &str = concat!(
    "*Контакты для связи:*\n",
    "📧 Email: support@rzd.ru\n",
    "📞 Телефон: +7 (495) 123-45-67\n",
    "🕒 Время работы: Пн-Пт, 9:00-18:00"
);

// Menu
pub const FUNCTIONS_LABEL: &str = "Функции";
pub const FUNCTIONS_DATA: &str = "functions";
pub const CONTACTS_LABEL: &str = "Контакты";
pub const CONTACTS_DATA: &str = "contacts";

// Answers
pub const ANSWER_NOT_FOUND: &str = "Извините, я не смог найти ответ на ваш вопрос.";
pub const ANSWER_FAILED: &str = "Извините, произошла ошибка при обработке вашего вопроса.";

pub fn answer(text: &str) -> String {
    format!("*Ответ:* {}", escape_markdown(text))
}

/// Escapes the characters legacy Markdown treats as entity delimiters.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
