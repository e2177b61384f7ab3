//! # Help Text
//!
//! Command list displayed to the user via the `/help` command.

pub const MAIN: &str = concat!(
    "Доступные команды:\n",
    "/start - Начать общение с ботом\n",
    "/help - Показать этот список команд\n",
    "Отправьте любое сообщение, чтобы задать вопрос по содержимому PDF."
);
