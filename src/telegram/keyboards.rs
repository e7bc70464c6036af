//! Inline keyboards attached to menu replies

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::core::types::{MenuLayout, CALLBACK_LOGIN, CALLBACK_START_REGISTRATION};
use crate::i18n;

/// Builds the Bot API markup for a layout, one button per row.
pub fn markup(layout: MenuLayout) -> InlineKeyboardMarkup {
    let register = vec![InlineKeyboardButton::callback(
        i18n::t("button-register"),
        CALLBACK_START_REGISTRATION,
    )];

    match layout {
        MenuLayout::RegisterOrLogin => InlineKeyboardMarkup::new(vec![
            register,
            vec![InlineKeyboardButton::callback(i18n::t("button-login"), CALLBACK_LOGIN)],
        ]),
        MenuLayout::RegisterOnly => InlineKeyboardMarkup::new(vec![register]),
    }
}
