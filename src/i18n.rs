//! User-facing texts, kept in `locales/<lang>/main.ftl`.

use std::collections::HashMap;

use fluent_templates::{
    fluent_bundle::{FluentArgs, FluentValue},
    static_loader, Loader,
};
use once_cell::sync::Lazy;
use unic_langid::{langid, LanguageIdentifier};

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "ru",
        // Telegram renders the Unicode isolation marks around placeables literally
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// Language every message is looked up in.
static DEFAULT_LANG: Lazy<LanguageIdentifier> = Lazy::new(|| langid!("ru"));

/// Returns the text for `key`, or the key itself when it is missing.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t(key: &str) -> String {
    let text = LOCALES.lookup(&DEFAULT_LANG, key).unwrap_or_else(|| {
        log::warn!("Missing translation for key '{}'", key);
        key.to_string()
    });
    text.replace("\\n", "\n")
}

/// Returns the text for `key` with arguments interpolated.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t_args(key: &str, args: &FluentArgs) -> String {
    let args_map: HashMap<String, FluentValue> = args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    let text = LOCALES
        .lookup_with_args(&DEFAULT_LANG, key, &args_map)
        .unwrap_or_else(|| {
            log::warn!("Missing translation for key '{}'", key);
            key.to_string()
        });
    text.replace("\\n", "\n")
}

/// Shorthand for the common case of a single `$name` argument.
pub fn t_name(key: &str, name: &str) -> String {
    let mut args = FluentArgs::new();
    args.set("name", name.to_string());
    t_args(key, &args)
}
