// crates/handler-gate-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for future localization support.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The handler-gate CLI stores user-facing strings in a small translation
//! catalog to keep messaging consistent across commands and locales.
//! All runtime output should be routed through the [`t!`](crate::t) macro.
//!
//! Report content (tables, summaries, artifacts) is not translated; it is a
//! stable machine-comparable format.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_', '.']).next().unwrap_or("") {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "handler-gate {version}"),
    (
        "i18n.disclaimer.machine_translated",
        "Note: messages in this language are machine translated; report content stays in English.",
    ),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected one of: {supported}."),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to serialize report: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.loaded", "Using config {path}"),
    ("audit.open_failed", "Failed to open audit log {path}: {error}"),
    ("discovery.failed", "Handler discovery failed: {error}"),
    ("discovery.found", "Found {count} handlers under {root}"),
    ("harness.init_failed", "Failed to initialize execution harness: {error}"),
    ("run.aggregate_failed", "Failed to aggregate results: {error}"),
    ("report.text.written", "Text report written to {path}"),
    ("report.text.failed", "Failed to write text report: {error}"),
    ("report.html.written", "HTML dashboard written to {path}"),
    ("report.html.failed", "Failed to write HTML dashboard: {error}"),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "handler-gate {version}"),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: els missatges en aquest idioma són traduïts automàticament; el contingut de l'informe \
         es manté en anglès.",
    ),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava un de: {supported}."),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.json_failed", "No s'ha pogut serialitzar l'informe: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("config.loaded", "S'utilitza la configuració {path}"),
    ("audit.open_failed", "No s'ha pogut obrir el registre d'auditoria {path}: {error}"),
    ("discovery.failed", "Ha fallat la descoberta de gestors: {error}"),
    ("discovery.found", "S'han trobat {count} gestors a {root}"),
    ("harness.init_failed", "No s'ha pogut inicialitzar l'entorn d'execució: {error}"),
    ("run.aggregate_failed", "No s'han pogut agregar els resultats: {error}"),
    ("report.text.written", "Informe de text escrit a {path}"),
    ("report.text.failed", "No s'ha pogut escriure l'informe de text: {error}"),
    ("report.html.written", "Tauler HTML escrit a {path}"),
    ("report.html.failed", "No s'ha pogut escriure el tauler HTML: {error}"),
];

/// Returns the lookup map for `locale`.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

/// Returns every catalog key defined for `locale`.
#[must_use]
pub fn catalog_keys(locale: Locale) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = catalog_for(locale).keys().copied().collect();
    keys.sort_unstable();
    keys
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// ```
/// let message = handler_gate_cli::t!("main.version", version = "1.0.0");
/// assert_eq!(message, "handler-gate 1.0.0");
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
