// crates/handler-gate-config/src/config.rs
// ============================================================================
// Module: Handler Gate Configuration
// Description: Configuration loading and validation for the handler gate.
// Purpose: Provide strict, fail-closed config parsing with built-in defaults.
// Dependencies: handler-gate-core, handler-gate-harness, serde, serde_json, toml
// ============================================================================

//! ## Overview
//! The config file is optional. Resolution order is the explicit path, then
//! [`CONFIG_ENV_VAR`], then [`DEFAULT_CONFIG_NAME`] in the working directory.
//! Only the default file may be absent; an explicitly named file that does not
//! exist is an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use handler_gate_core::DEFAULT_ENTRY_FILE;
use handler_gate_core::DEFAULT_REQUIRED_SYMBOLS;
use handler_gate_core::RequiredContract;
use handler_gate_harness::DEFAULT_ENTRY_ROUTINE;
use handler_gate_harness::DEFAULT_RESPONSE_FIELDS;
use handler_gate_harness::HarnessSettings;
use handler_gate_harness::Substitution;
use handler_gate_harness::SyntheticContext;
use handler_gate_harness::build_event;
use handler_gate_harness::default_event_payload;
use handler_gate_harness::resolve_interpreter;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits and Defaults
// ============================================================================

/// Default config file name.
pub const DEFAULT_CONFIG_NAME: &str = "handler-gate.toml";
/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "HANDLER_GATE_CONFIG";
/// Maximum config file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of required symbols.
pub(crate) const MAX_REQUIRED_SYMBOLS: usize = 256;
/// Maximum number of required response fields.
pub(crate) const MAX_RESPONSE_FIELDS: usize = 64;

/// Default handler root directory.
pub const DEFAULT_HANDLER_ROOT: &str = "lambdas";
/// Default text report path.
pub const DEFAULT_TEXT_REPORT_PATH: &str = "reports/handler-gate-results.txt";
/// Default HTML template path.
pub const DEFAULT_HTML_TEMPLATE: &str = "dashboard.template";
/// Default HTML output path.
pub const DEFAULT_HTML_OUTPUT: &str = "dashboard.html";
/// Default placeholder replaced in the HTML template.
pub const DEFAULT_HTML_PLACEHOLDER: &str = "<!-- TEST_RESULTS -->";

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Top-level handler gate configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerGateConfig {
    /// Handler discovery settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Required symbol contract.
    #[serde(default)]
    pub contract: ContractConfig,
    /// Mock execution settings.
    #[serde(default)]
    pub harness: HarnessConfig,
    /// Synthetic runtime context.
    #[serde(default)]
    pub context: ContextConfig,
    /// Report artifact settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Audit logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the config was read from, when one was.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl HandlerGateConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = env::var(CONFIG_ENV_VAR).ok();
        let resolved = resolve_path(path, env_path.as_deref())?;
        validate_path(&resolved.path)?;
        if !resolved.explicit && !resolved.path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved.path).map_err(|err| {
            ConfigError::Io(format!("{}: {err}", resolved.path.display()))
        })?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        config.source = Some(resolved.path);
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discovery.validate()?;
        self.contract.validate()?;
        self.harness.validate()?;
        self.context.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds the required contract.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the symbol list is unusable.
    pub fn required_contract(&self) -> Result<RequiredContract, ConfigError> {
        RequiredContract::new(self.contract.required_symbols.iter().cloned())
            .map_err(|err| ConfigError::Invalid(format!("contract.required_symbols: {err}")))
    }

    /// Builds harness settings; a non-empty `env_interpreter` overrides the
    /// configured interpreter.
    #[must_use]
    pub fn harness_settings(&self, env_interpreter: Option<&str>) -> HarnessSettings {
        let harness = &self.harness;
        HarnessSettings {
            interpreter: resolve_interpreter(env_interpreter, harness.interpreter.as_deref()),
            forward_handler_stderr: harness.forward_handler_stderr,
            entry_routine: harness.entry_routine.clone(),
            substitution: Substitution {
                client_attribute: harness.client_attribute.clone(),
                method: harness.method.clone(),
                payload: harness.canned_payload.clone(),
                content_type: harness.content_type.clone(),
                variant: harness.variant.clone(),
            },
            event: build_event(&harness.event_payload),
            context: self.context.to_synthetic(),
            response_fields: harness.response_fields.clone(),
        }
    }
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Where handlers live and what marks a handler directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Root scanned when no root argument is given.
    #[serde(default = "default_handler_root")]
    pub root: String,
    /// Entry file name inside each handler directory.
    #[serde(default = "default_entry_file")]
    pub entry_file: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            root: default_handler_root(),
            entry_file: default_entry_file(),
        }
    }
}

impl DiscoveryConfig {
    /// Validates discovery configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("discovery.root", &self.root)?;
        let entry = self.entry_file.as_str();
        if entry.trim().is_empty() {
            return Err(ConfigError::Invalid("discovery.entry_file must be non-empty".to_string()));
        }
        if entry != entry.trim() {
            return Err(ConfigError::Invalid("discovery.entry_file must be trimmed".to_string()));
        }
        if entry.contains(['/', '\\']) || entry == "." || entry == ".." {
            return Err(ConfigError::Invalid(
                "discovery.entry_file must be a single file name".to_string(),
            ));
        }
        if entry.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("discovery.entry_file too long".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Symbols every handler module must define.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    /// Required symbol names, in report order.
    #[serde(default = "default_required_symbols")]
    pub required_symbols: Vec<String>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            required_symbols: default_required_symbols(),
        }
    }
}

impl ContractConfig {
    /// Validates contract configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.required_symbols.is_empty() {
            return Err(ConfigError::Invalid(
                "contract.required_symbols must list at least one symbol".to_string(),
            ));
        }
        if self.required_symbols.len() > MAX_REQUIRED_SYMBOLS {
            return Err(ConfigError::Invalid("contract.required_symbols too many entries".to_string()));
        }
        let mut seen = BTreeSet::new();
        for symbol in &self.required_symbols {
            validate_identifier("contract.required_symbols", symbol)?;
            if !seen.insert(symbol.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate contract.required_symbols entry: {symbol}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Mock execution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Interpreter executable; `HANDLER_GATE_PYTHON` takes precedence.
    #[serde(default)]
    pub interpreter: Option<String>,
    /// Forward handler stderr to the host's stderr.
    #[serde(default)]
    pub forward_handler_stderr: bool,
    /// Entry routine invoked with `(event, context)`.
    #[serde(default = "default_entry_routine")]
    pub entry_routine: String,
    /// Module attribute holding the remote client.
    #[serde(default = "default_client_attribute")]
    pub client_attribute: String,
    /// Client method replaced by the stand-in.
    #[serde(default = "default_method")]
    pub method: String,
    /// Payload returned through the canned response body.
    #[serde(default = "default_canned_payload")]
    pub canned_payload: Value,
    /// `ContentType` of the canned response.
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// `InvokedProductionVariant` of the canned response.
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Payload serialized into the synthetic event body.
    #[serde(default = "default_event_payload")]
    pub event_payload: Value,
    /// Fields a well-shaped response must carry.
    #[serde(default = "default_response_fields")]
    pub response_fields: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            interpreter: None,
            forward_handler_stderr: false,
            entry_routine: default_entry_routine(),
            client_attribute: default_client_attribute(),
            method: default_method(),
            canned_payload: default_canned_payload(),
            content_type: default_content_type(),
            variant: default_variant(),
            event_payload: default_event_payload(),
            response_fields: default_response_fields(),
        }
    }
}

impl HarnessConfig {
    /// Validates harness configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(interpreter) = &self.interpreter {
            validate_path_string("harness.interpreter", interpreter)?;
        }
        validate_identifier("harness.entry_routine", &self.entry_routine)?;
        validate_identifier("harness.client_attribute", &self.client_attribute)?;
        validate_identifier("harness.method", &self.method)?;
        validate_non_empty("harness.content_type", &self.content_type)?;
        validate_non_empty("harness.variant", &self.variant)?;
        if self.response_fields.is_empty() {
            return Err(ConfigError::Invalid(
                "harness.response_fields must list at least one field".to_string(),
            ));
        }
        if self.response_fields.len() > MAX_RESPONSE_FIELDS {
            return Err(ConfigError::Invalid("harness.response_fields too many entries".to_string()));
        }
        let mut seen = BTreeSet::new();
        for field in &self.response_fields {
            validate_non_empty("harness.response_fields", field)?;
            if !seen.insert(field.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate harness.response_fields entry: {field}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Fields of the synthetic runtime context.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Function name.
    #[serde(default = "default_function_name")]
    pub function_name: String,
    /// Memory limit in megabytes.
    #[serde(default = "default_memory_limit_in_mb")]
    pub memory_limit_in_mb: u32,
    /// Fully qualified function identifier.
    #[serde(default = "default_invoked_function_arn")]
    pub invoked_function_arn: String,
    /// Request identifier.
    #[serde(default = "default_aws_request_id")]
    pub aws_request_id: String,
    /// Budget reported by `get_remaining_time_in_millis()`.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        let context = SyntheticContext::default();
        Self {
            function_name: context.function_name,
            memory_limit_in_mb: context.memory_limit_in_mb,
            invoked_function_arn: context.invoked_function_arn,
            aws_request_id: context.aws_request_id,
            timeout_ms: context.timeout_ms,
        }
    }
}

impl ContextConfig {
    /// Validates context configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_non_empty("context.function_name", &self.function_name)?;
        validate_non_empty("context.invoked_function_arn", &self.invoked_function_arn)?;
        validate_non_empty("context.aws_request_id", &self.aws_request_id)?;
        if self.memory_limit_in_mb == 0 {
            return Err(ConfigError::Invalid("context.memory_limit_in_mb must be > 0".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("context.timeout_ms must be > 0".to_string()));
        }
        Ok(())
    }

    /// Converts to the harness context type.
    fn to_synthetic(&self) -> SyntheticContext {
        SyntheticContext {
            function_name: self.function_name.clone(),
            memory_limit_in_mb: self.memory_limit_in_mb,
            invoked_function_arn: self.invoked_function_arn.clone(),
            aws_request_id: self.aws_request_id.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Report artifact settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Text report path, overwritten each run.
    #[serde(default = "default_text_path")]
    pub text_path: String,
    /// HTML template read for the dashboard.
    #[serde(default = "default_html_template")]
    pub html_template: String,
    /// Generated HTML dashboard path.
    #[serde(default = "default_html_output")]
    pub html_output: String,
    /// Token replaced by the results fragment.
    #[serde(default = "default_html_placeholder")]
    pub placeholder: String,
    /// Treat partial conformance as failure.
    #[serde(default)]
    pub strict: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            text_path: default_text_path(),
            html_template: default_html_template(),
            html_output: default_html_output(),
            placeholder: default_html_placeholder(),
            strict: false,
        }
    }
}

impl ReportConfig {
    /// Validates report configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("report.text_path", &self.text_path)?;
        validate_path_string("report.html_template", &self.html_template)?;
        validate_path_string("report.html_output", &self.html_output)?;
        validate_non_empty("report.placeholder", &self.placeholder)?;
        if self.html_template.trim() == self.html_output.trim() {
            return Err(ConfigError::Invalid(
                "report.html_output must differ from report.html_template".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Logging
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    /// Audit events are discarded.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit_path`.
    File,
}

/// Audit logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Where audit events go.
    #[serde(default)]
    pub audit: AuditMode,
    /// Audit file for [`AuditMode::File`].
    #[serde(default)]
    pub audit_path: Option<String>,
}

impl LoggingConfig {
    /// Validates logging configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.audit, &self.audit_path) {
            (AuditMode::File, None) => Err(ConfigError::Invalid(
                "logging.audit_path is required when logging.audit = \"file\"".to_string(),
            )),
            (_, Some(path)) => validate_path_string("logging.audit_path", path),
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading config.
    #[error("config io error: {0}")]
    Io(String),
    /// Parse error while reading config.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Validation error for config contents.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Path Resolution
// ============================================================================

/// Config path plus whether the caller named it.
struct ResolvedPath {
    /// Path to read.
    path: PathBuf,
    /// True for an explicit or environment-provided path.
    explicit: bool,
}

/// Resolves the config path from the explicit argument or the environment.
fn resolve_path(path: Option<&Path>, env_path: Option<&str>) -> Result<ResolvedPath, ConfigError> {
    if let Some(path) = path {
        return Ok(ResolvedPath {
            path: path.to_path_buf(),
            explicit: true,
        });
    }
    if let Some(env_path) = env_path.filter(|value| !value.trim().is_empty()) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ResolvedPath {
            path: PathBuf::from(env_path),
            explicit: true,
        });
    }
    Ok(ResolvedPath {
        path: PathBuf::from(DEFAULT_CONFIG_NAME),
        explicit: false,
    })
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Field Validation
// ============================================================================

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a free-form string is present.
fn validate_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    Ok(())
}

/// Validates an interpreter-level identifier (`[A-Za-z_][A-Za-z0-9_]*`).
fn validate_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    validate_non_empty(field, value)?;
    let mut chars = value.chars();
    let leading_ok = chars.next().is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
    if !leading_ok || !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err(ConfigError::Invalid(format!("{field} is not a valid identifier: {value}")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Default Values
// ============================================================================

/// Default handler root.
pub(crate) fn default_handler_root() -> String {
    DEFAULT_HANDLER_ROOT.to_string()
}

/// Default entry file name.
pub(crate) fn default_entry_file() -> String {
    DEFAULT_ENTRY_FILE.to_string()
}

/// Default required symbols.
pub(crate) fn default_required_symbols() -> Vec<String> {
    DEFAULT_REQUIRED_SYMBOLS.iter().map(|symbol| (*symbol).to_string()).collect()
}

/// Default entry routine.
pub(crate) fn default_entry_routine() -> String {
    DEFAULT_ENTRY_ROUTINE.to_string()
}

/// Default client attribute.
pub(crate) fn default_client_attribute() -> String {
    Substitution::default().client_attribute
}

/// Default intercepted method.
pub(crate) fn default_method() -> String {
    Substitution::default().method
}

/// Default canned payload.
pub(crate) fn default_canned_payload() -> Value {
    Substitution::default().payload
}

/// Default canned content type.
pub(crate) fn default_content_type() -> String {
    Substitution::default().content_type
}

/// Default canned production variant.
pub(crate) fn default_variant() -> String {
    Substitution::default().variant
}

/// Default response fields.
pub(crate) fn default_response_fields() -> Vec<String> {
    DEFAULT_RESPONSE_FIELDS.iter().map(|field| (*field).to_string()).collect()
}

/// Default function name.
pub(crate) fn default_function_name() -> String {
    SyntheticContext::default().function_name
}

/// Default memory limit.
pub(crate) fn default_memory_limit_in_mb() -> u32 {
    SyntheticContext::default().memory_limit_in_mb
}

/// Default function identifier.
pub(crate) fn default_invoked_function_arn() -> String {
    SyntheticContext::default().invoked_function_arn
}

/// Default request identifier.
pub(crate) fn default_aws_request_id() -> String {
    SyntheticContext::default().aws_request_id
}

/// Default remaining-time budget.
pub(crate) fn default_timeout_ms() -> u64 {
    SyntheticContext::default().timeout_ms
}

/// Default text report path.
pub(crate) fn default_text_path() -> String {
    DEFAULT_TEXT_REPORT_PATH.to_string()
}

/// Default HTML template path.
pub(crate) fn default_html_template() -> String {
    DEFAULT_HTML_TEMPLATE.to_string()
}

/// Default HTML output path.
pub(crate) fn default_html_output() -> String {
    DEFAULT_HTML_OUTPUT.to_string()
}

/// Default HTML placeholder.
pub(crate) fn default_html_placeholder() -> String {
    DEFAULT_HTML_PLACEHOLDER.to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions are permitted.")]

    use std::path::Path;

    use super::DEFAULT_CONFIG_NAME;
    use super::MAX_TOTAL_PATH_LENGTH;
    use super::resolve_path;
    use super::validate_identifier;

    #[test]
    fn explicit_path_wins_over_environment() {
        let resolved = resolve_path(Some(Path::new("a.toml")), Some("b.toml")).unwrap();
        assert_eq!(resolved.path, Path::new("a.toml"));
        assert!(resolved.explicit);
    }

    #[test]
    fn environment_path_is_explicit() {
        let resolved = resolve_path(None, Some("b.toml")).unwrap();
        assert_eq!(resolved.path, Path::new("b.toml"));
        assert!(resolved.explicit);
    }

    #[test]
    fn blank_environment_falls_back_to_default() {
        let resolved = resolve_path(None, Some("  ")).unwrap();
        assert_eq!(resolved.path, Path::new(DEFAULT_CONFIG_NAME));
        assert!(!resolved.explicit);
    }

    #[test]
    fn overlong_environment_path_is_rejected() {
        let long = "a".repeat(MAX_TOTAL_PATH_LENGTH + 1);
        assert!(resolve_path(None, Some(&long)).is_err());
    }

    #[test]
    fn identifiers_follow_python_rules() {
        assert!(validate_identifier("f", "lambda_handler").is_ok());
        assert!(validate_identifier("f", "_private2").is_ok());
        assert!(validate_identifier("f", "2fast").is_err());
        assert!(validate_identifier("f", "with-dash").is_err());
        assert!(validate_identifier("f", "").is_err());
    }
}
