// crates/handler-gate-cli/src/main.rs
// ============================================================================
// Module: Handler Gate CLI Entry Point
// Description: Verifies every handler module under a root directory.
// Purpose: Discover, check, execute, report, and map the verdict to an exit code.
// Dependencies: clap, handler-gate-config, handler-gate-core, handler-gate-harness.
// ============================================================================

//! ## Overview
//! `handler-gate [ROOT]` discovers handler directories, checks each entry file
//! against the required-symbol contract, executes each handler under mock
//! substitution, prints the results, and writes the text and HTML artifacts.
//!
//! Exit codes: `0` when the overall status is pass, `1` when it is fail or
//! when no handlers were found (no report is produced), `2` for argument
//! errors. Artifact failures are reported on stderr and never change the exit
//! code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use handler_gate_cli::i18n::Locale;
use handler_gate_cli::i18n::SUPPORTED_LOCALES;
use handler_gate_cli::i18n::set_locale;
use handler_gate_cli::t;
use handler_gate_config::AuditMode;
use handler_gate_config::HandlerGateConfig;
use handler_gate_config::LoggingConfig;
use handler_gate_config::ReportConfig;
use handler_gate_core::AggregateReport;
use handler_gate_core::AuditEvent;
use handler_gate_core::AuditOutcome;
use handler_gate_core::AuditPhase;
use handler_gate_core::AuditSink;
use handler_gate_core::FileAuditSink;
use handler_gate_core::NoopAuditSink;
use handler_gate_core::StderrAuditSink;
use handler_gate_core::VerificationOutcome;
use handler_gate_core::VerificationRunner;
use handler_gate_core::discover_handlers;
use handler_gate_core::render_console;
use handler_gate_core::write_html_report;
use handler_gate_core::write_text_report;
use handler_gate_harness::PYTHON_ENV_VAR;
use handler_gate_harness::PythonHarness;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "HANDLER_GATE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "handler-gate", disable_version_flag = true)]
struct Cli {
    /// Directory whose subdirectories are handlers (defaults to `discovery.root`).
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,
    /// Fail the run when any handler is only partially conformant.
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
    /// Print the aggregate report as JSON instead of the table.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
    /// Config file (overrides `HANDLER_GATE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Skip writing the text and HTML artifacts.
    #[arg(long = "no-artifacts", action = ArgAction::SetTrue)]
    no_artifacts: bool,
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Preferred message language (overrides `HANDLER_GATE_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
}

/// Language selector accepted by `--lang`.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and runs one verification pass.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = HandlerGateConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    if let Some(source) = &config.source {
        write_stderr_line(&t!("config.loaded", path = source.display()))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    let audit = open_audit_sink(&config.logging)?;
    let outcome = verify(&cli, &config, audit.as_ref())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome.report)
            .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
        write_stdout_line(&json).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    } else {
        write_stdout_line(render_console(&outcome.report).trim_end())
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }

    if !cli.no_artifacts {
        write_artifacts(&config.report, &outcome, audit.as_ref());
    }

    Ok(exit_code(&outcome.report))
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Discovers and verifies every handler under the selected root.
fn verify(
    cli: &Cli,
    config: &HandlerGateConfig,
    audit: &dyn AuditSink,
) -> CliResult<VerificationOutcome> {
    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from(&config.discovery.root));
    let contract = config
        .required_contract()
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;

    let handlers = match discover_handlers(&root, &config.discovery.entry_file) {
        Ok(handlers) => handlers,
        Err(err) => {
            record(audit, AuditPhase::Discovery, AuditOutcome::Failed, err.to_string());
            return Err(CliError::new(t!("discovery.failed", error = err)));
        }
    };
    let found = t!("discovery.found", count = handlers.len(), root = root.display());
    record(audit, AuditPhase::Discovery, AuditOutcome::Ok, found);

    let env_interpreter = std::env::var(PYTHON_ENV_VAR).ok();
    let mut harness = PythonHarness::new(config.harness_settings(env_interpreter.as_deref()))
        .map_err(|err| CliError::new(t!("harness.init_failed", error = err)))?;
    let strict = cli.strict || config.report.strict;
    VerificationRunner::new(&contract, audit, strict)
        .run(&handlers, &mut harness)
        .map_err(|err| CliError::new(t!("run.aggregate_failed", error = err)))
}

/// Maps the overall verdict to a process exit code.
fn exit_code(report: &AggregateReport) -> ExitCode {
    if report.status.is_pass() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Artifacts
// ============================================================================

/// Writes the text report and HTML dashboard; failures are reported only.
fn write_artifacts(report_config: &ReportConfig, outcome: &VerificationOutcome, audit: &dyn AuditSink) {
    let text_path = Path::new(&report_config.text_path);
    match write_text_report(text_path, &outcome.report, &outcome.log) {
        Ok(()) => {
            let message = t!("report.text.written", path = text_path.display());
            let _ = write_stderr_line(&message);
            record(audit, AuditPhase::Render, AuditOutcome::Ok, message);
        }
        Err(err) => {
            let message = t!("report.text.failed", error = err);
            let _ = write_stderr_line(&message);
            record(audit, AuditPhase::Render, AuditOutcome::Failed, message);
        }
    }

    let html_output = Path::new(&report_config.html_output);
    match write_html_report(
        Path::new(&report_config.html_template),
        html_output,
        &report_config.placeholder,
        &outcome.report,
    ) {
        Ok(()) => {
            let message = t!("report.html.written", path = html_output.display());
            let _ = write_stderr_line(&message);
            record(audit, AuditPhase::Render, AuditOutcome::Ok, message);
        }
        Err(err) => {
            let message = t!("report.html.failed", error = err);
            let _ = write_stderr_line(&message);
            record(audit, AuditPhase::Render, AuditOutcome::Failed, message);
        }
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Opens the audit sink selected by config.
fn open_audit_sink(logging: &LoggingConfig) -> CliResult<Box<dyn AuditSink>> {
    match (logging.audit, logging.audit_path.as_deref()) {
        (AuditMode::Stderr, _) => Ok(Box::new(StderrAuditSink)),
        (AuditMode::File, Some(path)) => {
            let path = Path::new(path);
            let open_failed =
                |err: std::io::Error| CliError::new(t!("audit.open_failed", path = path.display(), error = err));
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).map_err(open_failed)?;
            }
            Ok(Box::new(FileAuditSink::new(path).map_err(open_failed)?))
        }
        (AuditMode::File, None) | (AuditMode::None, _) => Ok(Box::new(NoopAuditSink)),
    }
}

/// Records a run-level audit event.
fn record(audit: &dyn AuditSink, phase: AuditPhase, outcome: AuditOutcome, message: String) {
    audit.record(&AuditEvent::new(phase, outcome, None, Some(message)));
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the locale from `--lang`, then the environment, then English.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang.filter(|value| !value.trim().is_empty()) {
        return Locale::parse(value).ok_or_else(|| {
            let supported: Vec<&str> = SUPPORTED_LOCALES.iter().map(|locale| locale.as_str()).collect();
            CliError::new(t!(
                "i18n.lang.invalid_env",
                env = LANG_ENV,
                value = value,
                supported = supported.join(", ")
            ))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Writes `message` to stderr and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
