use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

use super::filter::DebugOnlyFilter;
use super::filter::ErrorWarnFilter;
#[cfg(feature = "dev")]
use super::filter::InfoAndAboveFilter;
use super::format::KashifFormat;
use crate::config::LoggingConfig;
use crate::err_with_loc;
use crate::error::EngineError;

const DEFAULT_LOGS_DIR: &str = ".logs";

#[cfg(feature = "dev")]
const DEFAULT_TERMINAL_FILTER: &str = "kashif=debug,actix_web=info";
#[cfg(not(feature = "dev"))]
const DEFAULT_TERMINAL_FILTER: &str = "kashif=info,actix_web=info";

/// Keeps the non-blocking file writers flushing. Hold it for the life of the process.
pub struct TracingGuard {
    _guards: Vec<WorkerGuard>,
}

pub fn setup_tracing(
    engine_name: &str,
    config: &LoggingConfig,
) -> crate::Result<TracingGuard> {
    let base_logs_dir = Path::new(config.directory.as_deref().unwrap_or(DEFAULT_LOGS_DIR));

    let logs_dirs = [base_logs_dir.to_path_buf(), base_logs_dir.join("debug"), base_logs_dir.join("error")];

    for dir in &logs_dirs {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| {
                    err_with_loc!(EngineError::SetupTracingError(format!(
                        "failed_to_create_logs_directory::{}: {}",
                        dir.display(),
                        e
                    )))
                })?;
        }
    }

    let debug_appender =
        RollingFileAppender::new(Rotation::DAILY, base_logs_dir.join("debug"), format!("{}.log", engine_name));
    let error_appender =
        RollingFileAppender::new(Rotation::DAILY, base_logs_dir.join("error"), format!("{}.log", engine_name));

    let (non_blocking_debug, debug_guard) = tracing_appender::non_blocking(debug_appender);
    let (non_blocking_error, error_guard) = tracing_appender::non_blocking(error_appender);

    #[cfg_attr(not(feature = "dev"), allow(unused_mut))]
    let mut guards = vec![debug_guard, error_guard];

    let format = KashifFormat { engine_name: engine_name.to_string() };

    // RUST_LOG overrides the terminal verbosity; files always use the fixed filters
    let terminal_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_TERMINAL_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .event_format(format.clone())
                .with_filter(terminal_filter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .event_format(format.clone())
                .with_writer(non_blocking_debug)
                .with_filter(DebugOnlyFilter),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .event_format(format.clone())
                .with_writer(non_blocking_error)
                .with_filter(ErrorWarnFilter),
        );

    #[cfg(feature = "dev")]
    let subscriber = {
        let info_appender =
            RollingFileAppender::new(Rotation::DAILY, base_logs_dir, format!("{}.log", engine_name));
        let (non_blocking_info, info_guard) = tracing_appender::non_blocking(info_appender);
        guards.push(info_guard);

        subscriber.with(
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .event_format(format.clone())
                .with_writer(non_blocking_info)
                .with_filter(InfoAndAboveFilter),
        )
    };

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(_) => {
            tracing::info!("{}_logging_started::debug_logs::{}", engine_name, base_logs_dir.join("debug").display());
            tracing::info!("{}_logging_started::error_logs::{}", engine_name, base_logs_dir.join("error").display());
        },
        Err(e) => {
            // Already installed, e.g. by a second engine in the same process
            eprintln!("failed_to_set_global_subscriber: {}", e);
        },
    }

    Ok(TracingGuard { _guards: guards })
}
