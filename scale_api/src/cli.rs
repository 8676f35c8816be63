//! CLI argument definitions, shared statics, and tracing setup.

use clap::{ArgAction, Parser};
use eyre::WrapErr;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Keeps the non-blocking file appender's worker alive for the whole
/// process so buffered lines are flushed at exit.
pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "scale_api", version, about = "Serial weight scale acquisition service")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/scale_api.toml")]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides
    /// logging.level from the config
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Install the global subscriber.
///
/// Level precedence: `--log-level`, then `logging.level` from the config,
/// then "info". A `logging.file` gets its own JSON-lines layer.
pub fn init_tracing(cli: &Cli, logging: &scale_config::Logging) -> eyre::Result<()> {
    let level = cli
        .log_level
        .as_deref()
        .or(logging.level.as_deref())
        .unwrap_or("info");
    let filter =
        EnvFilter::try_new(level).wrap_err_with(|| format!("invalid log level {level:?}"))?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    let console = tracing_subscriber::fmt::layer();
    layers.push(if cli.json {
        console.json().boxed()
    } else {
        console.boxed()
    });
    if let Some(file) = logging.file.as_deref() {
        layers.push(file_layer(Path::new(file))?);
    }

    tracing_subscriber::registry().with(layers).with(filter).init();
    Ok(())
}

fn file_layer(path: &Path) -> eyre::Result<Box<dyn Layer<Registry> + Send + Sync>> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("logging.file has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("create log directory {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    let _ = FILE_GUARD.set(guard);
    Ok(tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .boxed())
}
