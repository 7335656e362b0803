// # coreoptd - Core Option Frontend Simulator
//
// A thin integration layer that plays the embedding application:
//
// 1. Reading configuration from environment variables
// 2. Attaching a host (options file or in-memory)
// 3. Declaring the sample option table and publishing it
// 4. Polling the host once per tick and logging changed values
//
// All option logic lives in coreopt-core.
//
// ## Configuration
//
// - `COREOPT_HOST_TYPE`: Host type (file, memory). Default: file
// - `COREOPT_OPTIONS_PATH`: Options file (for file host). Default: options.toml
// - `COREOPT_SCHEMA_PATH`: Where to write the published schema as JSON (optional)
// - `COREOPT_TICK_MS`: Poll interval in milliseconds. Default: 16
// - `COREOPT_MAX_TICKS`: Stop after this many ticks (optional)
// - `COREOPT_LOG_LEVEL`: trace, debug, info, warn, error. Default: info
//
// ## Example
//
// ```bash
// export COREOPT_OPTIONS_PATH=$HOME/.config/frontend/core-options.toml
// export COREOPT_SCHEMA_PATH=/tmp/core-options.schema.json
// export COREOPT_TICK_MS=100
//
// coreoptd
// ```

mod options;

use anyhow::Result;
use coreopt_core::{Host, HostConfig, MemoryHost, OptionRegistry, PollConfig, RuntimeConfig};
use options::SampleOptions;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum CoreoptExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<CoreoptExitCode> for ExitCode {
    fn from(code: CoreoptExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    runtime: RuntimeConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let host = match env::var("COREOPT_HOST_TYPE")
            .unwrap_or_else(|_| "file".to_string())
            .as_str()
        {
            "file" => HostConfig::File {
                path: env::var("COREOPT_OPTIONS_PATH")
                    .unwrap_or_else(|_| "options.toml".to_string()),
                schema_path: env::var("COREOPT_SCHEMA_PATH").ok(),
            },
            "memory" => HostConfig::default(),
            other => anyhow::bail!(
                "COREOPT_HOST_TYPE '{}' is not supported. \
                Supported types: file, memory",
                other
            ),
        };

        let poll = PollConfig {
            tick_interval_ms: parse_var("COREOPT_TICK_MS")?
                .unwrap_or(PollConfig::default().tick_interval_ms),
            max_ticks: parse_var("COREOPT_MAX_TICKS")?,
        };

        Ok(Self {
            runtime: RuntimeConfig { host, poll },
            log_level: env::var("COREOPT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.runtime.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "COREOPT_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

/// Parse an optional numeric environment variable
fn parse_var(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} must be a positive integer. Got '{}': {}", name, raw, e)),
        Err(_) => Ok(None),
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CoreoptExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return CoreoptExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CoreoptExitCode::ConfigError.into();
    }

    info!("Starting coreoptd");

    // Options are polled from one controlling thread
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CoreoptExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run(config.runtime).await {
            error!("Runtime error: {}", e);
            CoreoptExitCode::RuntimeError
        } else {
            CoreoptExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Build the host described by `config`
fn create_host(config: &HostConfig) -> Result<Arc<dyn Host>> {
    match config {
        HostConfig::Memory { values } => Ok(Arc::new(MemoryHost::from_values(values.clone()))),
        #[cfg(feature = "file")]
        HostConfig::File { .. } => Ok(Arc::new(coreopt_host_file::FileHost::from_config(config)?)),
        #[cfg(not(feature = "file"))]
        HostConfig::File { .. } => anyhow::bail!("File host support not compiled in"),
    }
}

/// Declare, publish, then poll until shutdown
async fn run(config: RuntimeConfig) -> Result<()> {
    let registry = Arc::new(OptionRegistry::new());

    // Declared before the host is attached, as a core loaded ahead of its
    // frontend would
    let mut options = SampleOptions::declare(&registry);
    info!("Declared {} option(s)", registry.len());

    info!("Host type: {}", config.host.type_name());
    registry.attach_host(create_host(&config.host)?);

    if !registry.publish() {
        anyhow::bail!("Host refused the option schema");
    }

    log_changes(&mut options);

    let mut ticker = tokio::time::interval(Duration::from_millis(config.poll.tick_interval_ms));
    let mut ticks: u64 = 0;
    let shutdown = wait_for_shutdown();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            signal = &mut shutdown => {
                info!("Received shutdown signal: {}", signal?);
                break;
            }
            _ = ticker.tick() => {
                if registry.check_for_updates() {
                    log_changes(&mut options);
                }

                ticks += 1;
                if config.poll.max_ticks.is_some_and(|max| ticks >= max) {
                    info!("Reached {} tick(s), stopping", ticks);
                    break;
                }
            }
        }
    }

    info!("Shutting down coreoptd");
    Ok(())
}

fn log_changes(options: &mut SampleOptions) {
    for (id, label) in options.refresh() {
        info!(option = %id, "Option now '{}'", label);
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
