use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use moodji_client::{EXAMPLE_WORDS, HttpPredictor, RequestController, Settings};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::platform;

pub mod predict;
pub mod tui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the prediction service
    #[arg(long, global = true, env = "MOODJI_API_ENDPOINT")]
    api_endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a single word and print its mood
    Predict {
        #[arg(value_name = "WORD")]
        word: String,

        /// Also copy the verdict to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Interactive mode (the default)
    Tui {
        /// Keep the UI visible after exit (default: erase)
        #[arg(long)]
        keep: bool,

        /// Append a JSON snapshot of the session to FILE after every change (dev tool)
        #[arg(long, value_name = "FILE")]
        debug_state: Option<String>,
    },

    /// List the example words
    Examples,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new().wrap_err("could not load settings")?;
    let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));
    init_tracing(cli.verbose, interactive, &settings)?;

    tracing::trace!(command = ?cli.command, "moodji command");

    let command = cli.command.unwrap_or(Commands::Tui {
        keep: false,
        debug_state: None,
    });

    // Priority: command line / environment, then the settings file
    let endpoint = cli
        .api_endpoint
        .unwrap_or_else(|| settings.api_endpoint.clone());

    match command {
        Commands::Predict { word, copy } => {
            let controller = controller(&endpoint, &settings)?;
            predict::run(controller, &word, copy).await
        }
        Commands::Tui { keep, debug_state } => {
            let controller = controller(&endpoint, &settings)?;
            tui::run(controller, keep, debug_state).await
        }
        Commands::Examples => {
            for word in EXAMPLE_WORDS {
                println!("{word}");
            }
            Ok(())
        }
    }
}

fn controller(endpoint: &str, settings: &Settings) -> Result<RequestController> {
    let predictor = HttpPredictor::new(endpoint)
        .wrap_err_with(|| format!("invalid api endpoint: {endpoint}"))?;
    tracing::debug!(url = %predictor.url(), "using prediction service");

    Ok(RequestController::new(
        Arc::new(predictor),
        platform::clipboard(),
        platform::haptics(settings.haptics),
        settings.flag_durations(),
    ))
}

/// Console logging only with `--verbose`; the interactive UI owns the terminal,
/// so it logs to a daily file instead. `MOODJI_LOG` overrides the configured
/// level for both.
fn init_tracing(verbose: bool, interactive: bool, settings: &Settings) -> Result<()> {
    let env_log_set = std::env::var("MOODJI_LOG").is_ok();

    let filter = || -> Result<EnvFilter> {
        if env_log_set {
            Ok(EnvFilter::from_env("MOODJI_LOG"))
        } else if verbose {
            Ok(EnvFilter::default()
                .add_directive("moodji=debug".parse()?)
                .add_directive("moodji_client=debug".parse()?))
        } else {
            Ok(EnvFilter::new(settings.logs.level.as_directive()))
        }
    };

    let console_layer = if verbose && !interactive {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false)
                .with_filter(filter()?),
        )
    } else {
        None
    };

    let file_layer = if interactive && settings.logs.enabled {
        let log_dir = PathBuf::from(&settings.logs.dir);
        fs::create_dir_all(&log_dir)
            .wrap_err_with(|| format!("could not create log dir {}", log_dir.display()))?;

        cleanup_old_logs(&log_dir, &settings.logs.file, settings.logs.retention);

        let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &settings.logs.file);
        Some(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(filter()?),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn cleanup_old_logs(log_dir: &Path, prefix: &str, retention_days: u64) {
    let cutoff = std::time::SystemTime::now()
        - std::time::Duration::from_secs(retention_days * 24 * 60 * 60);

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        // Rotated files look like "tui.log.2024-02-23"
        if !name.starts_with(prefix) || name == prefix {
            continue;
        }

        if let Ok(metadata) = entry.metadata()
            && let Ok(modified) = metadata.modified()
            && modified < cutoff
        {
            let _ = fs::remove_file(&path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_interactive() {
        let cli = Cli::try_parse_from(["moodji"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_predict() {
        let cli = Cli::try_parse_from([
            "moodji",
            "--api-endpoint",
            "http://10.0.0.2:5000",
            "predict",
            "sunshine",
            "--copy",
        ])
        .unwrap();

        assert_eq!(cli.api_endpoint.as_deref(), Some("http://10.0.0.2:5000"));
        match cli.command {
            Some(Commands::Predict { word, copy }) => {
                assert_eq!(word, "sunshine");
                assert!(copy);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
