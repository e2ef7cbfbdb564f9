//! Bridge configuration CLI.
//!
//! Inspect and edit which tracker roles each bridge exports, and how the
//! bridge places foot trackers.
//!
//! ```text
//! bridge-config --file vrconfig.toml show steamvr
//! bridge-config --file vrconfig.toml set steamvr left_foot on
//! bridge-config --file vrconfig.toml foot steamvr --enabled true --ratio 0.5
//! bridge-config --file vrconfig.toml watch
//! ```

use std::path::{Path, PathBuf};

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};

use bridge_config::config::loader::{load_config, render_config, save_config, ConfigFormat};
use bridge_config::config::validation::validate_config;
use bridge_config::config::watcher::ConfigWatcher;
use bridge_config::observability::init_logging;
use bridge_config::{ServerConfig, TrackerRole};

#[derive(Parser)]
#[command(name = "bridge-config")]
#[command(about = "Manage per-bridge tracker export settings", long_about = None)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, default_value = "vrconfig.toml")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the whole configuration, or a single bridge
    Show {
        bridge: Option<String>,
        /// Print JSON instead of the file's own format
        #[arg(long)]
        json: bool,
    },
    /// Print whether a bridge exports a role
    Get {
        bridge: String,
        role: TrackerRole,
        /// Answer used when the bridge has no override for the role
        #[arg(long)]
        default: bool,
    },
    /// Enable or disable a role for a bridge
    Set {
        bridge: String,
        role: TrackerRole,
        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        enabled: bool,
    },
    /// Change the foot tracker offset of a bridge
    Foot {
        bridge: String,
        #[arg(long, value_parser = BoolishValueParser::new())]
        enabled: Option<bool>,
        /// 0.0 = ankle, 0.5 = middle, 1.0 = toe
        #[arg(long, value_parser = parse_ratio, allow_negative_numbers = true)]
        ratio: Option<f32>,
    },
    /// Report validation warnings
    Check,
    /// Reload and summarize the file every time it changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("bridge_config=info");

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { bridge, json } => {
            let config = load_or_default(&cli.file)?;
            let format = if json {
                ConfigFormat::Json
            } else {
                ConfigFormat::from_path(&cli.file)
            };

            match bridge {
                Some(name) => {
                    let Some(bridge) = config.bridge(&name) else {
                        eprintln!("No bridge named '{}'", name);
                        return Ok(());
                    };
                    let mut single = ServerConfig::default();
                    single.bridges.insert(name, bridge.clone());
                    println!("{}", render_config(&single, format)?);
                }
                None => println!("{}", render_config(&config, format)?),
            }
        }
        Commands::Get {
            bridge,
            role,
            default,
        } => {
            let config = load_or_default(&cli.file)?;
            let enabled = config
                .bridge(&bridge)
                .map_or(default, |b| b.role_enabled(role, default));
            println!("{}", enabled);
        }
        Commands::Set {
            bridge,
            role,
            enabled,
        } => {
            let mut config = load_or_default(&cli.file)?;
            config.bridge_mut(&bridge).set_role_enabled(role, enabled);
            save_config(&cli.file, &config)?;

            tracing::info!(bridge = %bridge, role = %role, enabled, "Tracker role updated");
        }
        Commands::Foot {
            bridge,
            enabled,
            ratio,
        } => {
            let mut config = load_or_default(&cli.file)?;
            let entry = config.bridge_mut(&bridge);
            if let Some(enabled) = enabled {
                entry.foot_tracker_offset_enabled = enabled;
            }
            if let Some(ratio) = ratio {
                if !(0.0..=1.0).contains(&ratio) {
                    tracing::warn!(ratio, "Ratio outside [0, 1] is stored as given");
                }
                entry.foot_tracker_ankle_to_toe_ratio = ratio;
            }
            let (enabled, ratio) = (
                entry.foot_tracker_offset_enabled,
                entry.foot_tracker_ankle_to_toe_ratio,
            );
            save_config(&cli.file, &config)?;

            tracing::info!(bridge = %bridge, enabled, ratio, "Foot tracker offset updated");
        }
        Commands::Check => {
            let config = load_or_default(&cli.file)?;
            let warnings = validate_config(&config);
            if warnings.is_empty() {
                println!("OK");
            }
            for warning in warnings {
                println!("{}", warning);
            }
        }
        Commands::Watch => {
            let (watcher, mut updates) = ConfigWatcher::new(&cli.file);
            let _watcher = watcher.run()?;

            loop {
                tokio::select! {
                    Some(config) = updates.recv() => {
                        for (name, bridge) in &config.bridges {
                            let enabled = bridge.trackers().values().filter(|v| **v).count();
                            tracing::info!(
                                bridge = %name,
                                enabled_roles = enabled,
                                foot_offset = ?bridge.foot_offset(),
                                "Bridge config reloaded"
                            );
                        }
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
    }

    Ok(())
}

/// Any finite float. Values outside [0, 1] are accepted and warned about later;
/// NaN and infinity are refused because JSON files cannot hold them.
fn parse_ratio(s: &str) -> Result<f32, String> {
    let ratio: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if ratio.is_finite() {
        Ok(ratio)
    } else {
        Err(format!("ratio must be a finite number, got {}", s))
    }
}

/// A missing file means nothing has been configured yet.
fn load_or_default(path: &Path) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(load_config(path)?)
    } else {
        tracing::debug!(path = ?path, "Config file not found, starting from defaults");
        Ok(ServerConfig::default())
    }
}
