use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dragscroll_core::{AppConfig, DragScrollConfig};

mod commands;

#[derive(Parser)]
#[command(name = "dragscroll")]
#[command(author, version, about = "Drag-to-scroll with inertia in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long = "config", global = true)]
    config_path: Option<PathBuf>,

    #[command(flatten)]
    overrides: DragOverrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive canvas
    Run,
    /// Print a headless coast trace
    Simulate(commands::simulate::SimulateArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration if none exists
    Init,
}

/// Command-line overrides for the `[drag]` section
#[derive(Args, Debug, Default)]
struct DragOverrides {
    /// Enable post-release coasting
    #[arg(long, global = true)]
    inertia: bool,
    /// Speed lost per second of coasting
    #[arg(long, global = true)]
    friction: Option<f64>,
    /// Multiplier applied to drag distance
    #[arg(long, global = true)]
    scroll_factor: Option<f64>,
    /// Freeze the horizontal axis
    #[arg(long, global = true)]
    lock_x: bool,
    /// Freeze the vertical axis
    #[arg(long, global = true)]
    lock_y: bool,
    /// Velocity adjustment for mouse drags
    #[arg(long, global = true)]
    mouse_speed: Option<f64>,
    /// Velocity adjustment for touch drags
    #[arg(long, global = true)]
    touch_speed: Option<f64>,
    /// Upper bound on sampled speed per axis
    #[arg(long, global = true)]
    max_speed: Option<f64>,
}

impl DragOverrides {
    fn apply(&self, drag: &mut DragScrollConfig) {
        drag.inertia |= self.inertia;
        drag.lock_x |= self.lock_x;
        drag.lock_y |= self.lock_y;
        if let Some(friction) = self.friction {
            drag.friction = friction;
        }
        if let Some(factor) = self.scroll_factor {
            drag.scroll_factor = factor;
        }
        if let Some(speed) = self.mouse_speed {
            drag.mouse_speed = speed;
        }
        if let Some(speed) = self.touch_speed {
            drag.touch_speed = speed;
        }
        if self.max_speed.is_some() {
            drag.max_speed = self.max_speed;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config_path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    cli.overrides.apply(&mut config.drag);
    config.drag.validate()?;

    let interactive = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Simulate(args)) => commands::simulate::run(&config, args).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(cli.config_path.as_deref()),
            ConfigAction::Init => commands::config::init(),
        },
    }
}

/// Log to stderr, or to a file while the terminal UI owns the screen
fn init_logging(config: &AppConfig, interactive: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if interactive {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
