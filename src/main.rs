//! MusicVibe - interactive playback session on top of the simulated engine.

use std::{error::Error, path::PathBuf, process, sync::Arc};

use clap::{Parser, Subcommand};
use musicvibe::{
    cli::{
        CliService,
        formatting::{format_duration, format_error},
    },
    config::{Config, ConfigPaths},
    services::{
        engine::{EngineError, PlaybackEngine, SimulatedEngine},
        library::{IndexTrackRepository, TrackRepository},
        preferences::{FilePreferences, PreferenceStore},
        session::{SessionConfig, SessionController},
    },
    tracing_config,
};
use tokio::io::{self, BufReader};
use tracing::{Level, info, instrument, span};

#[derive(Parser)]
#[command(name = "musicvibe")]
#[command(about = "Track-list music player session")]
struct Cli {
    /// Configuration file (defaults to the XDG config location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive playback session
    Play {
        /// Library index overriding the configured one
        #[arg(short, long)]
        library: Option<PathBuf>,
        /// Preference file overriding the configured one
        #[arg(short, long)]
        prefs: Option<PathBuf>,
    },
    /// Inspect the track library
    Library {
        #[command(subcommand)]
        command: LibraryCommands,
    },
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum LibraryCommands {
    /// List every valid track in the library index
    List {
        /// Library index overriding the configured one
        #[arg(short, long)]
        library: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the JSON schema of the configuration file
    Schema,
    /// Print the effective configuration as TOML
    Show,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    ConfigPaths::ensure_config_dir()?;
    let config = Config::load_or_default(cli.config.as_deref());

    let result = match cli.command {
        Commands::Play { library, prefs } => {
            let _log_guard = tracing_config::init_with_file(config.general.log_level)?;
            let _span = span!(Level::INFO, "musicvibe_main").entered();
            info!("Starting MusicVibe");

            run_session(&config, library, prefs).await
        }
        Commands::Library {
            command: LibraryCommands::List { library },
        } => {
            tracing_config::init(config.general.log_level)?;
            list_library(&config, library).await.map_err(Into::into)
        }
        Commands::Config { command } => show_config(&config, command),
    };

    if let Err(e) = result {
        eprintln!("{}", format_error(&e.to_string()));
        process::exit(1);
    }

    Ok(())
}

/// Runs the interactive session until stdin closes or the user quits.
///
/// # Errors
/// Returns error if the library or preference paths cannot be resolved or
/// reading stdin fails.
async fn run_session(
    config: &Config,
    library: Option<PathBuf>,
    prefs: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let index = match library {
        Some(path) => path,
        None => config.library.index_path()?,
    };
    let prefs = match prefs {
        Some(path) => path,
        None => config.preferences.file_path()?,
    };

    let repository: Arc<dyn TrackRepository> = Arc::new(IndexTrackRepository::new(index));
    let preferences: Arc<dyn PreferenceStore> = Arc::new(FilePreferences::open(prefs));

    let engine = SimulatedEngine::new();
    let clock = engine.start_clock();
    let engine: Arc<dyn PlaybackEngine> = engine;

    let session = SessionController::start(
        async move { Ok::<_, EngineError>(engine) },
        repository,
        preferences,
        SessionConfig::from(&config.playback),
    );
    session.wait_ready().await;

    let cli = CliService::new();
    let outcome = cli
        .run_interactive(&session, BufReader::new(io::stdin()))
        .await;

    session.shutdown();
    clock.abort();

    outcome.map_err(Into::into)
}

/// Prints every valid track of the library index.
///
/// # Errors
/// Returns error if the index cannot be located, read or parsed.
#[instrument(skip(config))]
async fn list_library(config: &Config, library: Option<PathBuf>) -> musicvibe::Result<()> {
    let index = match library {
        Some(path) => path,
        None => config.library.index_path()?,
    };

    let tracks = IndexTrackRepository::new(index).scan().await?;

    for track in &tracks {
        println!(
            "{}\t{} - {}\t{}\t{}",
            track.id,
            track.title,
            track.artist,
            format_duration(track.duration_ms),
            track.size_label
        );
    }

    let total: u64 = tracks.iter().map(|track| track.duration_ms).sum();
    println!(
        "{} tracks, {} total",
        tracks.len(),
        format_duration(total)
    );

    Ok(())
}

fn show_config(config: &Config, command: ConfigCommands) -> Result<(), Box<dyn Error>> {
    let output = match command {
        ConfigCommands::Schema => serde_json::to_string_pretty(&schemars::schema_for!(Config))?,
        ConfigCommands::Show => toml::to_string_pretty(config)?,
    };

    println!("{output}");
    Ok(())
}

