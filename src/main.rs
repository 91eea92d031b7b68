//! Dama - Main Binary
//!
//! Terminal front end for Turkish draughts against the automated opponent

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dama_rs::{
    config::GameConfig,
    core::Color,
    engine::TurkishBoard,
    game::{GameLogger, OutputFormat, TurnController, VerbosityLevel},
    presentation::{AudioKind, Presenter},
    session::Session,
};
use std::path::PathBuf;
use tokio::io::BufReader;

/// Side played by the automated opponent
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AutoSide {
    White,
    Black,
    /// Both sides are played from the keyboard
    None,
}

impl From<AutoSide> for Option<Color> {
    fn from(side: AutoSide) -> Self {
        match side {
            AutoSide::White => Some(Color::White),
            AutoSide::Black => Some(Color::Black),
            AutoSide::None => None,
        }
    }
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "dama")]
#[command(about = "Dama - Turkish draughts in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game from the keyboard
    Play {
        /// JSON config file; flags below override its fields
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Side played by the automated opponent
        #[arg(long, value_enum)]
        auto_side: Option<AutoSide>,

        /// Set random seed for deterministic autoplay
        #[arg(long)]
        seed: Option<u64>,

        /// Delay before the automated side picks its piece
        #[arg(long, value_name = "MS")]
        select_delay_ms: Option<u64>,

        /// Delay between the automated pick and its move
        #[arg(long, value_name = "MS")]
        move_delay_ms: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v')]
        verbosity: Option<VerbosityArg>,

        /// Render the board as JSON lines
        #[arg(long)]
        json: bool,

        /// How cues are played
        #[arg(long, value_enum)]
        audio: Option<AudioKind>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            auto_side,
            seed,
            select_delay_ms,
            move_delay_ms,
            verbosity,
            json,
            audio,
        } => {
            let mut game_config = match config {
                Some(path) => GameConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => GameConfig::default(),
            };
            if let Some(side) = auto_side {
                game_config.auto_side = side.into();
            }
            if seed.is_some() {
                game_config.seed = seed;
            }
            if let Some(ms) = select_delay_ms {
                game_config.select_delay_ms = ms;
            }
            if let Some(ms) = move_delay_ms {
                game_config.move_delay_ms = ms;
            }
            if let Some(level) = verbosity {
                game_config.verbosity = level.into();
            }
            if json {
                game_config.output_format = OutputFormat::Json;
            }
            if let Some(kind) = audio {
                game_config.audio = kind;
            }

            run_play(game_config).await?;
        }
    }

    Ok(())
}

async fn run_play(config: GameConfig) -> anyhow::Result<()> {
    let seed = config.resolved_seed();
    let engine = TurkishBoard::new(seed);
    let mut logger = GameLogger::with_verbosity(config.verbosity);
    logger.set_output_format(config.output_format);
    let controller = TurnController::new(engine, config.auto_side).with_logger(logger);
    controller
        .logger
        .verbose(&format!("seed {seed}, autoplay side {:?}", config.auto_side));

    let audio = config.audio.into_sink(config.verbosity, config.output_format);
    let presenter = Presenter::stdout(audio, config.output_format);
    let mut session = Session::new(controller, presenter, &config);
    if config.output_format == OutputFormat::Text {
        println!("Type ? for help.");
    }
    session
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .context("game session failed")?;

    Ok(())
}
