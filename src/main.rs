// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use app_controller::{Controller, ConversionRequest, OutputTarget};

use crate::app_config::Config;

mod app_config;
mod app_controller;
mod document;
mod errors;
mod file_utils;
mod timecode;
mod transcript;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a Limecraft CSV export (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for limescribe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input CSV file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Time added to every timecode, e.g. 01:30:45:12 or 01304512
    #[arg(short = 'a', long = "offset")]
    offset: Option<String>,

    /// Output base name without extension (defaults to the input file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// Write a Word document (.docx)
    #[arg(short, long)]
    word: bool,

    /// Write an InqScribe script (.inqscr)
    #[arg(short, long)]
    inqscribe: bool,

    /// Prefix every timecode with the output name in parentheses
    #[arg(short = 'p', long)]
    include_filename_prefix: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// limescribe - Limecraft transcription converter
///
/// Converts transcription CSV exports from Limecraft into Word documents
/// and InqScribe scripts, optionally adding a start-time offset to every
/// timecode.
#[derive(Parser, Debug)]
#[command(name = "limescribe")]
#[command(version = "1.0.0")]
#[command(about = "Limecraft transcription converter")]
#[command(long_about = "limescribe converts transcription CSV exports from Limecraft into Word
documents (.docx) and InqScribe scripts (.inqscr).

EXAMPLES:
    limescribe interview.csv                       # Convert to both formats
    limescribe -w interview.csv                    # Word document only
    limescribe -i interview.csv                    # InqScribe script only
    limescribe -a 01:08:18:13 interview.csv        # Add a start-time offset
    limescribe -a 01081813 interview.csv           # Same offset, digits only
    limescribe -n \"2025-06-07 interview\" data.csv  # Custom output name
    limescribe -p interview.csv                    # Prefix timecodes with the name
    limescribe /exports/                           # Convert a whole directory
    limescribe completions bash > limescribe.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

OFFSET FORMATS:
    The offset accepts HH:MM:SS:FF, HH:MM:SS.FF, HH.MM.SS.FF or a plain
    digit run like 01304512 - punctuation between digits is ignored.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input CSV file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Time added to every timecode, e.g. 01:30:45:12 or 01304512
    #[arg(short = 'a', long = "offset")]
    offset: Option<String>,

    /// Output base name without extension (defaults to the input file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// Write a Word document (.docx)
    #[arg(short, long)]
    word: bool,

    /// Write an InqScribe script (.inqscr)
    #[arg(short, long)]
    inqscribe: bool,

    /// Prefix every timecode with the output name in parentheses
    #[arg(short = 'p', long)]
    include_filename_prefix: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "limescribe", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let convert_args = ConvertArgs {
                input_path,
                output_dir: cli.output_dir,
                offset: cli.offset,
                name: cli.name,
                word: cli.word,
                inqscribe: cli.inqscribe,
                include_filename_prefix: cli.include_filename_prefix,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_convert(convert_args)
        }
    }
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(to_level_filter(&config.log_level));
    }

    // Both formats are emitted when the user selects neither explicitly
    let mut targets = Vec::new();
    if options.word {
        targets.push(OutputTarget::WordDocument);
    }
    if options.inqscribe {
        targets.push(OutputTarget::InqScribeScript);
    }
    if targets.is_empty() {
        info!("No output format selected, writing both Word and InqScribe");
        targets = vec![OutputTarget::WordDocument, OutputTarget::InqScribeScript];
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    let output_dir = options.output_dir.clone().unwrap_or_else(|| {
        options
            .input_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf()
    });

    let request = ConversionRequest {
        input_path: options.input_path.clone(),
        output_dir,
        base_name: options.name.clone(),
        offset: options.offset.clone(),
        targets,
        include_title_prefix: options.include_filename_prefix,
        force_overwrite: options.force_overwrite,
    };

    // Run the controller with the input file(s)
    if options.input_path.is_file() {
        controller.run(&request)?;
    } else if options.input_path.is_dir() {
        controller.run_folder(&request)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
