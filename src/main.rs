// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::reflow::LayoutLimits;
use crate::rules::RuleSet;

mod app_config;
mod chunker;
mod errors;
mod file_utils;
mod reflow;
mod rules;
mod splitter;
mod subtitle_processor;
mod timecode;
mod tokenizer;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reflow subtitle files so every line fits the display limit (default command)
    #[command(alias = "reflow")]
    Fix(FixArgs),

    /// Report layout violations without writing anything
    Check(CheckArgs),

    /// Generate shell completions for cuefix
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct FixArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file path (single-file input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the input file instead of writing a sibling copy
    #[arg(short, long)]
    in_place: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input subtitle file or directory to check
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// cuefix - subtitle line reflow tool
///
/// Rewraps subtitle cues so every displayed line stays under the visible
/// character limit without breaking lines mid-phrase.
#[derive(Parser, Debug)]
#[command(name = "cuefix")]
#[command(version = "1.0.0")]
#[command(about = "Subtitle cue reflow tool")]
#[command(long_about = "cuefix reflows subtitle cue text so every displayed line obeys a hard
visible-character limit while staying linguistically natural.

EXAMPLES:
    cuefix movie.srt                     # Fix using default config
    cuefix -i movie.srt                  # Fix the file in place
    cuefix -o out.srt movie.srt          # Fix to an explicit output path
    cuefix /subtitles/                   # Fix every .srt file in a directory
    cuefix check movie.srt               # Report violations without writing
    cuefix --log-level debug movie.srt   # Verbose split diagnostics
    cuefix completions bash > cuefix.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file path (single-file input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the input file instead of writing a sibling copy
    #[arg(short, long)]
    in_place: bool,

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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    match options.command {
        Some(Commands::Completions { shell }) => {
            generate(
                shell,
                &mut CommandLineOptions::command(),
                "cuefix",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Some(Commands::Fix(args)) => run_fix(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            let input_path = options
                .input_path
                .ok_or_else(|| anyhow!("No input path provided. Run with --help for usage."))?;
            run_fix(FixArgs {
                input_path,
                output: options.output,
                in_place: options.in_place,
                config_path: options.config_path,
                log_level: options.log_level,
            })
        }
    }
}

/// Load config and initialize logging shared by all subcommands.
fn setup(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let config = Config::from_file(config_path)?;
    let level = log_level
        .map(app_config::LogLevel::from)
        .unwrap_or(config.log_level);
    let _ = CustomLogger::init(level.to_level_filter());
    config.validate()?;
    Ok(config)
}

fn run_fix(args: FixArgs) -> Result<()> {
    let config = setup(&args.config_path, args.log_level)?;
    let limits = config.layout_limits();
    let files = collect_input_files(&args.input_path)?;

    if files.len() > 1 && args.output.is_some() {
        return Err(anyhow!(
            "--output only makes sense for a single input file, got {}",
            files.len()
        ));
    }

    let progress = if files.len() > 1 {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid progress template")
                .progress_chars("=>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut failures = 0;
    for file in &files {
        if let Some(bar) = &progress {
            bar.set_message(
                file.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
        }
        match process_file(file, &limits, args.in_place, args.output.as_deref()) {
            Ok((before, after)) => {
                info!(
                    "Fixed {}: {} cues in, {} cues out",
                    file.display(),
                    before,
                    after
                );
            }
            Err(e) => {
                failures += 1;
                error!("Failed to process {}: {:#}", file.display(), e);
            }
        }
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }
    if let Some(bar) = &progress {
        bar.finish_with_message("done");
    }

    if failures > 0 {
        return Err(anyhow!("{} file(s) failed", failures));
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let config = setup(&args.config_path, args.log_level)?;
    let limits = config.layout_limits();
    let rules = RuleSet::english();
    let files = collect_input_files(&args.input_path)?;

    let mut violations = 0;
    for file in &files {
        let content = FileManager::read_to_string(file)?;
        let cues = subtitle_processor::parse(&content);
        let flagged: Vec<usize> = cues
            .iter()
            .filter(|cue| reflow::needs_reflow(cue, &rules, &limits))
            .map(|cue| cue.index)
            .collect();

        if flagged.is_empty() {
            info!("{}: {} cues, all compliant", file.display(), cues.len());
        } else {
            violations += flagged.len();
            warn!(
                "{}: {} of {} cues need reflow (indices {:?})",
                file.display(),
                flagged.len(),
                cues.len(),
                flagged
            );
        }
    }

    if violations > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Expand the input path into the list of subtitle files to process.
fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    if FileManager::dir_exists(input) {
        let mut files = FileManager::find_files(input, "srt")?;
        files.sort();
        if files.is_empty() {
            return Err(anyhow!("No .srt files found in {}", input.display()));
        }
        Ok(files)
    } else if FileManager::file_exists(input) {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(anyhow!("Input path does not exist: {}", input.display()))
    }
}

/// Fix one subtitle file and write the result to its target path.
fn process_file(
    path: &Path,
    limits: &LayoutLimits,
    in_place: bool,
    output: Option<&Path>,
) -> Result<(usize, usize)> {
    let content = FileManager::read_to_string(path)?;
    let cues = subtitle_processor::parse(&content);
    if cues.is_empty() {
        warn!("No subtitle cues found in {}", path.display());
    }

    let fixed = reflow::fix(&cues, &rules::ENGLISH, limits);
    let document = subtitle_processor::build(&fixed);

    let target: PathBuf = match (output, in_place) {
        (Some(out), _) => out.to_path_buf(),
        (None, true) => path.to_path_buf(),
        (None, false) => {
            let parent = path.parent().context("Input file has no parent directory")?;
            FileManager::generate_output_path(path, parent, "fixed", "srt")
        }
    };

    FileManager::write_to_file(&target, &document)?;
    Ok((cues.len(), fixed.len()))
}
