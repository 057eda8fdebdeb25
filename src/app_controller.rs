use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};

use crate::app_config::Config;
use crate::document;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::timecode::TimecodeEngine;
use crate::transcript::TranscriptCollection;

// @module: Application controller for transcript conversion

/// Output formats a conversion run can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// Paged Word document (.docx)
    WordDocument,
    /// Flat InqScribe script (.inqscr)
    InqScribeScript,
}

impl OutputTarget {
    // @returns: Output file extension without the dot
    pub fn extension(&self) -> &str {
        match self {
            Self::WordDocument => "docx",
            Self::InqScribeScript => "inqscr",
        }
    }

    // @returns: Human readable format name
    pub fn display_name(&self) -> &str {
        match self {
            Self::WordDocument => "Word",
            Self::InqScribeScript => "InqScribe",
        }
    }
}

/// Options for a single conversion run
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Source CSV export, or a directory of exports in folder mode
    pub input_path: PathBuf,

    /// Directory the output files are written to
    pub output_dir: PathBuf,

    /// Output base name; the input file stem when empty
    pub base_name: Option<String>,

    /// Offset added to every timecode, in any accepted textual form
    pub offset: Option<String>,

    /// Formats to emit, in order
    pub targets: Vec<OutputTarget>,

    /// Whether timecode markers carry a `(title) ` prefix
    pub include_title_prefix: bool,

    /// Overwrite existing output files
    pub force_overwrite: bool,
}

/// Files created and skipped by one conversion run
#[derive(Debug, Default)]
pub struct ConversionSummary {
    /// Output files written
    pub created: Vec<PathBuf>,

    /// Output files left untouched because they already existed
    pub skipped: Vec<PathBuf>,
}

/// Main application controller for transcript conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate().map_err(AppError::from)?;
        Ok(Self { config })
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a single transcription export.
    ///
    /// Runs the linear pipeline: load and normalize the table, insert the
    /// synthetic start row, apply the offset, then emit every selected
    /// target. An empty target list is a normal early return, not an error:
    /// the caller declined to pick outputs.
    pub fn run(&self, request: &ConversionRequest) -> Result<ConversionSummary, AppError> {
        let mut summary = ConversionSummary::default();

        if request.targets.is_empty() {
            info!("No output format selected, nothing to do");
            return Ok(summary);
        }

        let spinner = build_spinner();
        spinner.set_message(format!("Loading {}", request.input_path.display()));

        let mut collection = TranscriptCollection::load(&request.input_path, &self.config)?;
        debug!(
            "Loaded {} rows ({:?})",
            collection.rows.len(),
            collection.format
        );

        let engine = TimecodeEngine::new(&self.config);
        let offset_text = request.offset.as_deref().unwrap_or("");
        let will_shift = !offset_text.trim().is_empty();

        // The synthetic start row goes in before the shift so it lands on
        // the new start time rather than staying at zero
        engine.ensure_leading_zero(&mut collection.rows, will_shift);

        if will_shift {
            spinner.set_message("Adjusting timecodes");
        }
        engine.shift_all(&mut collection.rows, offset_text)?;

        let base_name = self.resolve_base_name(request);
        let title = base_name.clone();

        FileManager::ensure_dir(&request.output_dir).map_err(AppError::from)?;

        for target in &request.targets {
            let output_path =
                FileManager::output_path(&request.output_dir, &base_name, target.extension());

            if FileManager::file_exists(&output_path) && !request.force_overwrite {
                warn!(
                    "Output file already exists: {:?}. Use -f to force overwrite.",
                    output_path
                );
                summary.skipped.push(output_path);
                continue;
            }

            spinner.set_message(format!("Writing {} output", target.display_name()));
            match target {
                OutputTarget::WordDocument => {
                    document::write_word_document(
                        &collection.rows,
                        &output_path,
                        &title,
                        request.include_title_prefix,
                        &self.config,
                    )?;
                }
                OutputTarget::InqScribeScript => {
                    document::write_inqscribe_script(
                        &collection.rows,
                        &output_path,
                        &title,
                        request.include_title_prefix,
                        &self.config,
                    )?;
                }
            }

            info!("{}: {:?}", target.display_name(), output_path);
            summary.created.push(output_path);
        }

        spinner.finish_and_clear();
        info!("Conversion finished, {} file(s) created", summary.created.len());
        Ok(summary)
    }

    /// Convert every CSV export under a directory.
    ///
    /// Each file converts independently with outputs written next to it; a
    /// failing file is logged and skipped so one bad export does not abort
    /// the batch.
    pub fn run_folder(&self, request: &ConversionRequest) -> Result<ConversionSummary, AppError> {
        let files = FileManager::find_csv_files(&request.input_path).map_err(AppError::from)?;

        if files.is_empty() {
            warn!("No CSV files found in {:?}", request.input_path);
            return Ok(ConversionSummary::default());
        }

        info!("Converting {} CSV file(s)", files.len());
        let progress = ProgressBar::new(files.len() as u64);

        let mut summary = ConversionSummary::default();
        for file in files {
            let output_dir = file
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| request.output_dir.clone());

            let per_file = ConversionRequest {
                input_path: file.clone(),
                output_dir,
                // Folder mode always derives the base name per file
                base_name: None,
                ..request.clone()
            };

            match self.run(&per_file) {
                Ok(mut file_summary) => {
                    summary.created.append(&mut file_summary.created);
                    summary.skipped.append(&mut file_summary.skipped);
                }
                Err(e) => error!("Failed to convert {:?}: {}", file, e),
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        info!(
            "Batch finished, {} file(s) created, {} skipped",
            summary.created.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    fn resolve_base_name(&self, request: &ConversionRequest) -> String {
        let sanitized = request
            .base_name
            .as_deref()
            .map(FileManager::sanitize_base_name)
            .unwrap_or_default();

        if sanitized.is_empty() {
            FileManager::default_base_name(&request.input_path)
        } else {
            sanitized
        }
    }
}

fn build_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner
}
