use std::path::Path;

use log::debug;

use crate::app_config::Config;
use crate::errors::{AppError, FileProcessingError};
use crate::timecode::TimecodeEngine;
use crate::transcript::TranscriptRow;

use super::model::{DocumentLine, DocumentModel};

// @module: InqScribe script emitter

// @const: Literal escape sequence InqScribe places between entries
const ENTRY_SEPARATOR: &str = "\\r\\r";

/// Render the full InqScribe script payload.
///
/// The payload is a fixed key=value header block followed by a single
/// `text=` field holding the title and every entry. Timecode markers are
/// always the canonical form re-derived through the engine round-trip, never
/// the stored text, so the script is uniform regardless of how the source
/// spelled its timecodes.
pub fn render_inqscribe_script(model: &DocumentModel, config: &Config) -> String {
    let mut body = String::new();
    for line in &model.lines {
        match line {
            DocumentLine::Timecode { canonical, .. } => {
                body.push_str(ENTRY_SEPARATOR);
                body.push_str(&model.timecode_text(canonical));
            }
            DocumentLine::Body { text } => {
                body.push_str(": ");
                body.push_str(text);
            }
            // Spacers only matter for paged output
            DocumentLine::Spacer => {}
        }
    }

    format!(
        "app=InqScribe\n\
         font.name={font_name}\n\
         font.size={font_size}\n\
         print.bottom=1.\n\
         print.left=1.\n\
         print.right=1.\n\
         print.top=1.\n\
         print.units=1\n\
         state.aspectratio=0.\n\
         tc.format=[x]\n\
         tc.includesourcename=0\n\
         tc.omitframes=0\n\
         tc.unbracketed=0\n\
         text={title}{body}\n\
         timecode.fps={fps}\n\
         type=none\n\
         version=1.1\n\
         warned.fpsconflict=0",
        font_name = config.inqscribe.font_name,
        font_size = config.inqscribe.font_size,
        title = model.title,
        body = body,
        fps = config.frame_rate,
    )
}

/// Write transcript rows as an InqScribe script file
pub fn write_inqscribe_script<P: AsRef<Path>>(
    rows: &[TranscriptRow],
    output_path: P,
    title: &str,
    include_title_prefix: bool,
    config: &Config,
) -> Result<(), AppError> {
    let output_path = output_path.as_ref();
    let engine = TimecodeEngine::new(config);
    let model = DocumentModel::from_rows(rows, title, include_title_prefix, &engine);
    let payload = render_inqscribe_script(&model, config);

    std::fs::write(output_path, payload).map_err(|e| FileProcessingError::Write {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    debug!("Wrote InqScribe script: {}", output_path.display());
    Ok(())
}
