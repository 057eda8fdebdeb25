/*!
 * Shared document model for the output emitters.
 *
 * Rows are folded once into an ordered list of typed line records; each
 * output format then renders the same line sequence its own way. This keeps
 * "what the document contains" separate from "how a format serializes it"
 * and lets both emitters be tested against the same intermediate form.
 */

use crate::timecode::TimecodeEngine;
use crate::transcript::TranscriptRow;

/// A single renderable line of an output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLine {
    /// Timecode marker for one row.
    ///
    /// `raw` is the row's stored start time verbatim; `canonical` is the
    /// same time round-tripped through the timecode engine, so colon-frame
    /// forms like `00:00:03:08` come out as `00:00:03.08`.
    Timecode {
        /// Stored start time, as loaded or shifted
        raw: String,
        /// Round-tripped canonical form
        canonical: String,
    },

    /// Transcript body, speaker-prefixed when a speaker is present
    Body {
        /// Rendered body text
        text: String,
    },

    /// Blank separator between entries
    Spacer,
}

/// Ordered line sequence plus the rendering options shared by both formats
#[derive(Debug, Clone)]
pub struct DocumentModel {
    /// Document title, also used as the optional timecode prefix
    pub title: String,

    /// Whether timecode markers carry a `(title) ` prefix
    pub include_title_prefix: bool,

    /// Lines in document order
    pub lines: Vec<DocumentLine>,
}

impl DocumentModel {
    /// Fold transcript rows into the shared line sequence.
    ///
    /// Every row contributes a timecode line; a body line follows only when
    /// the transcript is non-empty; a spacer follows every row except the
    /// last.
    pub fn from_rows(
        rows: &[TranscriptRow],
        title: &str,
        include_title_prefix: bool,
        engine: &TimecodeEngine,
    ) -> Self {
        let mut lines = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let canonical =
                engine.seconds_to_plain_timecode(engine.parse_timecode(&row.start_time));
            lines.push(DocumentLine::Timecode {
                raw: row.start_time.clone(),
                canonical,
            });

            let transcript = row.transcript.trim();
            let speaker = row.speaker.trim();
            if !transcript.is_empty() {
                let text = if speaker.is_empty() {
                    transcript.to_string()
                } else {
                    format!("{speaker}: {transcript}")
                };
                lines.push(DocumentLine::Body { text });
            }

            if index + 1 < rows.len() {
                lines.push(DocumentLine::Spacer);
            }
        }

        DocumentModel {
            title: title.to_string(),
            include_title_prefix,
            lines,
        }
    }

    /// Render a timecode marker, applying the optional title prefix
    pub fn timecode_text(&self, timestamp: &str) -> String {
        if self.include_title_prefix {
            format!("({}) [{}]", self.title, timestamp)
        } else {
            format!("[{timestamp}]")
        }
    }
}
