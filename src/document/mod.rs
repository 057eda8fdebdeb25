/*!
 * Output document emitters.
 *
 * Both emitters render the same intermediate [`model::DocumentModel`] built
 * by folding the transcript rows once:
 * - `word`: paged Word document (.docx), available behind the `docx` feature
 * - `inqscribe`: flat InqScribe script (.inqscr)
 *
 * Emitters never mutate rows; they are pure functions from the row sequence,
 * a title and a prefix flag to a serialized file.
 */

pub mod inqscribe;
pub mod model;
#[cfg(feature = "docx")]
pub mod word;

pub use inqscribe::write_inqscribe_script;
#[cfg(feature = "docx")]
pub use word::write_word_document;

#[cfg(not(feature = "docx"))]
mod word_stub {
    use std::path::Path;

    use crate::app_config::Config;
    use crate::errors::ConversionError;
    use crate::transcript::TranscriptRow;

    /// Stand-in emitter for builds without the `docx` feature
    pub fn write_word_document<P: AsRef<Path>>(
        _rows: &[TranscriptRow],
        _output_path: P,
        _title: &str,
        _include_title_prefix: bool,
        _config: &Config,
    ) -> Result<(), ConversionError> {
        Err(ConversionError::DocxUnavailable)
    }
}

#[cfg(not(feature = "docx"))]
pub use word_stub::write_word_document;
