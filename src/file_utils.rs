use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Output extensions stripped from user-supplied base names
const OUTPUT_EXTENSIONS: [&str; 2] = [".docx", ".inqscr"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Strip output extensions a user may have typed into the base name.
    ///
    /// The same base is reused for every output format, so any `.docx` or
    /// `.inqscr` the user included is removed before the real extension is
    /// appended.
    pub fn sanitize_base_name(name: &str) -> String {
        let mut base = name.trim().to_string();
        for extension in OUTPUT_EXTENSIONS {
            base = base.replace(extension, "");
        }
        base.trim().to_string()
    }

    /// Base name derived from the input file when the user supplies none
    pub fn default_base_name<P: AsRef<Path>>(input_file: P) -> String {
        input_file
            .as_ref()
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    // @generates: Output path for a converted document
    // @params: output_dir, base_name, extension
    pub fn output_path<P: AsRef<Path>>(output_dir: P, base_name: &str, extension: &str) -> PathBuf {
        let mut output_filename = base_name.to_string();
        output_filename.push('.');
        output_filename.push_str(extension.trim_start_matches('.'));
        output_dir.as_ref().join(output_filename)
    }

    /// Find CSV exports in a directory tree
    pub fn find_csv_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case("csv") {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }
}
