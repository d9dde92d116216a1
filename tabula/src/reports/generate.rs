//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Output directory from the manifest.
    pub output_dir: PathBuf,
    /// Warning messages from generation.
    pub warnings: Vec<String>,
    pub outcome: GenerationOutcome,
}

/// What happened to the generated files.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Files were written to disk.
    Written {
        /// Paths whose content changed.
        written: Vec<String>,
        /// Number of files already up to date.
        unchanged: usize,
    },
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        match &self.outcome {
            GenerationOutcome::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!("{} files would be generated", files.len()));
            }
            GenerationOutcome::Written { written, unchanged } => {
                out.key_value("Generated", &self.output_dir.display().to_string());
                for path in written {
                    out.added_item(path);
                }
                if *unchanged > 0 {
                    out.preformatted(&format!("{} files unchanged", unchanged));
                }
            }
        }
    }
}
