//! Plain-text summary report
//!
//! Each analysis gets its own uniquely named file, so concurrent runs never
//! write to the same path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::types::Analysis;

const RULE_WIDTH: usize = 80;

/// Header fields plus the raw summary text of one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub title_name: String,
    pub catalog_id: String,
    pub source_url: String,
    pub review_count: usize,
    pub summary_text: String,
}

impl From<&Analysis> for SummaryReport {
    fn from(analysis: &Analysis) -> Self {
        Self {
            title_name: analysis.title_name.clone(),
            catalog_id: analysis.catalog_id.clone(),
            source_url: analysis.source_url.clone(),
            review_count: analysis.review_count,
            summary_text: analysis.summary_text.clone(),
        }
    }
}

impl SummaryReport {
    /// Renders the fixed header block followed by the summary text
    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!(
            "MOVIE REVIEW SUMMARY\n\
             {rule}\n\
             Movie/Series: {}\n\
             IMDb ID: {}\n\
             Reviews URL: {}\n\
             Total Reviews Analyzed: {}\n\
             {rule}\n\n\
             {}",
            self.title_name, self.catalog_id, self.source_url, self.review_count, self.summary_text
        )
    }

    /// File name unique to this report
    pub fn file_name(&self) -> String {
        let id: String = self
            .catalog_id
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        format!("review_summary_{}_{}.txt", id, Uuid::new_v4().simple())
    }

    /// Writes the report into `dir` and returns the file path
    ///
    /// # Errors
    /// Returns `Io` if the directory cannot be created or written
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render())?;
        info!(path = %path.display(), "summary report written");
        Ok(path)
    }
}
