use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::outcome::TagRow;

pub const TAGS_FILE: &str = "tags.csv";
const TAGS_HEADER: [&str; 3] = ["link", "tag", "tag_type"];

/// Writes the per-URL diagrams and the run's tag table into one directory.
pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self> {
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;
        Ok(Self { out_dir })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `index` is the 1-based position of the URL in the input.
    pub fn diagram_path(&self, index: usize) -> PathBuf {
        self.out_dir.join(format!("mermaid_{}.md", index))
    }

    pub fn write_diagram(&self, index: usize, diagram: &str) -> Result<PathBuf> {
        let path = self.diagram_path(index);
        std::fs::write(&path, diagram)
            .with_context(|| format!("Failed to write diagram: {:?}", path))?;
        Ok(path)
    }

    pub fn write_tags(&self, rows: &[TagRow]) -> Result<PathBuf> {
        let path = self.out_dir.join(TAGS_FILE);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create {:?}", path))?;

        if rows.is_empty() {
            writer.write_record(TAGS_HEADER)?;
        }
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().context("Failed to flush tag table")?;

        Ok(path)
    }
}
