use crate::domain::ports::SourceReader;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// File system source reader; relative paths resolve against the project root.
pub struct FileSourceReader {
    project_root: PathBuf,
}

impl FileSourceReader {
    pub fn new<P: AsRef<Path>>(project_root: P) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }
}

impl SourceReader for FileSourceReader {
    fn read(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        std::fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read source file: {}", full_path.display()))
    }
}
