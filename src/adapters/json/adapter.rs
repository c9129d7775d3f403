use crate::domain::ports::SemanticDataSource;
use crate::domain::semantic::SemanticData;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Semantic data source reading a host-exported JSON document
pub struct JsonDataSourceAdapter {
    pub json_path: PathBuf,
}

impl JsonDataSourceAdapter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            json_path: path.as_ref().to_path_buf(),
        }
    }
}

impl SemanticDataSource for JsonDataSourceAdapter {
    fn load(&self) -> Result<SemanticData> {
        let json_content = std::fs::read_to_string(&self.json_path).with_context(|| {
            format!("Failed to read JSON file: {}", self.json_path.display())
        })?;
        parse_semantic_data(&json_content)
    }
}

pub fn parse_semantic_data(json_content: &str) -> Result<SemanticData> {
    serde_json::from_str(json_content).context("Failed to parse SemanticData JSON")
}
