//! Analysis configuration loaded from an optional JSON file.

use crate::domain::diagnostic::Severity;
use crate::domain::policy::{MatchingKind, OriginParams, OriginPolicy};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How parameters are paired across hierarchy levels.
    pub parameter_matching: MatchingKind,
    /// Severity reported for every rule.
    pub severity: Severity,
    #[serde(flatten)]
    pub origin: OriginParams,
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn origin_policy(&self) -> Result<OriginPolicy> {
        OriginPolicy::new(&self.origin)
    }
}
