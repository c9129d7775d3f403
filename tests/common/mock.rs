//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use nullability_annotations::domain::node::ParameterNode;
use nullability_annotations::domain::policy::{MatchingKind, ParameterMatcher};
use nullability_annotations::domain::ports::SourceReader;

/// Mock SourceReader that serves content from an in-memory map.
pub struct MockSourceReader {
    files: HashMap<PathBuf, String>,
}

impl MockSourceReader {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), content.into());
        self
    }
}

impl Default for MockSourceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceReader for MockSourceReader {
    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))
    }
}

/// Matcher that never pairs parameters and counts how often it was asked.
#[derive(Default)]
pub struct CountingNeverMatcher {
    pub calls: AtomicUsize,
}

impl CountingNeverMatcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ParameterMatcher for CountingNeverMatcher {
    fn find_match<'a>(
        &self,
        _parameter: &ParameterNode,
        _candidates: &'a [ParameterNode],
    ) -> Option<&'a ParameterNode> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn kind(&self) -> MatchingKind {
        MatchingKind::Positional
    }
}
