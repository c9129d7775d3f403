use crate::domain::diagnostic::{Diagnostic, RuleId};
use crate::domain::fix::{CodeFix, TextEdit};
use crate::domain::policy::MatchingKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Overrides the configured matching strategy.
    #[serde(default)]
    pub parameter_matching: Option<MatchingKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub parameter_matching: MatchingKind,
    /// Members whose analysis ran to completion.
    pub analyzed_members: usize,
    /// True when cancellation skipped at least one member.
    pub cancelled: bool,
    pub counts: BTreeMap<RuleId, usize>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixesResponse {
    pub diagnostic: Diagnostic,
    pub fixes: Vec<CodeFix>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixResponse {
    pub file_path: String,
    pub edits: Vec<TextEdit>,
    pub fixed_source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResponse {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<GraphNodeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNodeDto {
    pub id: u32,
    pub symbol: String,
    pub name: String,
    /// "type" or "member"
    pub node_type: String,
    pub assembly: String,
    pub edges: Vec<GraphEdgeDto>,
    /// Flattened interface set (types only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_interfaces: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdgeDto {
    pub target_symbol: String,
    pub kind: String,
}
