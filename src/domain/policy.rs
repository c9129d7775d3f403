use crate::domain::node::{MemberNode, ParameterNode};
use crate::domain::ports::SymbolGraph;
use anyhow::{Context as _, Result};
use petgraph::graph::NodeIndex;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Parameter matching strategy across hierarchy levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingKind {
    /// Same position and same declared type (renames across levels are allowed).
    #[default]
    Positional,
    /// Same parameter name, any position.
    ByName,
}

/// Finds, on another hierarchy level, the parameter that stands for `parameter`.
pub trait ParameterMatcher: Send + Sync {
    fn find_match<'a>(
        &self,
        parameter: &ParameterNode,
        candidates: &'a [ParameterNode],
    ) -> Option<&'a ParameterNode>;

    fn kind(&self) -> MatchingKind;
}

/// Origin heuristics: which source files are generated and which assemblies are framework code.
/// Only [OriginParams] is configurable; matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginParams {
    /// File path suffixes marking designer/tool-generated sources.
    pub generated_suffixes: Vec<String>,
    /// Assembly name prefixes of platform libraries.
    pub framework_prefixes: Vec<String>,
    /// Substrings of runtime library assembly names.
    pub framework_markers: Vec<String>,
    /// Analyze generated sources too (troubleshooting only).
    pub include_generated: bool,
}

impl Default for OriginParams {
    fn default() -> Self {
        Self {
            generated_suffixes: [
                ".designer.cs",
                ".generated.cs",
                ".g.cs",
                ".g.i.cs",
                ".AssemblyAttributes.cs",
            ]
            .map(String::from)
            .to_vec(),
            framework_prefixes: ["System", "Microsoft"].map(String::from).to_vec(),
            framework_markers: ["mscorlib", "netstandard"].map(String::from).to_vec(),
            include_generated: false,
        }
    }
}

/// Compiled [OriginParams].
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    generated: Option<Regex>,
    framework: Option<Regex>,
    include_generated: bool,
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::new(&OriginParams::default()).expect("default origin patterns")
    }
}

impl OriginPolicy {
    pub fn new(params: &OriginParams) -> Result<Self> {
        let generated = alternation(&params.generated_suffixes)
            .map(|alt| Regex::new(&format!("(?i)(?:{alt})$")))
            .transpose()
            .context("Invalid generated file suffix pattern")?;

        let prefixes = alternation(&params.framework_prefixes).map(|alt| format!("^(?:{alt})"));
        let markers = alternation(&params.framework_markers).map(|alt| format!("(?:{alt})"));
        let framework = match (prefixes, markers) {
            (Some(p), Some(m)) => Some(format!("(?i){p}|{m}")),
            (Some(p), None) => Some(format!("(?i){p}")),
            (None, Some(m)) => Some(format!("(?i){m}")),
            (None, None) => None,
        }
        .map(|pattern| Regex::new(&pattern))
        .transpose()
        .context("Invalid framework assembly pattern")?;

        Ok(Self {
            generated,
            framework,
            include_generated: params.include_generated,
        })
    }

    pub fn is_generated_path(&self, path: &str) -> bool {
        self.generated.as_ref().is_some_and(|re| re.is_match(path))
    }

    pub fn is_framework_assembly(&self, assembly: &str) -> bool {
        self.framework.as_ref().is_some_and(|re| re.is_match(assembly))
    }

    /// Framework-origin node: its (containing) assembly is a platform library.
    pub fn is_framework_node(&self, graph: &dyn SymbolGraph, idx: NodeIndex) -> bool {
        if let Some(member) = graph.member(idx) {
            return self.is_framework_assembly(&member.core.assembly);
        }
        graph
            .type_node(idx)
            .is_some_and(|t| self.is_framework_assembly(&t.core.assembly))
    }

    /// A member is generated when any of its declaring files is generated, either by suffix or
    /// because the host flagged that document. Never true with `include_generated`.
    pub fn is_generated_member(&self, graph: &dyn SymbolGraph, member: &MemberNode) -> bool {
        if self.include_generated {
            return false;
        }
        member.core.locations.iter().any(|loc| {
            self.is_generated_path(&loc.file_path) || graph.is_generated_document(&loc.file_path)
        })
    }
}

fn alternation(items: &[String]) -> Option<String> {
    let escaped: Vec<String> = items
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| regex::escape(s))
        .collect();
    (!escaped.is_empty()).then(|| escaped.join("|"))
}
