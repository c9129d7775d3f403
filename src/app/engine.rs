use crate::adapters::fs::reader::FileSourceReader;
use crate::adapters::json::adapter::JsonDataSourceAdapter;
use crate::adapters::matcher::matcher_for;
use crate::app::config::AnalysisConfig;
use crate::app::dto::*;
use crate::domain::annotation::AnnotationKind;
use crate::domain::builder::GraphBuilder;
use crate::domain::diagnostic::{Diagnostic, emit, sort_diagnostics};
use crate::domain::fix::{apply_edits, code_fix, code_fixes, fix_all_edits};
use crate::domain::graph::HierarchyGraph;
use crate::domain::node::Node;
use crate::domain::policy::OriginPolicy;
use crate::domain::ports::{SemanticDataSource, SourceReader};
use crate::domain::solver::AnnotationSolver;
use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Application service: owns one immutable compilation snapshot and answers analysis and fix
/// requests against it.
#[derive(Clone)]
pub struct AnalysisEngine {
    inner: Arc<EngineData>,
}

struct EngineData {
    semantic_path: PathBuf,
    project_root: PathBuf,
    graph: HierarchyGraph,
    config: AnalysisConfig,
    origin: OriginPolicy,
    source_reader: Arc<dyn SourceReader>,
}

impl AnalysisEngine {
    /// Construct an engine from an already-built graph.
    ///
    /// Used for testing or when the semantic data comes from a source other than a JSON file.
    pub fn from_prebuilt(
        semantic_path: PathBuf,
        project_root: PathBuf,
        graph: HierarchyGraph,
        config: AnalysisConfig,
        source_reader: Arc<dyn SourceReader>,
    ) -> Result<Self> {
        let origin = config
            .origin_policy()
            .context("Invalid origin configuration")?;
        Ok(Self {
            inner: Arc::new(EngineData {
                semantic_path,
                project_root,
                graph,
                config,
                origin,
                source_reader,
            }),
        })
    }

    /// Load semantic data from JSON. An empty `project_root` resolves to the JSON file's
    /// directory.
    pub fn load_from_json(json_path: &Path, config: AnalysisConfig) -> Result<Self> {
        let semantic_data = JsonDataSourceAdapter::new(json_path).load()?;

        let project_root = if semantic_data.project_root.is_empty() {
            json_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        } else {
            PathBuf::from(&semantic_data.project_root)
        };
        let source_reader: Arc<dyn SourceReader> =
            Arc::new(FileSourceReader::new(&project_root));

        let graph = GraphBuilder::new().build(&semantic_data);
        info!(
            types = semantic_data.types.len(),
            members = semantic_data.members.len(),
            path = %json_path.display(),
            "semantic data loaded"
        );

        Self::from_prebuilt(
            json_path.to_path_buf(),
            project_root,
            graph,
            config,
            source_reader,
        )
    }

    pub fn semantic_path(&self) -> &Path {
        &self.inner.semantic_path
    }

    pub fn project_root(&self) -> &Path {
        &self.inner.project_root
    }

    /// Analyze every member of the snapshot. Members run in parallel; `cancel` is honored
    /// between members.
    pub fn analyze(&self, req: AnalyzeRequest, cancel: &CancellationToken) -> AnalyzeResponse {
        let data = self.inner.as_ref();
        let matching = req
            .parameter_matching
            .unwrap_or(data.config.parameter_matching);
        let matcher = matcher_for(matching);
        let solver = AnnotationSolver::new(&data.graph, &data.origin, matcher.as_ref());

        let members: Vec<_> = data.graph.member_indices().collect();
        let outcomes: Vec<Option<Vec<Diagnostic>>> = members
            .par_iter()
            .map(|&idx| {
                if cancel.is_cancelled() {
                    return None;
                }
                let diagnostics = solver
                    .analyze_member(idx)
                    .iter()
                    .filter_map(|o| emit(&data.graph, o))
                    .map(|mut d| {
                        d.severity = data.config.severity;
                        d
                    })
                    .collect();
                Some(diagnostics)
            })
            .collect();

        let analyzed_members = outcomes.iter().filter(|o| o.is_some()).count();
        let cancelled = analyzed_members < members.len();
        let mut diagnostics: Vec<Diagnostic> = outcomes.into_iter().flatten().flatten().collect();
        sort_diagnostics(&mut diagnostics);

        let mut counts = BTreeMap::new();
        for d in &diagnostics {
            *counts.entry(d.rule).or_insert(0) += 1;
        }

        info!(
            members = analyzed_members,
            diagnostics = diagnostics.len(),
            ?matching,
            cancelled,
            "analysis finished"
        );

        AnalyzeResponse {
            parameter_matching: matching,
            analyzed_members,
            cancelled,
            counts,
            diagnostics,
        }
    }

    pub fn find_diagnostic(&self, id: &str) -> Result<Diagnostic> {
        self.analyze(AnalyzeRequest::default(), &CancellationToken::new())
            .diagnostics
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| anyhow!("Diagnostic not found: {}", id))
    }

    /// The two code actions offered for a diagnostic.
    pub fn fixes(&self, id: &str) -> Result<FixesResponse> {
        let diagnostic = self.find_diagnostic(id)?;
        let source = self.read_source(&diagnostic.location.file_path)?;
        let fixes = code_fixes(&diagnostic, &source)?;
        Ok(FixesResponse { diagnostic, fixes })
    }

    /// Apply one code action and return the rewritten file.
    pub fn apply_fix(&self, id: &str, annotation: AnnotationKind) -> Result<FixResponse> {
        let diagnostic = self.find_diagnostic(id)?;
        let file_path = diagnostic.location.file_path.clone();
        let source = self.read_source(&file_path)?;
        let edits = vec![code_fix(&diagnostic, annotation, &source)?.edit];
        let fixed_source = apply_edits(&source, &edits)
            .with_context(|| format!("Failed to apply fix {}", id))?;
        Ok(FixResponse {
            file_path,
            edits,
            fixed_source,
        })
    }

    /// Annotate every diagnostic of one file in a single pass.
    pub fn fix_all(&self, file_path: &str, annotation: AnnotationKind) -> Result<FixResponse> {
        let response = self.analyze(AnalyzeRequest::default(), &CancellationToken::new());
        let in_file: Vec<&Diagnostic> = response
            .diagnostics
            .iter()
            .filter(|d| d.location.file_path == file_path)
            .collect();
        let source = self.read_source(file_path)?;
        let edits = fix_all_edits(in_file.iter().copied(), annotation, &source)?;
        let fixed_source = apply_edits(&source, &edits)
            .with_context(|| format!("Failed to fix {}", file_path))?;
        info!(file = %file_path, edits = edits.len(), "fix-all applied");
        Ok(FixResponse {
            file_path: file_path.to_string(),
            edits,
            fixed_source,
        })
    }

    /// Write a fix result back under the project root.
    pub fn write_fix(&self, fix: &FixResponse) -> Result<PathBuf> {
        let full_path = self.inner.project_root.join(&fix.file_path);
        std::fs::write(&full_path, &fix.fixed_source)
            .with_context(|| format!("Failed to write source file: {}", full_path.display()))?;
        Ok(full_path)
    }

    pub fn graph_summary(&self) -> GraphResponse {
        let graph = &self.inner.graph;
        let nodes = graph
            .graph
            .node_indices()
            .map(|idx| {
                let node = graph.node(idx);
                let core = node.core();
                let (node_type, all_interfaces): (&str, Vec<String>) = match node {
                    Node::Type(t) => (
                        "type",
                        t.all_interfaces
                            .iter()
                            .map(|&i| graph.symbol(i).to_string())
                            .collect(),
                    ),
                    Node::Member(_) => ("member", Vec::new()),
                };
                let edges = graph
                    .neighbors(idx)
                    .map(|(target, kind)| GraphEdgeDto {
                        target_symbol: graph.symbol(target).to_string(),
                        kind: format!("{:?}", kind),
                    })
                    .collect();
                GraphNodeDto {
                    id: core.id,
                    symbol: core.symbol.clone(),
                    name: core.name.clone(),
                    node_type: node_type.to_string(),
                    assembly: core.assembly.clone(),
                    edges,
                    all_interfaces,
                }
            })
            .collect();

        GraphResponse {
            node_count: graph.graph.node_count(),
            edge_count: graph.graph.edge_count(),
            nodes,
        }
    }

    fn read_source(&self, file_path: &str) -> Result<String> {
        self.inner.source_reader.read(Path::new(file_path))
    }
}
