use crate::domain::node::{MemberNode, TypeNode};
use crate::domain::semantic::SemanticData;
use anyhow::Result;
use petgraph::graph::NodeIndex;
use std::path::Path;

/// Semantic data source port (implemented by Infrastructure)
pub trait SemanticDataSource {
    fn load(&self) -> Result<SemanticData>;
}

/// Source code reader port
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<String>;
}

/// Symbol graph accessor port: read-only view of one compilation snapshot.
///
/// Every lookup is total: missing host data comes back as `None` or an empty slice and the
/// analysis exits early for that member instead of failing.
pub trait SymbolGraph: Sync {
    fn member(&self, idx: NodeIndex) -> Option<&MemberNode>;

    fn type_node(&self, idx: NodeIndex) -> Option<&TypeNode>;

    /// Directly overridden member, if any.
    fn overridden(&self, member: NodeIndex) -> Option<NodeIndex>;

    fn containing_type(&self, member: NodeIndex) -> Option<NodeIndex>;

    /// Transitive interface set of a type (flattened, no duplicates, order irrelevant).
    fn all_interfaces(&self, ty: NodeIndex) -> &[NodeIndex];

    /// All members of `ty` named `name` (overloads included).
    fn members_named(&self, ty: NodeIndex, name: &str) -> Vec<NodeIndex>;

    /// Host verdict that a compilation document is generated.
    fn is_generated_document(&self, path: &str) -> bool;
}
