use crate::domain::edge::EdgeKind;
use crate::domain::node::{MemberNode, Node, TypeNode};
use crate::domain::ports::SymbolGraph;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Symbol identifier (host symbol string)
pub type SymbolId = String;

/// Hierarchy Graph - types, members and the relations the annotation walk follows
pub struct HierarchyGraph {
    /// The directed graph of nodes and edges
    pub graph: DiGraph<Node, EdgeKind>,

    /// Mapping from symbol to node index
    pub symbol_to_node: HashMap<SymbolId, NodeIndex>,

    /// Documents the host itself flagged as generated
    pub generated_documents: HashSet<String>,
}

impl Default for HierarchyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            symbol_to_node: HashMap::new(),
            generated_documents: HashSet::new(),
        }
    }

    pub fn add_node(&mut self, symbol: SymbolId, node: Node) -> NodeIndex {
        let idx = self.graph.add_node(node);
        self.symbol_to_node.insert(symbol, idx);
        idx
    }

    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, kind: EdgeKind) {
        self.graph.add_edge(source, target, kind);
    }

    pub fn get_node_by_symbol(&self, symbol: &str) -> Option<NodeIndex> {
        self.symbol_to_node.get(symbol).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        &mut self.graph[idx]
    }

    /// Outgoing neighbors together with the connecting edge kind.
    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, EdgeKind)> + '_ {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.target(), *edge.weight()))
    }

    /// Outgoing neighbors reached through an edge of `kind`.
    pub fn neighbors_by(
        &self,
        idx: NodeIndex,
        kind: EdgeKind,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.neighbors(idx)
            .filter(move |(_, k)| *k == kind)
            .map(|(n, _)| n)
    }

    /// All member nodes, in insertion order.
    pub fn member_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|&idx| matches!(self.graph[idx], Node::Member(_)))
    }

    pub fn symbol(&self, idx: NodeIndex) -> &str {
        &self.node(idx).core().symbol
    }
}

impl SymbolGraph for HierarchyGraph {
    fn member(&self, idx: NodeIndex) -> Option<&MemberNode> {
        self.graph.node_weight(idx)?.as_member()
    }

    fn type_node(&self, idx: NodeIndex) -> Option<&TypeNode> {
        self.graph.node_weight(idx)?.as_type()
    }

    fn overridden(&self, member: NodeIndex) -> Option<NodeIndex> {
        self.neighbors_by(member, EdgeKind::Overrides).next()
    }

    fn containing_type(&self, member: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(member, Direction::Incoming)
            .find(|edge| *edge.weight() == EdgeKind::Contains)
            .map(|edge| edge.source())
    }

    fn all_interfaces(&self, ty: NodeIndex) -> &[NodeIndex] {
        self.type_node(ty)
            .map(|t| t.all_interfaces.as_slice())
            .unwrap_or(&[])
    }

    fn members_named(&self, ty: NodeIndex, name: &str) -> Vec<NodeIndex> {
        let mut found: Vec<NodeIndex> = self
            .neighbors_by(ty, EdgeKind::Contains)
            .filter(|&m| self.node(m).core().name == name)
            .collect();
        // petgraph yields outgoing edges newest first; keep declaration order.
        found.sort_unstable();
        found
    }

    fn is_generated_document(&self, path: &str) -> bool {
        self.generated_documents.contains(path)
    }
}
