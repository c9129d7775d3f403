use crate::domain::edge::EdgeKind;
use crate::domain::graph::HierarchyGraph;
use crate::domain::node::{MemberNode, Node, NodeCore, ParameterNode, TypeNode};
use crate::domain::semantic::{MemberDefinition, SemanticData, TypeDefinition};
use petgraph::graph::NodeIndex;
use petgraph::visit::{Dfs, EdgeFiltered, EdgeRef};
use std::collections::HashMap;
use tracing::debug;

/// Graph builder - Domain Service for constructing HierarchyGraph
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Three-pass build strategy
    pub fn build(&self, semantic_data: &SemanticData) -> HierarchyGraph {
        let mut graph = HierarchyGraph::new();

        graph.generated_documents = semantic_data
            .documents
            .iter()
            .filter(|d| d.is_generated)
            .map(|d| d.relative_path.clone())
            .collect();

        // Pass 1: Node Allocation
        let type_assemblies: HashMap<&str, &str> = semantic_data
            .types
            .iter()
            .map(|t| (t.symbol_id.as_str(), t.assembly.as_str()))
            .collect();

        for definition in &semantic_data.types {
            let node_id = graph.graph.node_count() as u32;
            let node = create_type_node(node_id, definition);
            graph.add_node(definition.symbol_id.clone(), node);
        }

        for definition in &semantic_data.members {
            let node_id = graph.graph.node_count() as u32;
            let assembly = definition
                .containing_type
                .as_deref()
                .and_then(|t| type_assemblies.get(t).copied())
                .unwrap_or_default()
                .to_string();
            let node = create_member_node(node_id, assembly, definition);
            graph.add_node(definition.symbol_id.clone(), node);
        }

        // Pass 2: Edge Wiring
        for definition in &semantic_data.types {
            let Some(source) = graph.get_node_by_symbol(&definition.symbol_id) else {
                continue;
            };
            if let Some(base) = &definition.base_type {
                link(&mut graph, source, base, EdgeKind::Inherits);
            }
            for interface in &definition.interfaces {
                link(&mut graph, source, interface, EdgeKind::Implements);
            }
        }

        for definition in &semantic_data.members {
            let Some(member) = graph.get_node_by_symbol(&definition.symbol_id) else {
                continue;
            };
            match definition
                .containing_type
                .as_deref()
                .and_then(|t| graph.get_node_by_symbol(t))
            {
                Some(ty) => graph.add_edge(ty, member, EdgeKind::Contains),
                None => debug!(member = %definition.symbol_id, "containing type unresolved"),
            }
            if let Some(overridden) = &definition.overridden {
                link(&mut graph, member, overridden, EdgeKind::Overrides);
            }
        }

        // Pass 3: Transitive interface flattening
        let type_nodes: Vec<NodeIndex> = graph
            .graph
            .node_indices()
            .filter(|&idx| matches!(graph.node(idx), Node::Type(_)))
            .collect();
        for ty in type_nodes {
            let all_interfaces = collect_all_interfaces(&graph, ty);
            if let Node::Type(t) = graph.node_mut(ty) {
                t.all_interfaces = all_interfaces;
            }
        }

        debug!(
            nodes = graph.graph.node_count(),
            edges = graph.graph.edge_count(),
            "hierarchy graph built"
        );
        graph
    }
}

fn link(graph: &mut HierarchyGraph, source: NodeIndex, target: &str, kind: EdgeKind) {
    match graph.get_node_by_symbol(target) {
        Some(target_idx) if target_idx != source => graph.add_edge(source, target_idx, kind),
        Some(_) => debug!(symbol = %target, ?kind, "self-referencing link dropped"),
        None => debug!(symbol = %target, ?kind, "dangling link dropped"),
    }
}

/// Every interface reachable from `ty` over Inherits/Implements edges, excluding `ty` itself.
fn collect_all_interfaces(graph: &HierarchyGraph, ty: NodeIndex) -> Vec<NodeIndex> {
    let hierarchy = EdgeFiltered::from_fn(&graph.graph, |edge| edge.weight().is_type_hierarchy());
    let mut dfs = Dfs::new(&hierarchy, ty);
    let mut interfaces = Vec::new();
    while let Some(idx) = dfs.next(&hierarchy) {
        if idx == ty {
            continue;
        }
        if let Node::Type(t) = graph.node(idx)
            && t.is_interface()
        {
            interfaces.push(idx);
        }
    }
    interfaces.sort_unstable();
    interfaces
}

fn create_type_node(node_id: u32, definition: &TypeDefinition) -> Node {
    Node::Type(TypeNode {
        core: NodeCore::new(
            node_id,
            definition.name.clone(),
            definition.symbol_id.clone(),
            definition.assembly.clone(),
            definition.locations.clone(),
        ),
        type_kind: definition.kind,
        all_interfaces: Vec::new(),
    })
}

fn create_member_node(node_id: u32, assembly: String, definition: &MemberDefinition) -> Node {
    let parameters = definition
        .parameters
        .iter()
        .enumerate()
        .map(|(ordinal, p)| ParameterNode {
            name: p.name.clone(),
            param_type: p.param_type.clone(),
            ref_kind: p.ref_kind,
            is_extern: p.is_extern,
            ordinal,
            attributes: p.attributes.clone(),
            locations: p.locations.clone(),
        })
        .collect();

    Node::Member(MemberNode {
        core: NodeCore::new(
            node_id,
            definition.name.clone(),
            definition.symbol_id.clone(),
            assembly,
            definition.locations.clone(),
        ),
        kind: definition.kind,
        method_kind: definition.method_kind,
        value_type: definition.value_type.clone(),
        parameters,
        attributes: definition.attributes.clone(),
    })
}
