use crate::domain::semantic::{
    AttributeData, MemberKind, MethodKind, RefKind, SourceLocation, TypeKind, TypeRef,
};

/// Unique identifier for a node in the graph
pub type NodeId = u32;

/// Shared core attributes for all nodes
#[derive(Debug, Clone)]
pub struct NodeCore {
    pub id: NodeId,
    pub name: String,
    /// Host symbol id
    pub symbol: String,
    /// Declaring assembly (inherited from the containing type for members)
    pub assembly: String,
    /// All declaring locations; empty for metadata-only symbols
    pub locations: Vec<SourceLocation>,
}

impl NodeCore {
    pub fn new(
        id: NodeId,
        name: String,
        symbol: String,
        assembly: String,
        locations: Vec<SourceLocation>,
    ) -> Self {
        Self {
            id,
            name,
            symbol,
            assembly,
            locations,
        }
    }

    /// First declared location, used as the diagnostic anchor.
    pub fn primary_location(&self) -> Option<&SourceLocation> {
        self.locations.first()
    }
}

/// Type node
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub core: NodeCore,
    pub type_kind: TypeKind,
    /// Transitively flattened interface set (filled by the builder's last pass).
    pub all_interfaces: Vec<petgraph::graph::NodeIndex>,
}

impl TypeNode {
    pub fn is_interface(&self) -> bool {
        self.type_kind == TypeKind::Interface
    }
}

/// Parameter of a method member; not a standalone node.
#[derive(Debug, Clone)]
pub struct ParameterNode {
    pub name: String,
    pub param_type: TypeRef,
    pub ref_kind: RefKind,
    pub is_extern: bool,
    /// Position in the owning method's parameter list
    pub ordinal: usize,
    pub attributes: Vec<AttributeData>,
    pub locations: Vec<SourceLocation>,
}

/// Method or property node
#[derive(Debug, Clone)]
pub struct MemberNode {
    pub core: NodeCore,
    pub kind: MemberKind,
    pub method_kind: MethodKind,
    /// Return type (None = void) or property type
    pub value_type: Option<TypeRef>,
    pub parameters: Vec<ParameterNode>,
    pub attributes: Vec<AttributeData>,
}

impl MemberNode {
    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    pub fn is_property(&self) -> bool {
        self.kind == MemberKind::Property
    }

    pub fn parameter(&self, ordinal: usize) -> Option<&ParameterNode> {
        self.parameters.get(ordinal)
    }
}

/// Polymorphic node type
#[derive(Debug, Clone)]
pub enum Node {
    Type(TypeNode),
    Member(MemberNode),
}

impl Node {
    pub fn core(&self) -> &NodeCore {
        match self {
            Node::Type(t) => &t.core,
            Node::Member(m) => &m.core,
        }
    }

    pub fn as_member(&self) -> Option<&MemberNode> {
        match self {
            Node::Member(m) => Some(m),
            Node::Type(_) => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeNode> {
        match self {
            Node::Type(t) => Some(t),
            Node::Member(_) => None,
        }
    }
}
