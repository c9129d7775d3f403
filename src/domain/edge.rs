/// Edge kind - relationships of the type hierarchy graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    // ============ Membership ============
    Contains, // Type → Member

    // ============ Override Chain ============
    Overrides, // Member → directly overridden Member (base type)

    // ============ Type Hierarchy ============
    Inherits,   // Type → base Type
    Implements, // Type → directly implemented Interface (or Interface → base Interface)
}

impl EdgeKind {
    /// Edges followed when flattening a type's transitive interface set.
    pub fn is_type_hierarchy(&self) -> bool {
        matches!(self, EdgeKind::Inherits | EdgeKind::Implements)
    }
}
