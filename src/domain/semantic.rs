//! Unified semantic data representation: contract between the host compiler's symbol model and
//! the nullability annotation analysis.
//!
//! **Host mapping**: Types here correspond to the compiler's named-type / method / property /
//! parameter symbols with their attribute data and declaring syntax references. **Analysis
//! usage**: `overridden` forms the override chain, `interfaces` seed the transitive interface
//! set, `locations[0].span` anchors diagnostics and `declaration_span` anchors code fixes.

use serde::{Deserialize, Serialize};

/// Unified semantic data: everything the analysis reads from one compilation snapshot.
///
/// Produced once per compilation pass and treated as immutable for the whole analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticData {
    /// Project root path; `SourceLocation::file_path` values are relative to it.
    #[serde(default)]
    pub project_root: String,
    /// Every source artifact of the compilation (not only the ones declaring members).
    #[serde(default)]
    pub documents: Vec<DocumentSemantics>,
    /// Named types, including metadata-only framework types referenced by user code.
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    /// Methods and properties of all types above.
    #[serde(default)]
    pub members: Vec<MemberDefinition>,
}

/// One source artifact of the compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSemantics {
    /// Path relative to project_root.
    pub relative_path: String,
    /// Language id (e.g. "csharp").
    #[serde(default)]
    pub language: String,
    /// Host verdict that the document is tool-generated (e.g. an `<auto-generated>` header).
    #[serde(default)]
    pub is_generated: bool,
}

/// A named type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub symbol_id: String,
    pub name: String,
    pub kind: TypeKind,
    /// Name of the assembly declaring the type (drives framework-origin exclusion).
    #[serde(default)]
    pub assembly: String,
    /// Direct base type (classes only).
    #[serde(default)]
    pub base_type: Option<String>,
    /// Directly implemented (or, for interfaces, inherited) interfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub locations: Vec<SourceLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

/// A method or property declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDefinition {
    pub symbol_id: String,
    pub name: String,
    pub kind: MemberKind,
    /// Method flavor; ignored for properties.
    #[serde(default)]
    pub method_kind: MethodKind,
    /// Symbol id of the containing type; absent when the host could not resolve it.
    #[serde(default)]
    pub containing_type: Option<String>,
    /// Return type for methods (absent = void), declared type for properties.
    #[serde(default)]
    pub value_type: Option<TypeRef>,
    /// Ordered parameters (methods only); position = index in this list.
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    /// Attributes applied to the member (for methods: the return-value-relevant list).
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    /// Symbol id of the directly overridden member in a base type.
    #[serde(default)]
    pub overridden: Option<String>,
    /// All declaring locations (partial declarations may have several).
    #[serde(default)]
    pub locations: Vec<SourceLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Method,
    Property,
}

/// Method flavor as reported by the host. Accessors are checked through their property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MethodKind {
    #[default]
    Ordinary,
    Constructor,
    PropertyGet,
    PropertySet,
    EventAdd,
    EventRemove,
    Operator,
    Conversion,
}

impl MethodKind {
    pub fn is_property_accessor(&self) -> bool {
        matches!(self, MethodKind::PropertyGet | MethodKind::PropertySet)
    }
}

/// Single parameter in a method signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
    #[serde(default)]
    pub is_extern: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub locations: Vec<SourceLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

/// Reference to a type as used in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Fully qualified display name; type equality across hierarchy levels compares this.
    pub name: String,
    pub kind: TypeRefKind,
}

impl TypeRef {
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeRefKind::Reference,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeRefKind::Value,
        }
    }

    /// True iff instances of the type may hold an absent value. Unconstrained type parameters
    /// are not reference types.
    pub fn is_reference(&self) -> bool {
        self.kind == TypeRefKind::Reference
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRefKind {
    Reference,
    Value,
    TypeParameter,
}

/// An applied attribute, reduced to its resolved class name (unqualified).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeData {
    pub class_name: String,
}

impl AttributeData {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }
}

/// A declaring location of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Path relative to project_root.
    pub file_path: String,
    /// Identifier span; diagnostics are anchored here.
    pub span: SourceSpan,
    /// Declaration span starting right after the existing attribute lists; fixes insert here.
    /// Analysis works without it, fixes do not.
    #[serde(default)]
    pub declaration_span: Option<SourceSpan>,
}

/// Source code range. 0-based lines and columns, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceSpan {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}
