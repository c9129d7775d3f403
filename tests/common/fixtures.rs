//! Test fixture generators for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use nullability_annotations::app::config::AnalysisConfig;
use nullability_annotations::app::engine::AnalysisEngine;
use nullability_annotations::domain::builder::GraphBuilder;
use nullability_annotations::domain::semantic::{
    AttributeData, DocumentSemantics, MemberDefinition, MemberKind, MethodKind,
    ParameterDefinition, RefKind, SemanticData, SourceLocation, SourceSpan, TypeDefinition,
    TypeKind, TypeRef,
};

use super::mock::MockSourceReader;

pub const APP_ASSEMBLY: &str = "App";
pub const NOT_NULL: &str = "NotNullAttribute";
pub const CAN_BE_NULL: &str = "CanBeNullAttribute";

/// Column where fixture method identifiers start (`    public string Name(`).
const MEMBER_COLUMN: u32 = 18;
/// Column of the first fixture parameter; later ones follow every 12 columns.
const PARAM_COLUMN: u32 = 30;

fn span(line: u32, column: u32, len: usize) -> SourceSpan {
    SourceSpan::new(line, column, line, column + len as u32)
}

fn type_def(symbol_id: &str, kind: TypeKind, base: Option<&str>, interfaces: &[&str]) -> TypeDefinition {
    TypeDefinition {
        symbol_id: symbol_id.to_string(),
        name: symbol_id.to_string(),
        kind,
        assembly: APP_ASSEMBLY.to_string(),
        base_type: base.map(String::from),
        interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
        locations: vec![SourceLocation {
            file_path: format!("{symbol_id}.cs"),
            span: span(0, 13, symbol_id.len()),
            declaration_span: None,
        }],
    }
}

pub fn class(symbol_id: &str, base: Option<&str>, interfaces: &[&str]) -> TypeDefinition {
    type_def(symbol_id, TypeKind::Class, base, interfaces)
}

pub fn interface(symbol_id: &str, bases: &[&str]) -> TypeDefinition {
    type_def(symbol_id, TypeKind::Interface, None, bases)
}

/// Metadata-only type from another assembly (no source locations).
pub fn external(mut definition: TypeDefinition, assembly: &str) -> TypeDefinition {
    definition.assembly = assembly.to_string();
    definition.locations.clear();
    definition
}

pub fn param(name: &str, type_name: &str) -> ParameterDefinition {
    ParameterDefinition {
        name: name.to_string(),
        param_type: TypeRef::reference(type_name),
        ref_kind: RefKind::None,
        is_extern: false,
        attributes: vec![],
        locations: vec![],
    }
}

pub fn value_param(name: &str, type_name: &str) -> ParameterDefinition {
    ParameterDefinition {
        param_type: TypeRef::value(type_name),
        ..param(name, type_name)
    }
}

pub fn out_param(name: &str, type_name: &str) -> ParameterDefinition {
    ParameterDefinition {
        ref_kind: RefKind::Out,
        ..param(name, type_name)
    }
}

pub fn annotated_param(name: &str, type_name: &str, attribute: &str) -> ParameterDefinition {
    ParameterDefinition {
        attributes: vec![AttributeData::new(attribute)],
        ..param(name, type_name)
    }
}

/// Method `<owner>.<name>` declared on line 2 of `<owner>.cs`. `returns = None` is void; the
/// return type is a reference type otherwise. Parameters get locations on the same line.
pub fn method(
    owner: &str,
    name: &str,
    returns: Option<&str>,
    parameters: Vec<ParameterDefinition>,
) -> MemberDefinition {
    let member = MemberDefinition {
        symbol_id: format!("{owner}.{name}"),
        name: name.to_string(),
        kind: MemberKind::Method,
        method_kind: MethodKind::Ordinary,
        containing_type: Some(owner.to_string()),
        value_type: returns.map(TypeRef::reference),
        parameters,
        attributes: vec![],
        overridden: None,
        locations: vec![],
    };
    member.located(&format!("{owner}.cs"), 2)
}

pub fn property(owner: &str, name: &str, type_name: &str) -> MemberDefinition {
    let member = MemberDefinition {
        symbol_id: format!("{owner}.{name}"),
        name: name.to_string(),
        kind: MemberKind::Property,
        method_kind: MethodKind::Ordinary,
        containing_type: Some(owner.to_string()),
        value_type: Some(TypeRef::reference(type_name)),
        parameters: vec![],
        attributes: vec![],
        overridden: None,
        locations: vec![],
    };
    member.located(&format!("{owner}.cs"), 4)
}

/// Chainable tweaks for fixture members.
pub trait MemberFixture: Sized {
    fn annotated(self, attribute: &str) -> Self;
    fn overriding(self, symbol_id: &str) -> Self;
    fn with_symbol(self, symbol_id: &str) -> Self;
    fn with_method_kind(self, method_kind: MethodKind) -> Self;
    fn with_value_type(self, value_type: Option<TypeRef>) -> Self;
    /// Replaces all locations (member and parameters) with ones on `line` of `file`.
    fn located(self, file: &str, line: u32) -> Self;
    /// Adds a second declaring location (partial declarations).
    fn also_located(self, file: &str, line: u32) -> Self;
    fn without_locations(self) -> Self;
}

impl MemberFixture for MemberDefinition {
    fn annotated(mut self, attribute: &str) -> Self {
        self.attributes.push(AttributeData::new(attribute));
        self
    }

    fn overriding(mut self, symbol_id: &str) -> Self {
        self.overridden = Some(symbol_id.to_string());
        self
    }

    fn with_symbol(mut self, symbol_id: &str) -> Self {
        self.symbol_id = symbol_id.to_string();
        self
    }

    fn with_method_kind(mut self, method_kind: MethodKind) -> Self {
        self.method_kind = method_kind;
        self
    }

    fn with_value_type(mut self, value_type: Option<TypeRef>) -> Self {
        self.value_type = value_type;
        self
    }

    fn located(mut self, file: &str, line: u32) -> Self {
        self.locations = vec![SourceLocation {
            file_path: file.to_string(),
            span: span(line, MEMBER_COLUMN, self.name.len()),
            declaration_span: Some(span(line, 4, 0)),
        }];
        for (i, p) in self.parameters.iter_mut().enumerate() {
            let column = PARAM_COLUMN + 12 * i as u32;
            p.locations = vec![SourceLocation {
                file_path: file.to_string(),
                span: span(line, column, p.name.len()),
                declaration_span: Some(span(line, column, 0)),
            }];
        }
        self
    }

    fn also_located(mut self, file: &str, line: u32) -> Self {
        self.locations.push(SourceLocation {
            file_path: file.to_string(),
            span: span(line, MEMBER_COLUMN, self.name.len()),
            declaration_span: None,
        });
        self
    }

    fn without_locations(mut self) -> Self {
        self.locations.clear();
        for p in &mut self.parameters {
            p.locations.clear();
        }
        self
    }
}

pub fn snapshot(types: Vec<TypeDefinition>, members: Vec<MemberDefinition>) -> SemanticData {
    SemanticData {
        project_root: String::new(),
        documents: vec![],
        types,
        members,
    }
}

pub fn generated_document(relative_path: &str) -> DocumentSemantics {
    DocumentSemantics {
        relative_path: relative_path.to_string(),
        language: "csharp".to_string(),
        is_generated: true,
    }
}

pub fn engine_with(
    data: &SemanticData,
    reader: MockSourceReader,
    config: AnalysisConfig,
) -> AnalysisEngine {
    let graph = GraphBuilder::new().build(data);
    AnalysisEngine::from_prebuilt(
        PathBuf::from("semantic.json"),
        PathBuf::from("."),
        graph,
        config,
        Arc::new(reader),
    )
    .expect("fixture engine")
}

pub fn engine(data: &SemanticData) -> AnalysisEngine {
    engine_with(data, MockSourceReader::new(), AnalysisConfig::default())
}

/// C# source whose positions match [sample_snapshot].
pub const SAMPLE_SOURCE: &str = "namespace App
{
    public class Foo
    {
        public string GetName(string id, object owner)
        {
            return id;
        }

        public string Title { get; set; }
    }
}
";

pub const SAMPLE_FILE: &str = "src/Foo.cs";

fn sample_location(line: u32, ident_column: u32, len: usize, decl_column: u32) -> SourceLocation {
    SourceLocation {
        file_path: SAMPLE_FILE.to_string(),
        span: span(line, ident_column, len),
        declaration_span: Some(span(line, decl_column, 0)),
    }
}

/// `Foo.GetName(string id, object owner)` and `Foo.Title`, nothing annotated.
pub fn sample_snapshot() -> SemanticData {
    let mut get_name = method(
        "Foo",
        "GetName",
        Some("string"),
        vec![param("id", "string"), param("owner", "object")],
    );
    get_name.locations = vec![sample_location(4, 22, 7, 8)];
    get_name.parameters[0].locations = vec![sample_location(4, 37, 2, 30)];
    get_name.parameters[1].locations = vec![sample_location(4, 48, 5, 41)];

    let mut title = property("Foo", "Title", "string");
    title.locations = vec![sample_location(9, 22, 5, 8)];

    snapshot(vec![class("Foo", None, &[])], vec![get_name, title])
}

pub fn sample_engine() -> AnalysisEngine {
    engine_with(
        &sample_snapshot(),
        MockSourceReader::new().with_file(SAMPLE_FILE, SAMPLE_SOURCE),
        AnalysisConfig::default(),
    )
}
