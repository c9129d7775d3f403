//! Override chains, interface scans, parameter matching and origin exemptions.

mod common;

use common::fixtures::*;
use common::mock::{CountingNeverMatcher, MockSourceReader};
use nullability_annotations::adapters::matcher::PositionalMatcher;
use nullability_annotations::app::config::AnalysisConfig;
use nullability_annotations::app::dto::AnalyzeRequest;
use nullability_annotations::app::engine::AnalysisEngine;
use nullability_annotations::domain::builder::GraphBuilder;
use nullability_annotations::domain::diagnostic::{Diagnostic, RuleId};
use nullability_annotations::domain::policy::{MatchingKind, OriginParams, OriginPolicy};
use nullability_annotations::domain::semantic::{MethodKind, SemanticData, TypeRef};
use nullability_annotations::domain::solver::AnnotationSolver;
use tokio_util::sync::CancellationToken;

fn analyze_with(engine: &AnalysisEngine, matching: Option<MatchingKind>) -> Vec<Diagnostic> {
    engine
        .analyze(
            AnalyzeRequest {
                parameter_matching: matching,
            },
            &CancellationToken::new(),
        )
        .diagnostics
}

fn analyze(data: &SemanticData) -> Vec<Diagnostic> {
    analyze_with(&engine(data), None)
}

fn diagnosed(diagnostics: &[Diagnostic]) -> Vec<(String, RuleId)> {
    diagnostics
        .iter()
        .map(|d| (d.anchor.member_symbol.clone(), d.rule))
        .collect()
}

/// Base.Save([NotNull] string path, object state) <- Derived.Save(string target, object state)
fn renamed_override() -> SemanticData {
    snapshot(
        vec![class("Base", None, &[]), class("Derived", Some("Base"), &[])],
        vec![
            method(
                "Base",
                "Save",
                None,
                vec![
                    annotated_param("path", "string", NOT_NULL),
                    annotated_param("state", "object", CAN_BE_NULL),
                ],
            ),
            method(
                "Derived",
                "Save",
                None,
                vec![param("target", "string"), param("state", "object")],
            )
            .overriding("Base.Save"),
        ],
    )
}

#[test]
fn test_positional_matching_survives_renames() {
    let diagnostics = analyze_with(&engine(&renamed_override()), Some(MatchingKind::Positional));
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn test_by_name_matching_misses_renamed_parameter() {
    let diagnostics = analyze_with(&engine(&renamed_override()), Some(MatchingKind::ByName));
    let names: Vec<_> = diagnostics.iter().map(|d| d.display_name.as_str()).collect();
    assert_eq!(names, vec!["target"]);
}

#[test]
fn test_configured_matching_is_used_by_default() {
    let config = AnalysisConfig {
        parameter_matching: MatchingKind::ByName,
        ..AnalysisConfig::default()
    };
    let engine = engine_with(&renamed_override(), MockSourceReader::new(), config);
    let response = engine.analyze(AnalyzeRequest::default(), &CancellationToken::new());
    assert_eq!(response.parameter_matching, MatchingKind::ByName);
    assert_eq!(response.diagnostics.len(), 1);
}

#[test]
fn test_positional_matching_requires_equal_type() {
    let data = snapshot(
        vec![class("Base", None, &[]), class("Derived", Some("Base"), &[])],
        vec![
            method("Base", "Load", None, vec![annotated_param("key", "object", NOT_NULL)]),
            method("Derived", "Load", None, vec![param("key", "string")]).overriding("Base.Load"),
        ],
    );

    assert_eq!(analyze_with(&engine(&data), Some(MatchingKind::Positional)).len(), 1);
    assert!(analyze_with(&engine(&data), Some(MatchingKind::ByName)).is_empty());
}

#[test]
fn test_parameters_discharged_by_different_levels() {
    let data = snapshot(
        vec![
            interface("IStore", &[]),
            class("Root", None, &[]),
            class("Middle", Some("Root"), &[]),
            class("Leaf", Some("Middle"), &["IStore"]),
        ],
        vec![
            method(
                "Root",
                "Put",
                Some("string"),
                vec![annotated_param("a", "string", NOT_NULL), param("b", "string"), param("c", "string")],
            )
            .annotated(NOT_NULL),
            method(
                "Middle",
                "Put",
                Some("string"),
                vec![param("a", "string"), annotated_param("b", "string", CAN_BE_NULL), param("c", "string")],
            )
            .overriding("Root.Put"),
            method(
                "IStore",
                "Put",
                Some("string"),
                vec![param("a", "string"), param("b", "string"), annotated_param("c", "string", NOT_NULL)],
            )
            .annotated(NOT_NULL),
            method(
                "Leaf",
                "Put",
                Some("string"),
                vec![param("x", "string"), param("y", "string"), param("z", "string")],
            )
            .overriding("Middle.Put"),
        ],
    );

    let diagnostics = analyze(&data);
    assert!(
        !diagnostics.iter().any(|d| d.anchor.member_symbol == "Leaf.Put"),
        "{diagnostics:?}"
    );
}

#[test]
fn test_transitive_interfaces_are_scanned() {
    let data = snapshot(
        vec![
            interface("IBase", &[]),
            interface("IDerived", &["IBase"]),
            class("Impl", None, &["IDerived"]),
        ],
        vec![
            property("IBase", "Name", "string").annotated(NOT_NULL),
            property("Impl", "Name", "string"),
        ],
    );

    assert!(analyze(&data).is_empty());
}

#[test]
fn test_interfaces_of_base_class_are_scanned() {
    let data = snapshot(
        vec![
            interface("INamed", &[]),
            class("Base", None, &["INamed"]),
            class("Derived", Some("Base"), &[]),
        ],
        vec![
            property("INamed", "Name", "string").annotated(CAN_BE_NULL),
            property("Derived", "Name", "string"),
        ],
    );

    assert!(analyze(&data).is_empty());
}

#[test]
fn test_framework_interface_annotation_never_counts() {
    let data = snapshot(
        vec![
            external(interface("IComparer", &[]), "netstandard"),
            class("Cmp", None, &["IComparer"]),
        ],
        vec![
            method("IComparer", "Describe", Some("string"), vec![])
                .annotated(NOT_NULL)
                .without_locations(),
            method("Cmp", "Describe", Some("string"), vec![]),
        ],
    );

    assert_eq!(
        diagnosed(&analyze(&data)),
        vec![("Cmp.Describe".to_string(), RuleId::MethodReturnAttribute)]
    );
}

#[test]
fn test_chain_stops_at_first_framework_ancestor() {
    // Top is annotated but sits above a framework class in the chain
    let data = snapshot(
        vec![
            class("Top", None, &[]),
            external(class("Framework", Some("Top"), &[]), "Microsoft.Extensions"),
            class("Leaf", Some("Framework"), &[]),
        ],
        vec![
            method("Top", "Render", Some("string"), vec![]).annotated(NOT_NULL),
            method("Framework", "Render", Some("string"), vec![])
                .overriding("Top.Render")
                .without_locations(),
            method("Leaf", "Render", Some("string"), vec![]).overriding("Framework.Render"),
        ],
    );

    assert_eq!(
        diagnosed(&analyze(&data)),
        vec![("Leaf.Render".to_string(), RuleId::MethodReturnAttribute)]
    );
}

#[test]
fn test_custom_framework_prefixes() {
    let data = snapshot(
        vec![
            external(class("VendorBase", None, &[]), "Vendor.Toolkit"),
            class("Mine", Some("VendorBase"), &[]),
        ],
        vec![
            method("VendorBase", "Run", Some("string"), vec![]).annotated(NOT_NULL),
            method("Mine", "Run", Some("string"), vec![]).overriding("VendorBase.Run"),
        ],
    );

    // default lists do not know the vendor: its annotation discharges
    assert!(analyze(&data).is_empty());

    let config = AnalysisConfig {
        origin: OriginParams {
            framework_prefixes: vec!["Vendor.".to_string()],
            ..OriginParams::default()
        },
        ..AnalysisConfig::default()
    };
    let engine = engine_with(&data, MockSourceReader::new(), config);
    assert_eq!(analyze_with(&engine, None).len(), 1);
}

#[test]
fn test_overloads_are_all_scanned() {
    // known simplification: any same-named interface member may discharge
    let data = snapshot(
        vec![interface("IParser", &[]), class("Parser", None, &["IParser"])],
        vec![
            method("IParser", "Parse", Some("string"), vec![param("text", "string")])
                .with_symbol("IParser.Parse(string)"),
            method("IParser", "Parse", Some("string"), vec![annotated_param("data", "object", NOT_NULL)])
                .with_symbol("IParser.Parse(object)")
                .annotated(NOT_NULL)
                .located("IParser.cs", 3),
            method("Parser", "Parse", Some("string"), vec![param("text", "object")]),
        ],
    );

    let diagnostics = analyze(&data);
    assert!(
        !diagnostics.iter().any(|d| d.anchor.member_symbol == "Parser.Parse"),
        "{diagnostics:?}"
    );
}

#[test]
fn test_interface_property_does_not_discharge_method() {
    let data = snapshot(
        vec![interface("IFoo", &[]), class("Foo", None, &["IFoo"])],
        vec![
            property("IFoo", "Value", "string").annotated(NOT_NULL),
            method("Foo", "Value", Some("string"), vec![]),
        ],
    );

    assert_eq!(
        diagnosed(&analyze(&data)),
        vec![("Foo.Value".to_string(), RuleId::MethodReturnAttribute)]
    );
}

#[test]
fn test_ineligible_elements_are_not_checked() {
    let data = snapshot(
        vec![class("Foo", None, &[])],
        vec![
            method(
                "Foo",
                "TryGet",
                Some("bool"),
                vec![value_param("index", "int"), out_param("value", "string")],
            )
            .with_value_type(Some(TypeRef::value("bool"))),
            method("Foo", "get_Title", Some("string"), vec![])
                .with_method_kind(MethodKind::PropertyGet)
                .located("Foo.cs", 6),
            method("Foo", "Clear", None, vec![]).located("Foo.cs", 8),
        ],
    );

    assert!(analyze(&data).is_empty());
}

#[test]
fn test_generated_exemptions() {
    let host_flagged = method("Model", "Load", Some("string"), vec![]).located("Proxy.cs", 2);
    let partial = method("Model", "Save", Some("string"), vec![])
        .located("Model.cs", 5)
        .also_located("obj/Model.g.cs", 1);
    let mut data = snapshot(
        vec![class("Model", None, &[]), class("Other", None, &[])],
        vec![
            host_flagged,
            partial,
            method("Other", "Load", Some("string"), vec![]),
        ],
    );
    data.documents.push(generated_document("Proxy.cs"));

    assert_eq!(
        diagnosed(&analyze(&data)),
        vec![("Other.Load".to_string(), RuleId::MethodReturnAttribute)]
    );

    let config = AnalysisConfig {
        origin: OriginParams {
            include_generated: true,
            ..OriginParams::default()
        },
        ..AnalysisConfig::default()
    };
    let engine = engine_with(&data, MockSourceReader::new(), config);
    assert_eq!(analyze_with(&engine, None).len(), 3);
}

#[test]
fn test_missing_host_data_is_silent() {
    let orphan = method("Ghost", "Find", Some("string"), vec![param("key", "string")]);
    let dangling = method("Foo", "Find", Some("string"), vec![]).overriding("Missing.Find");
    let data = snapshot(vec![class("Foo", None, &["IMissing"])], vec![orphan, dangling]);

    // orphan: no containing type, but it has locations, so it is still checked on its own
    let symbols: Vec<_> = diagnosed(&analyze(&data))
        .into_iter()
        .map(|(symbol, _)| symbol)
        .collect();
    assert_eq!(symbols, vec!["Foo.Find", "Ghost.Find", "Ghost.Find"]);
}

#[test]
fn test_matcher_is_consulted_per_level_only_while_obligations_remain() {
    let data = renamed_override();
    let graph = GraphBuilder::new().build(&data);
    let origin = OriginPolicy::default();
    let matcher = CountingNeverMatcher::default();
    let solver = AnnotationSolver::new(&graph, &origin, &matcher);

    let derived = graph.get_node_by_symbol("Derived.Save").unwrap();
    let outstanding = solver.analyze_member(derived);

    assert_eq!(outstanding.len(), 2);
    // two parameters, two levels (self and Base)
    assert_eq!(matcher.calls(), 4);

    let positional = AnnotationSolver::new(&graph, &origin, &PositionalMatcher);
    assert!(positional.analyze_member(derived).is_empty());
}
