//! Diagnostic emitter: turns undischarged obligations into positioned, serializable findings.

use crate::domain::obligation::{Obligation, ObligationCategory};
use crate::domain::ports::SymbolGraph;
use crate::domain::semantic::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const CATEGORY: &str = "CodeStyle";

/// One rule per obligation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    MethodParameterAttribute,
    MethodReturnAttribute,
    PropertyAttribute,
}

impl RuleId {
    pub const ALL: [RuleId; 3] = [
        RuleId::MethodParameterAttribute,
        RuleId::MethodReturnAttribute,
        RuleId::PropertyAttribute,
    ];

    pub fn for_category(category: ObligationCategory) -> Self {
        match category {
            ObligationCategory::MethodParameter => RuleId::MethodParameterAttribute,
            ObligationCategory::MethodReturn => RuleId::MethodReturnAttribute,
            ObligationCategory::Property => RuleId::PropertyAttribute,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::MethodParameterAttribute => "MethodParameterAttribute",
            RuleId::MethodReturnAttribute => "MethodReturnAttribute",
            RuleId::PropertyAttribute => "PropertyAttribute",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RuleId::MethodParameterAttribute => {
                "The parameter should be marked with either [NotNull] or [CanBeNull]"
            }
            RuleId::MethodReturnAttribute => {
                "A methods that returns a reference value should be marked with either [NotNull] or [CanBeNull]"
            }
            RuleId::PropertyAttribute => {
                "The property should be marked with either [NotNull] or [CanBeNull]"
            }
        }
    }

    pub fn message(&self, display_name: &str) -> String {
        format!("'{display_name}' should be marked with either [NotNull] or [CanBeNull]")
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// The declared element a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticAnchor {
    pub member_symbol: String,
    /// Parameter position for parameter diagnostics.
    pub parameter: Option<usize>,
}

impl DiagnosticAnchor {
    pub fn is_parameter(&self) -> bool {
        self.parameter.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable id: `<rule>-<file>:<line>:<column>` (1-based).
    pub id: String,
    pub rule: RuleId,
    pub severity: Severity,
    pub category: String,
    pub title: String,
    pub message: String,
    /// Parameter, method or property name.
    pub display_name: String,
    /// First declared location of the anchor; also where fixes insert.
    pub location: SourceLocation,
    pub anchor: DiagnosticAnchor,
}

impl Diagnostic {
    /// 1-based (line, column) for display.
    pub fn position(&self) -> (u32, u32) {
        (
            self.location.span.start_line + 1,
            self.location.span.start_column + 1,
        )
    }

    fn sort_key(&self) -> (&str, u32, u32, RuleId, &str) {
        (
            &self.location.file_path,
            self.location.span.start_line,
            self.location.span.start_column,
            self.rule,
            &self.id,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.position();
        write!(
            f,
            "{}:{}:{}: {}[{}]: {}",
            self.location.file_path, line, column, self.severity, self.rule, self.message
        )
    }
}

/// Builds the diagnostic for one undischarged obligation. `None` when the anchor has no source
/// location to point at.
pub fn emit(graph: &dyn SymbolGraph, obligation: &Obligation) -> Option<Diagnostic> {
    let member = graph.member(obligation.member)?;
    let (display_name, location) = match obligation.parameter {
        Some(ordinal) => {
            let parameter = member.parameter(ordinal)?;
            (parameter.name.clone(), parameter.locations.first())
        }
        None => (member.core.name.clone(), member.core.primary_location()),
    };
    let Some(location) = location else {
        debug!(member = %member.core.symbol, parameter = ?obligation.parameter, "anchor has no location");
        return None;
    };

    let rule = RuleId::for_category(obligation.category);
    let id = format!(
        "{}-{}:{}:{}",
        rule,
        location.file_path,
        location.span.start_line + 1,
        location.span.start_column + 1
    );
    Some(Diagnostic {
        id,
        rule,
        severity: Severity::Warning,
        category: CATEGORY.to_string(),
        title: rule.title().to_string(),
        message: rule.message(&display_name),
        display_name,
        location: location.clone(),
        anchor: DiagnosticAnchor {
            member_symbol: member.core.symbol.clone(),
            parameter: obligation.parameter,
        },
    })
}

/// Deterministic order: file, line, column, rule.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
