use crate::domain::annotation::has_annotation;
use crate::domain::classifier::{parameter_obligations, value_obligation};
use crate::domain::node::MemberNode;
use crate::domain::obligation::{Obligation, ObligationCategory, ObligationSet};
use crate::domain::policy::{OriginPolicy, ParameterMatcher};
use crate::domain::ports::SymbolGraph;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;
use tracing::trace;

/// Annotation solver - walks a member's hierarchy and returns the obligations nothing discharges.
///
/// The walk has two phases sharing one discharge rule:
/// 1. the override chain from the member itself upward, ending before the first
///    framework-origin ancestor;
/// 2. same-named, same-kind members of every non-framework interface in the containing type's
///    transitive interface set.
///
/// Holds only shared references, so one solver serves concurrent per-member analyses.
pub struct AnnotationSolver<'a> {
    graph: &'a dyn SymbolGraph,
    origin: &'a OriginPolicy,
    matcher: &'a dyn ParameterMatcher,
}

impl<'a> AnnotationSolver<'a> {
    pub fn new(
        graph: &'a dyn SymbolGraph,
        origin: &'a OriginPolicy,
        matcher: &'a dyn ParameterMatcher,
    ) -> Self {
        Self {
            graph,
            origin,
            matcher,
        }
    }

    /// Undischarged obligations of one member, in declaration order (value first, then
    /// parameters). Empty when the member is missing, exempt, or has nothing to check.
    pub fn analyze_member(&self, idx: NodeIndex) -> Vec<Obligation> {
        let Some(member) = self.graph.member(idx) else {
            return Vec::new();
        };
        if member.core.locations.is_empty() {
            trace!(member = %member.core.symbol, "no source location, skipped");
            return Vec::new();
        }
        if self.origin.is_framework_node(self.graph, idx) {
            trace!(member = %member.core.symbol, "framework member, skipped");
            return Vec::new();
        }
        if self.origin.is_generated_member(self.graph, member) {
            trace!(member = %member.core.symbol, "generated source, skipped");
            return Vec::new();
        }

        let obligations = value_obligation(idx, member)
            .into_iter()
            .collect::<ObligationSet>()
            .union(&parameter_obligations(idx, member));
        if obligations.is_empty() {
            return Vec::new();
        }

        let outstanding = self.solve(idx, member, obligations);
        trace!(
            member = %member.core.symbol,
            outstanding = outstanding.len(),
            "hierarchy walk finished"
        );
        outstanding.into_vec()
    }

    /// Runs both walk phases over `obligations`. The interface scan is skipped once the override
    /// chain has discharged everything.
    pub fn solve(
        &self,
        idx: NodeIndex,
        member: &MemberNode,
        obligations: ObligationSet,
    ) -> ObligationSet {
        let after_overrides = self.discharge_along(member, self.override_chain(idx), obligations);
        if after_overrides.is_empty() {
            return after_overrides;
        }
        self.discharge_along(member, self.interface_candidates(idx), after_overrides)
    }

    /// The member itself followed by its overridden ancestors, most derived first.
    ///
    /// Stops before the first framework-origin ancestor. A repeated member (malformed host data)
    /// also ends the chain.
    pub fn override_chain(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = vec![idx];
        let mut visited = HashSet::from([idx]);
        let mut current = idx;
        while let Some(next) = self.graph.overridden(current) {
            if self.origin.is_framework_node(self.graph, next) {
                trace!(?next, "override chain reached framework boundary");
                break;
            }
            if !visited.insert(next) {
                break;
            }
            chain.push(next);
            current = next;
        }
        chain
    }

    /// Members of non-framework interfaces sharing the member's name and kind.
    ///
    /// Overloads are not told apart by signature: every same-named candidate is a level.
    pub fn interface_candidates(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let Some(member) = self.graph.member(idx) else {
            return Vec::new();
        };
        let Some(ty) = self.graph.containing_type(idx) else {
            return Vec::new();
        };
        self.graph
            .all_interfaces(ty)
            .iter()
            .filter(|&&interface| !self.origin.is_framework_node(self.graph, interface))
            .flat_map(|&interface| self.graph.members_named(interface, &member.core.name))
            .filter(|&candidate| {
                candidate != idx
                    && self
                        .graph
                        .member(candidate)
                        .is_some_and(|c| c.kind == member.kind)
            })
            .collect()
    }

    fn discharge_along(
        &self,
        member: &MemberNode,
        levels: Vec<NodeIndex>,
        obligations: ObligationSet,
    ) -> ObligationSet {
        levels.into_iter().fold(obligations, |outstanding, level| {
            if outstanding.is_empty() {
                return outstanding;
            }
            let Some(level_member) = self.graph.member(level) else {
                return outstanding;
            };
            outstanding.discharge_where(|o| self.discharges(member, level_member, o))
        })
    }

    /// Whether `level` carries an annotation standing for obligation `o` of `member`.
    fn discharges(&self, member: &MemberNode, level: &MemberNode, o: &Obligation) -> bool {
        let discharged = match o.category {
            ObligationCategory::MethodReturn | ObligationCategory::Property => {
                has_annotation(&level.attributes)
            }
            ObligationCategory::MethodParameter => o
                .parameter
                .and_then(|ordinal| member.parameter(ordinal))
                .and_then(|p| self.matcher.find_match(p, &level.parameters))
                .is_some_and(|matched| has_annotation(&matched.attributes)),
        };
        if discharged {
            trace!(
                member = %member.core.symbol,
                level = %level.core.symbol,
                category = ?o.category,
                parameter = ?o.parameter,
                "obligation discharged"
            );
        }
        discharged
    }
}
