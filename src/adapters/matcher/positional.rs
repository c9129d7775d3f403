use crate::domain::node::ParameterNode;
use crate::domain::policy::{MatchingKind, ParameterMatcher};

/// Same position, same declared type. Lets overrides rename parameters freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalMatcher;

impl ParameterMatcher for PositionalMatcher {
    fn find_match<'a>(
        &self,
        parameter: &ParameterNode,
        candidates: &'a [ParameterNode],
    ) -> Option<&'a ParameterNode> {
        candidates
            .get(parameter.ordinal)
            .filter(|candidate| candidate.param_type == parameter.param_type)
    }

    fn kind(&self) -> MatchingKind {
        MatchingKind::Positional
    }
}
