use crate::domain::node::ParameterNode;
use crate::domain::policy::{MatchingKind, ParameterMatcher};

/// Same parameter name at any position; a renamed parameter finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByNameMatcher;

impl ParameterMatcher for ByNameMatcher {
    fn find_match<'a>(
        &self,
        parameter: &ParameterNode,
        candidates: &'a [ParameterNode],
    ) -> Option<&'a ParameterNode> {
        candidates.iter().find(|c| c.name == parameter.name)
    }

    fn kind(&self) -> MatchingKind {
        MatchingKind::ByName
    }
}
