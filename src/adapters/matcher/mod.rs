pub mod by_name;
pub mod positional;

pub use by_name::ByNameMatcher;
pub use positional::PositionalMatcher;

use crate::domain::policy::{MatchingKind, ParameterMatcher};

pub fn matcher_for(kind: MatchingKind) -> Box<dyn ParameterMatcher> {
    match kind {
        MatchingKind::Positional => Box::new(PositionalMatcher),
        MatchingKind::ByName => Box::new(ByNameMatcher),
    }
}
