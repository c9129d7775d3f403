use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// What kind of declared element an obligation is about; selects the diagnostic rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObligationCategory {
    MethodParameter,
    MethodReturn,
    Property,
}

/// Requirement that one declared element carries a nullability annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Obligation {
    /// The member being analyzed (never an ancestor).
    pub member: NodeIndex,
    /// Parameter position for `MethodParameter` obligations.
    pub parameter: Option<usize>,
    pub category: ObligationCategory,
}

impl Obligation {
    pub fn method_return(member: NodeIndex) -> Self {
        Self {
            member,
            parameter: None,
            category: ObligationCategory::MethodReturn,
        }
    }

    pub fn property(member: NodeIndex) -> Self {
        Self {
            member,
            parameter: None,
            category: ObligationCategory::Property,
        }
    }

    pub fn parameter(member: NodeIndex, ordinal: usize) -> Self {
        Self {
            member,
            parameter: Some(ordinal),
            category: ObligationCategory::MethodParameter,
        }
    }
}

/// Immutable set of outstanding obligations for one member.
///
/// Discharging never mutates: each hierarchy level produces a new, smaller set, so a walk is a
/// fold over levels and no tracking state outlives the member's analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObligationSet {
    pending: Vec<Obligation>,
}

impl ObligationSet {
    pub fn new(pending: Vec<Obligation>) -> Self {
        Self { pending }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obligation> {
        self.pending.iter()
    }

    /// New set without the obligations `discharged` accepts.
    pub fn discharge_where(&self, discharged: impl Fn(&Obligation) -> bool) -> Self {
        Self {
            pending: self
                .pending
                .iter()
                .filter(|o| !discharged(o))
                .copied()
                .collect(),
        }
    }

    /// New set with `other`'s obligations appended.
    pub fn union(&self, other: &ObligationSet) -> Self {
        let mut pending = self.pending.clone();
        pending.extend(other.pending.iter().copied());
        Self { pending }
    }

    pub fn into_vec(self) -> Vec<Obligation> {
        self.pending
    }
}

impl FromIterator<Obligation> for ObligationSet {
    fn from_iter<I: IntoIterator<Item = Obligation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
