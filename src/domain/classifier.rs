//! Member classifier: decides which declared elements of a member are subject to the check and
//! turns them into obligations.

use crate::domain::node::{MemberNode, ParameterNode};
use crate::domain::obligation::{Obligation, ObligationSet};
use crate::domain::semantic::RefKind;
use petgraph::graph::NodeIndex;

/// Property accessors are checked once, through their property.
pub fn is_analyzable(member: &MemberNode) -> bool {
    !(member.is_method() && member.method_kind.is_property_accessor())
}

/// Reference-typed, not `out`, not extern.
pub fn is_eligible_parameter(parameter: &ParameterNode) -> bool {
    parameter.ref_kind != RefKind::Out && !parameter.is_extern && parameter.param_type.is_reference()
}

/// Obligation for the member's own value: a non-void reference return, or a reference-typed
/// property.
pub fn value_obligation(idx: NodeIndex, member: &MemberNode) -> Option<Obligation> {
    if !is_analyzable(member) {
        return None;
    }
    let value_type = member.value_type.as_ref()?;
    if !value_type.is_reference() {
        return None;
    }
    Some(if member.is_property() {
        Obligation::property(idx)
    } else {
        Obligation::method_return(idx)
    })
}

/// One obligation per eligible parameter of a method, in declaration order.
pub fn parameter_obligations(idx: NodeIndex, member: &MemberNode) -> ObligationSet {
    if !member.is_method() || !is_analyzable(member) {
        return ObligationSet::empty();
    }
    member
        .parameters
        .iter()
        .filter(|p| is_eligible_parameter(p))
        .map(|p| Obligation::parameter(idx, p.ordinal))
        .collect()
}
