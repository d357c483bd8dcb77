//! Signature matching.
//!
//! An interface member matches a concrete member when both the name and the
//! parameter-type sequence are identical. Return types are not part of the
//! key. Matching is flat and in declaration order: the first structural
//! match wins, later candidates are never considered.

use crate::reflect::{Member, MemberSig, Shape};

/// Whether `candidate` structurally matches `wanted`.
#[inline]
pub fn matches(wanted: &MemberSig, candidate: &MemberSig) -> bool {
    wanted.name() == candidate.name() && wanted.params() == candidate.params()
}

/// Find the concrete member of `shape` satisfying `wanted`.
pub fn find<'s>(wanted: &MemberSig, shape: &'s Shape) -> Option<(usize, &'s Member)> {
    shape
        .members()
        .iter()
        .enumerate()
        .find(|(_, member)| matches(wanted, member.sig()))
}
