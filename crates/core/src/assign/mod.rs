//! Random single-cycle assignment within one group.
//!
//! The draw is a uniformly random permutation of the group (Fisher–Yates via
//! [`SliceRandom::shuffle`]) followed by linking every member to the next one
//! in shuffled order, wrapping the last back to the first. The successor
//! relation of a linear order is always exactly one cycle through every
//! member, so coverage and the absence of sub-cycles hold by construction.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::grouping::Groups;
use crate::model::{Assignment, Pair, Record};

/// Error type for drawing an assignment inside a single group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    /// The group has exactly one member, who could only be assigned to themselves.
    #[error("Group '{group}' has a single member ({member}); no valid assignment exists")]
    DegenerateGroup { group: String, member: String },

    /// The group has no members at all. Grouping never produces this.
    #[error("Group '{group}' has no members")]
    EmptyGroup { group: String },
}

/// Convenience result type for assignment operations.
pub type AssignResult<T> = Result<T, AssignError>;

/// Draw a random single-cycle assignment for one group.
///
/// Pairs come back in shuffled order, so reading them top to bottom walks the
/// cycle. Returns [`AssignError::DegenerateGroup`] for a one-member group and
/// [`AssignError::EmptyGroup`] for an empty one; any group of two or more
/// members always succeeds.
pub fn assign_cycle<R>(group: &str, members: &[Record], rng: &mut R) -> AssignResult<Assignment>
where
    R: Rng + ?Sized,
{
    match members {
        [] => return Err(AssignError::EmptyGroup { group: group.to_string() }),
        [only] => {
            return Err(AssignError::DegenerateGroup {
                group: group.to_string(),
                member: only.name.clone(),
            })
        }
        _ => {}
    }

    let mut order: Vec<Record> = members.to_vec();
    order.shuffle(rng);

    Ok(Assignment { group: group.to_string(), pairs: cycle_pairs(&order) })
}

/// Link each element to its successor, the last one wrapping to the first.
///
/// `cycle_pairs(&[a, b, c])` yields `a -> b`, `b -> c`, `c -> a`.
pub fn cycle_pairs(order: &[Record]) -> Vec<Pair> {
    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(giver, receiver)| Pair { giver: giver.clone(), receiver: receiver.clone() })
        .collect()
}

/// A group that could not be assigned, kept so the caller can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFailure {
    pub group: String,
    pub members: Vec<Record>,
    pub error: AssignError,
}

/// Outcome of assigning every group of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentReport {
    /// Successfully assigned groups, in alphabetical group order.
    pub assigned: Vec<Assignment>,
    /// Groups that were skipped because no valid assignment exists.
    pub failures: Vec<GroupFailure>,
}

impl AssignmentReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn assigned_members(&self) -> usize {
        self.assigned.iter().map(Assignment::len).sum()
    }
}

/// Assign every group, consuming one shared random stream in group-key order.
///
/// Degenerate groups are collected into [`AssignmentReport::failures`] and do
/// not stop the remaining groups. An empty group is an invariant violation and
/// aborts the whole call.
pub fn assign_groups<R>(groups: &Groups, rng: &mut R) -> AssignResult<AssignmentReport>
where
    R: Rng + ?Sized,
{
    let mut report = AssignmentReport::default();

    for (group, members) in groups {
        match assign_cycle(group, members, rng) {
            Ok(assignment) => {
                debug!(group = %group, members = assignment.len(), "assigned group");
                report.assigned.push(assignment);
            }
            Err(err @ AssignError::DegenerateGroup { .. }) => {
                warn!(group = %group, "{err}");
                report.failures.push(GroupFailure {
                    group: group.clone(),
                    members: members.clone(),
                    error: err,
                });
            }
            Err(err @ AssignError::EmptyGroup { .. }) => return Err(err),
        }
    }

    Ok(report)
}

/// Why a list of giver/receiver edges is not a single covering cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CycleViolation {
    #[error("no pairs")]
    Empty,

    #[error("'{member}' is assigned to themselves")]
    SelfAssignment { member: String },

    #[error("'{member}' gives more than once")]
    DuplicateGiver { member: String },

    #[error("'{member}' receives more than once")]
    DuplicateReceiver { member: String },

    #[error("'{member}' receives but never gives")]
    UnknownReceiver { member: String },

    #[error("cycle closes after {length} of {members} members")]
    SubCycle { length: usize, members: usize },
}

/// Check that `edges` (giver, receiver) form exactly one cycle that visits
/// every giver once, with nobody assigned to themselves.
pub fn check_single_cycle<K>(edges: &[(K, K)]) -> Result<(), CycleViolation>
where
    K: Eq + Hash + Display,
{
    let Some((start, _)) = edges.first() else {
        return Err(CycleViolation::Empty);
    };

    let mut successor: HashMap<&K, &K> = HashMap::with_capacity(edges.len());
    let mut receivers: HashSet<&K> = HashSet::with_capacity(edges.len());
    for (giver, receiver) in edges {
        if giver == receiver {
            return Err(CycleViolation::SelfAssignment { member: giver.to_string() });
        }
        if successor.insert(giver, receiver).is_some() {
            return Err(CycleViolation::DuplicateGiver { member: giver.to_string() });
        }
        if !receivers.insert(receiver) {
            return Err(CycleViolation::DuplicateReceiver { member: receiver.to_string() });
        }
    }
    if let Some(stray) = receivers.iter().find(|r| !successor.contains_key(**r)) {
        return Err(CycleViolation::UnknownReceiver { member: stray.to_string() });
    }

    // Every giver has one successor and every receiver is a giver, so walking
    // from `start` must come back; count how long that takes.
    let mut length = 1;
    let mut current = successor[start];
    while current != start {
        current = successor[current];
        length += 1;
    }
    if length != edges.len() {
        return Err(CycleViolation::SubCycle { length, members: edges.len() });
    }

    Ok(())
}

/// Run [`check_single_cycle`] over an assignment's records.
pub fn verify_assignment(assignment: &Assignment) -> Result<(), CycleViolation> {
    let edges: Vec<(&Record, &Record)> =
        assignment.pairs.iter().map(|p| (&p.giver, &p.receiver)).collect();
    check_single_cycle(&edges)
}
