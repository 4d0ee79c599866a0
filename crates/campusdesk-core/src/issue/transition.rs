//! Explicit status transition table.
//!
//! Ticket status changes are checked against a table chosen in configuration
//! instead of being implied by whichever buttons the UI happens to show.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::model::IssueStatus;

/// Named transition policies selectable from `config.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may follow any other, including reopening resolved tickets.
    #[default]
    Permissive,
    /// Tickets only move towards `Resolved`.
    ForwardOnly,
}

/// The set of allowed `(from, to)` status changes.
///
/// A same-status update is always allowed regardless of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    allowed: Vec<(IssueStatus, IssueStatus)>,
}

impl TransitionTable {
    /// All six directed transitions between the three states.
    pub fn permissive() -> Self {
        let allowed = IssueStatus::iter()
            .flat_map(|from| {
                IssueStatus::iter()
                    .filter(move |to| *to != from)
                    .map(move |to| (from, to))
            })
            .collect();
        Self { allowed }
    }

    /// Open → In Progress → Resolved, with Open → Resolved as a shortcut.
    pub fn forward_only() -> Self {
        Self {
            allowed: vec![
                (IssueStatus::Open, IssueStatus::InProgress),
                (IssueStatus::Open, IssueStatus::Resolved),
                (IssueStatus::InProgress, IssueStatus::Resolved),
            ],
        }
    }

    /// Builds a table from an explicit list of transitions.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (IssueStatus, IssueStatus)>) -> Self {
        Self {
            allowed: pairs.into_iter().collect(),
        }
    }

    pub fn allows(&self, from: IssueStatus, to: IssueStatus) -> bool {
        from == to || self.allowed.contains(&(from, to))
    }

    /// Statuses reachable from `from` (excluding `from` itself).
    pub fn next_states(&self, from: IssueStatus) -> Vec<IssueStatus> {
        IssueStatus::iter()
            .filter(|to| *to != from && self.allowed.contains(&(from, *to)))
            .collect()
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::permissive()
    }
}

impl From<TransitionPolicy> for TransitionTable {
    fn from(policy: TransitionPolicy) -> Self {
        match policy {
            TransitionPolicy::Permissive => Self::permissive(),
            TransitionPolicy::ForwardOnly => Self::forward_only(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use IssueStatus::*;

    #[test]
    fn test_permissive_allows_all_six_transitions() {
        let table = TransitionTable::permissive();
        for from in IssueStatus::iter() {
            for to in IssueStatus::iter() {
                assert!(table.allows(from, to), "{from} -> {to}");
            }
        }
        assert_eq!(table.next_states(Resolved), vec![Open, InProgress]);
    }

    #[test]
    fn test_forward_only_blocks_reopening() {
        let table = TransitionTable::forward_only();
        assert!(table.allows(Open, InProgress));
        assert!(table.allows(InProgress, Resolved));
        assert!(table.allows(Resolved, Resolved));
        assert!(!table.allows(Resolved, Open));
        assert!(!table.allows(InProgress, Open));
        assert!(table.next_states(Resolved).is_empty());
    }

    #[test]
    fn test_policy_deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: TransitionPolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"forward_only\"").unwrap();
        assert_eq!(w.policy, TransitionPolicy::ForwardOnly);
    }
}
