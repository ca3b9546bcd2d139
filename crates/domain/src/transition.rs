// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Academic year status transition table.
//!
//! The lifecycle is a three-state cycle:
//!
//! ```text
//! Planning -> Open -> Closed -> Planning
//! ```
//!
//! No status loops onto itself and no status may skip a stage. Every
//! status change must be checked here before it is persisted, and the
//! explanation of a rejection is shown to the operator verbatim.

use crate::error::DomainError;
use crate::types::YearStatus;

impl YearStatus {
    /// Returns the statuses this status may move to.
    #[must_use]
    pub const fn valid_transitions(self) -> &'static [Self] {
        match self {
            Self::Planning => &[Self::Open],
            Self::Open => &[Self::Closed],
            Self::Closed => &[Self::Planning],
        }
    }

    /// Checks if a transition from this status to `target` is valid.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planning, Self::Open) | (Self::Open, Self::Closed) | (Self::Closed, Self::Planning)
        )
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the edge is not in the table.
    pub const fn validate_transition(self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: target,
            })
        }
    }
}

/// Explains, in operator-facing language, why `from -> to` is rejected.
#[must_use]
pub fn explain_invalid(from: YearStatus, to: YearStatus) -> String {
    if from == to {
        return format!("The academic year is already {from}");
    }

    let rule: &str = match from {
        YearStatus::Planning => "a year in planning can only be opened",
        YearStatus::Open => "an open year can only be closed",
        YearStatus::Closed => "a closed year can only go back to planning",
    };

    format!("Cannot change the academic year from {from} to {to}: {rule}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_edges_are_valid() {
        assert!(YearStatus::Planning.can_transition_to(YearStatus::Open));
        assert!(YearStatus::Open.can_transition_to(YearStatus::Closed));
        assert!(YearStatus::Closed.can_transition_to(YearStatus::Planning));
    }

    #[test]
    fn test_every_unlisted_pair_is_invalid() {
        for from in YearStatus::ALL {
            for to in YearStatus::ALL {
                let listed: bool = from.valid_transitions().contains(&to);
                assert_eq!(
                    from.can_transition_to(to),
                    listed,
                    "table and predicate disagree on {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_no_self_loops() {
        for status in YearStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_planning_cannot_skip_to_closed() {
        let result = YearStatus::Planning.validate_transition(YearStatus::Closed);
        assert_eq!(
            result,
            Err(DomainError::InvalidTransition {
                from: YearStatus::Planning,
                to: YearStatus::Closed,
            })
        );
    }

    #[test]
    fn test_each_status_has_exactly_one_successor() {
        for status in YearStatus::ALL {
            assert_eq!(status.valid_transitions().len(), 1);
        }
    }

    #[test]
    fn test_explain_invalid_names_both_statuses() {
        let message: String = explain_invalid(YearStatus::Open, YearStatus::Planning);
        assert!(message.contains("Open"));
        assert!(message.contains("Planning"));
        assert!(message.contains("can only be closed"));
    }

    #[test]
    fn test_explain_invalid_self_loop() {
        let message: String = explain_invalid(YearStatus::Closed, YearStatus::Closed);
        assert_eq!(message, "The academic year is already Closed");
    }

    #[test]
    fn test_error_display_matches_explanation() {
        let err = DomainError::InvalidTransition {
            from: YearStatus::Open,
            to: YearStatus::Planning,
        };
        assert_eq!(
            err.to_string(),
            explain_invalid(YearStatus::Open, YearStatus::Planning)
        );
    }
}
