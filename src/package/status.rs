//! Package lifecycle states and transitions
//!
//! Three states, all revisitable, no terminal state. Ordinary field edits
//! do not move the machine; only the two transition actions do.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{MutationError, MutationResult};

/// Lifecycle status of a package record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    Draft,
    Published,
    Unpublished,
}

impl PackageStatus {
    /// The status a newly created package starts in.
    pub const INITIAL: PackageStatus = PackageStatus::Draft;

    /// Applies a transition action, or reports why it is not allowed.
    ///
    /// - `Publish`: allowed from `Draft` or `Unpublished`
    /// - `Unpublish`: allowed only from `Published`
    pub fn apply(self, action: TransitionAction) -> MutationResult<PackageStatus> {
        match (self, action) {
            (Self::Draft | Self::Unpublished, TransitionAction::Publish) => Ok(Self::Published),
            (Self::Published, TransitionAction::Unpublish) => Ok(Self::Unpublished),
            (from, action) => Err(MutationError::invalid_transition(format!(
                "{action} is not allowed from {from}"
            ))),
        }
    }

    /// The transition actions valid from this status, for callers that
    /// present the current transition set.
    pub fn allowed_actions(self) -> &'static [TransitionAction] {
        match self {
            Self::Draft | Self::Unpublished => &[TransitionAction::Publish],
            Self::Published => &[TransitionAction::Unpublish],
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Unpublished => "UNPUBLISHED",
        };
        f.write_str(name)
    }
}

/// A requested lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    Publish,
    Unpublish,
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_is_draft() {
        assert_eq!(PackageStatus::INITIAL, PackageStatus::Draft);
    }

    #[test]
    fn test_publish_from_draft_and_unpublished() {
        assert_eq!(
            PackageStatus::Draft.apply(TransitionAction::Publish).unwrap(),
            PackageStatus::Published
        );
        assert_eq!(
            PackageStatus::Unpublished
                .apply(TransitionAction::Publish)
                .unwrap(),
            PackageStatus::Published
        );
    }

    #[test]
    fn test_publish_from_published_is_invalid() {
        let err = PackageStatus::Published
            .apply(TransitionAction::Publish)
            .unwrap_err();
        assert!(matches!(err, MutationError::InvalidTransition(_)));
    }

    #[test]
    fn test_unpublish_only_from_published() {
        assert_eq!(
            PackageStatus::Published
                .apply(TransitionAction::Unpublish)
                .unwrap(),
            PackageStatus::Unpublished
        );
        assert!(PackageStatus::Draft.apply(TransitionAction::Unpublish).is_err());
        assert!(PackageStatus::Unpublished
            .apply(TransitionAction::Unpublish)
            .is_err());
    }

    #[test]
    fn test_no_terminal_state() {
        // Every state has at least one outgoing action.
        for status in [
            PackageStatus::Draft,
            PackageStatus::Published,
            PackageStatus::Unpublished,
        ] {
            assert!(!status.allowed_actions().is_empty());
        }
    }
}
