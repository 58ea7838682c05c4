//! Folds lifecycle events into the single state the view renders.

use crate::model::profile::ProfileSummary;
use crate::model::roast::RoastText;

/// What the roast view shows. Exactly one variant is current.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success {
        profile: ProfileSummary,
        roast: RoastText,
    },
    Error {
        message: String,
    },
}

/// Progress of the active attempt, as reported by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    LoadingStarted,
    Succeeded {
        profile: ProfileSummary,
        roast: RoastText,
    },
    Failed {
        message: String,
    },
    /// The entry view was shown; nothing is loaded.
    Cleared,
}

/// Applies `event` to `prior`.
///
/// Every event fully determines the next state. Whether an event may be
/// applied at all is decided by the controller, not here.
pub fn project(prior: UiState, event: LifecycleEvent) -> UiState {
    prior.apply(event)
}

impl UiState {
    pub fn apply(self, event: LifecycleEvent) -> Self {
        match event {
            LifecycleEvent::LoadingStarted => UiState::Loading,
            LifecycleEvent::Succeeded { profile, roast } => UiState::Success { profile, roast },
            LifecycleEvent::Failed { message } => UiState::Error { message },
            LifecycleEvent::Cleared => UiState::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn profile(&self) -> Option<&ProfileSummary> {
        match self {
            UiState::Success { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn roast(&self) -> Option<&RoastText> {
        match self {
            UiState::Success { roast, .. } => Some(roast),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error { message } => Some(message),
            _ => None,
        }
    }
}
