use serde::{Deserialize, Serialize};

/// Recognition state shared by every gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureState {
    /// Watching touches, nothing recognized yet.
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    /// Recognition was ruled out; dormant until reset.
    Failed,
}

impl GestureState {
    /// Began or Changed.
    pub fn is_active(self) -> bool {
        matches!(self, GestureState::Began | GestureState::Changed)
    }

    /// Ended, Cancelled or Failed. Only a reset leaves these.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GestureState::Ended | GestureState::Cancelled | GestureState::Failed
        )
    }

    pub fn can_transition_to(self, next: GestureState) -> bool {
        use GestureState::*;
        match self {
            Possible => matches!(next, Began | Failed),
            Began | Changed => matches!(next, Changed | Ended | Cancelled),
            Ended | Cancelled | Failed => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GestureState::Possible => "possible",
            GestureState::Began => "began",
            GestureState::Changed => "changed",
            GestureState::Ended => "ended",
            GestureState::Cancelled => "cancelled",
            GestureState::Failed => "failed",
        }
    }
}
