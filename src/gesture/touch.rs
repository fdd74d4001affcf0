//! Raw touch input as delivered by the host, independent of `web_sys`.

use serde::{Deserialize, Serialize};

/// Stable handle for one physical contact, from touch start until release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TouchId(pub i32);

/// One touch sample in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub id: TouchId,
    pub screen_x: f64,
    pub screen_y: f64,
}

impl Touch {
    pub fn new(id: i32, screen_x: f64, screen_y: f64) -> Self {
        Self {
            id: TouchId(id),
            screen_x,
            screen_y,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.screen_x, self.screen_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single touch notification.
///
/// `changed_touches` are the contacts whose status this notification reports;
/// `target_touches` are all contacts still down on the target surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    pub phase: TouchPhase,
    pub changed_touches: Vec<Touch>,
    #[serde(default)]
    pub target_touches: Vec<Touch>,
}

impl TouchInput {
    pub fn new(phase: TouchPhase, changed_touches: Vec<Touch>, target_touches: Vec<Touch>) -> Self {
        Self {
            phase,
            changed_touches,
            target_touches,
        }
    }

    pub fn changed_ids(&self) -> impl Iterator<Item = TouchId> + '_ {
        self.changed_touches.iter().map(|t| t.id)
    }

    /// True once no contact remains on the target surface.
    pub fn surface_released(&self) -> bool {
        self.target_touches.is_empty()
    }
}
