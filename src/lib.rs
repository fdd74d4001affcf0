//! Two-finger pinch recognition for browser touch input.
//!
//! The `gesture` module holds a small recognizer framework (state machine,
//! touch registry, listeners, arbitration) and the pinch gesture built on it.
//! `state` and `config` carry what the demo app needs around it.

pub mod config;
pub mod gesture;
pub mod logging;
pub mod state;

pub use config::{ConfigError, PinchConfig};
pub use gesture::{
    GestureArena, GestureRecognizer, GestureState, GestureTransition, PinchGesture,
    PinchRecognizer, Touch, TouchId, TouchInput, TouchPhase,
};
