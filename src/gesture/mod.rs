pub mod dom;
pub mod pinch;
pub mod recognizer;
pub mod state;
pub mod touch;

pub use dom::TouchBinding;
pub use pinch::{pinch_scale, touch_distance, PinchGesture, PinchRecognizer};
pub use recognizer::{
    Gesture, GestureArena, GestureRecognizer, GestureTransition, RecognizerContext, RecognizerId,
};
pub use state::GestureState;
pub use touch::{Touch, TouchId, TouchInput, TouchPhase};
