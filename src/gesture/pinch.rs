//! Two-finger pinch recognition.
//!
//! The first two contacts to touch down form the pair. Their separation at
//! the moment the pair completes is the baseline; every later move turns the
//! live separation into a ratio against it and multiplies in whatever scale
//! had accumulated before the pair formed, so lift-and-regrasp keeps
//! composing instead of snapping back to 1.

use log::trace;

use super::recognizer::{Gesture, GestureRecognizer, RecognizerContext};
use super::state::GestureState;
use super::touch::{TouchId, TouchInput};
use crate::config::{ConfigError, PinchConfig};

pub type PinchRecognizer = GestureRecognizer<PinchGesture>;

impl PinchRecognizer {
    pub fn pinch(config: &PinchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GestureRecognizer::new(PinchGesture::with_threshold(config.threshold)))
    }
}

/// Euclidean separation of two screen positions.
pub fn touch_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// `scale_offset * distance / begin_distance`, or `None` when the baseline is
/// degenerate (zero, negative or not finite) or the result is not a finite
/// positive number. Callers keep the previous scale on `None`.
pub fn pinch_scale(scale_offset: f64, distance: f64, begin_distance: f64) -> Option<f64> {
    if !(begin_distance.is_finite() && begin_distance > 0.0) {
        return None;
    }
    let scale = scale_offset * (distance / begin_distance);
    (scale.is_finite() && scale > 0.0).then_some(scale)
}

#[derive(Clone, Debug, PartialEq)]
pub struct PinchGesture {
    scale: f64,
    scale_offset: f64,
    threshold: f64,
    distance: f64,
    begin_distance: f64,
    touch_ids: Vec<TouchId>,
}

impl Default for PinchGesture {
    fn default() -> Self {
        Self::with_threshold(PinchConfig::default().threshold)
    }
}

impl PinchGesture {
    /// Fails with [`ConfigError::InvalidThreshold`] unless `threshold` is
    /// finite and non-negative.
    pub fn new(threshold: f64) -> Result<Self, ConfigError> {
        PinchConfig::default().with_threshold(threshold)?;
        Ok(Self::with_threshold(threshold))
    }

    fn with_threshold(threshold: f64) -> Self {
        Self {
            scale: 1.0,
            scale_offset: 1.0,
            threshold,
            distance: 0.0,
            begin_distance: 0.0,
            touch_ids: Vec::with_capacity(2),
        }
    }

    /// Cumulative scale since the last reset; 1.0 means no net change.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn scale_offset(&self) -> f64 {
        self.scale_offset
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn begin_distance(&self) -> f64 {
        self.begin_distance
    }

    pub fn touch_ids(&self) -> &[TouchId] {
        &self.touch_ids
    }

    /// Separation of the tracked pair, read live from the registry.
    fn touch_distance(&self, ctx: &RecognizerContext) -> f64 {
        let &[a, b] = self.touch_ids.as_slice() else {
            return 0.0;
        };
        match (ctx.touch(a), ctx.touch(b)) {
            (Some(a), Some(b)) => touch_distance(a.position(), b.position()),
            _ => 0.0,
        }
    }

    fn remove_touches(&mut self, input: &TouchInput) {
        for id in input.changed_ids() {
            if let Some(i) = self.touch_ids.iter().position(|t| *t == id) {
                self.touch_ids.remove(i);
            }
        }
    }

    fn finish(&mut self, ctx: &mut RecognizerContext, input: &TouchInput, terminal: GestureState) {
        self.remove_touches(input);
        if !input.surface_released() {
            return;
        }
        match ctx.state() {
            GestureState::Began | GestureState::Changed => {
                ctx.transition_to(terminal, input.phase);
                ctx.request_reset();
            }
            GestureState::Failed => ctx.request_reset(),
            _ => {}
        }
    }
}

impl Gesture for PinchGesture {
    fn reset(&mut self) {
        self.scale = 1.0;
        self.scale_offset = 1.0;
        self.distance = 0.0;
        self.begin_distance = 0.0;
        self.touch_ids.clear();
    }

    fn should_begin(&self, _input: &TouchInput) -> bool {
        (self.distance - self.begin_distance).abs() > self.threshold
    }

    fn touch_start(&mut self, ctx: &mut RecognizerContext, input: &TouchInput) {
        if self.touch_ids.len() >= 2 {
            return;
        }
        for id in input.changed_ids() {
            if self.touch_ids.len() == 2 {
                break;
            }
            self.touch_ids.push(id);
        }
        if self.touch_ids.len() == 2 {
            self.begin_distance = self.touch_distance(ctx);
            self.scale_offset = self.scale;
            trace!(
                "pinch pair {:?} formed at {:.1}px, scale offset {:.3}",
                self.touch_ids, self.begin_distance, self.scale_offset
            );
        }
    }

    fn touch_move(&mut self, ctx: &mut RecognizerContext, input: &TouchInput) {
        let paired = self.touch_ids.len() == 2;
        if paired {
            self.distance = self.touch_distance(ctx);
            let scale = pinch_scale(self.scale_offset, self.distance, self.begin_distance);
            if let Some(scale) = scale {
                self.scale = scale;
            }
        }

        match ctx.state() {
            GestureState::Possible => {
                if paired && self.should_begin(input) {
                    ctx.transition_to(GestureState::Began, input.phase);
                }
            }
            GestureState::Began | GestureState::Changed => {
                ctx.transition_to(GestureState::Changed, input.phase);
            }
            _ => {}
        }
    }

    fn touch_end(&mut self, ctx: &mut RecognizerContext, input: &TouchInput) {
        self.finish(ctx, input, GestureState::Ended);
    }

    fn touch_cancel(&mut self, ctx: &mut RecognizerContext, input: &TouchInput) {
        self.finish(ctx, input, GestureState::Cancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::recognizer::GestureArena;
    use crate::gesture::touch::{Touch, TouchPhase};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recognizer() -> PinchRecognizer {
        PinchRecognizer::pinch(&PinchConfig::default()).unwrap()
    }

    fn input(phase: TouchPhase, changed: &[Touch], target: &[Touch]) -> TouchInput {
        TouchInput::new(phase, changed.to_vec(), target.to_vec())
    }

    /// Two fingers at (0,0) and (x,0), started together.
    fn two_down(r: &mut PinchRecognizer, x: f64) -> (Touch, Touch) {
        let a = Touch::new(1, 0.0, 0.0);
        let b = Touch::new(2, x, 0.0);
        r.handle(&input(TouchPhase::Start, &[a, b], &[a, b]));
        (a, b)
    }

    fn move_b(r: &mut PinchRecognizer, a: Touch, x: f64) -> Touch {
        let b = Touch::new(2, x, 0.0);
        r.handle(&input(TouchPhase::Move, &[b], &[a, b]));
        b
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(touch_distance((0.0, 0.0), (3.0, 4.0)), 5.0);
        assert_eq!(touch_distance((2.0, 2.0), (2.0, 2.0)), 0.0);
    }

    #[test]
    fn zero_baseline_keeps_scale() {
        assert_eq!(pinch_scale(1.0, 10.0, 0.0), None);
        assert_eq!(pinch_scale(1.0, 10.0, f64::NAN), None);
        assert_eq!(pinch_scale(1.0, 0.0, 10.0), None);
        assert_eq!(pinch_scale(2.0, 15.0, 10.0), Some(3.0));
    }

    #[test]
    fn crossing_threshold_begins() {
        let mut r = recognizer();
        let (a, _) = two_down(&mut r, 10.0);
        assert_eq!(r.gesture().begin_distance(), 10.0);
        move_b(&mut r, a, 16.0);
        assert_eq!(r.state(), GestureState::Began);
        assert!((r.gesture().scale() - 1.6).abs() < 1e-12);
    }

    #[test]
    fn small_motion_stays_possible() {
        let mut r = recognizer();
        let (a, _) = two_down(&mut r, 10.0);
        move_b(&mut r, a, 13.0);
        assert_eq!(r.state(), GestureState::Possible);
        // exactly at the threshold is still noise
        move_b(&mut r, a, 15.0);
        assert_eq!(r.state(), GestureState::Possible);
    }

    #[test]
    fn begun_pinch_reports_every_move() {
        let mut r = recognizer();
        let (a, _) = two_down(&mut r, 10.0);
        move_b(&mut r, a, 16.0);
        move_b(&mut r, a, 16.5);
        assert_eq!(r.state(), GestureState::Changed);
        move_b(&mut r, a, 16.5);
        assert_eq!(r.state(), GestureState::Changed);
        assert!((r.gesture().scale() - 1.65).abs() < 1e-12);
    }

    #[test]
    fn third_finger_is_ignored() {
        let mut r = recognizer();
        let (a, b) = two_down(&mut r, 10.0);
        let c = Touch::new(3, 100.0, 0.0);
        r.handle(&input(TouchPhase::Start, &[c], &[a, b, c]));
        assert_eq!(r.gesture().touch_ids(), &[TouchId(1), TouchId(2)]);
        assert_eq!(r.touch_count(), 3);
    }

    #[test]
    fn extra_touches_in_one_start_are_dropped() {
        let mut r = recognizer();
        let touches = [
            Touch::new(7, 0.0, 0.0),
            Touch::new(8, 3.0, 4.0),
            Touch::new(9, 50.0, 50.0),
        ];
        r.handle(&input(TouchPhase::Start, &touches, &touches));
        assert_eq!(r.gesture().touch_ids(), &[TouchId(7), TouchId(8)]);
        assert_eq!(r.gesture().begin_distance(), 5.0);
    }

    #[test]
    fn lifting_one_finger_keeps_gesture_alive() {
        let mut r = recognizer();
        let (a, _) = two_down(&mut r, 10.0);
        let b = move_b(&mut r, a, 16.0);
        move_b(&mut r, a, 16.0);
        assert_eq!(r.state(), GestureState::Changed);

        r.handle(&input(TouchPhase::End, &[b], &[a]));
        assert_eq!(r.state(), GestureState::Changed);
        assert_eq!(r.gesture().touch_ids(), &[TouchId(1)]);
        assert!((r.gesture().scale() - 1.6).abs() < 1e-12);
    }

    #[test]
    fn cancel_after_release_resets() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut r = recognizer();
        {
            let seen = seen.clone();
            r.add_listener(move |t, g: &PinchGesture| {
                seen.borrow_mut().push((t.state, g.scale()))
            });
        }
        let (a, _) = two_down(&mut r, 10.0);
        let b = move_b(&mut r, a, 20.0);
        move_b(&mut r, a, 20.0);
        r.handle(&input(TouchPhase::Cancel, &[a, b], &[]));

        let seen = seen.borrow();
        assert_eq!(seen.last(), Some(&(GestureState::Cancelled, 2.0)));
        assert!(!seen.iter().any(|(s, _)| *s == GestureState::Ended));
        assert_eq!(r.state(), GestureState::Possible);
        assert_eq!(r.gesture().scale(), 1.0);
        assert!(r.gesture().touch_ids().is_empty());
    }

    #[test]
    fn release_while_possible_does_not_reset() {
        let mut r = recognizer();
        let (a, b) = two_down(&mut r, 10.0);
        move_b(&mut r, a, 12.0);
        r.handle(&input(TouchPhase::End, &[a, b], &[]));
        assert_eq!(r.state(), GestureState::Possible);
        assert!(r.gesture().touch_ids().is_empty());
        assert_eq!(r.gesture().begin_distance(), 10.0);
    }

    #[test]
    fn coincident_touches_never_produce_nan() {
        let mut r = recognizer();
        let (a, _) = two_down(&mut r, 0.0);
        assert_eq!(r.gesture().begin_distance(), 0.0);
        move_b(&mut r, a, 30.0);
        let scale = r.gesture().scale();
        assert!(scale.is_finite());
        assert_eq!(scale, 1.0);
        // motion still admits the gesture, the scale simply stays put
        assert_eq!(r.state(), GestureState::Began);
    }

    #[test]
    fn regrasp_composes_scale() {
        let mut r = recognizer();
        let (a, _) = two_down(&mut r, 10.0);
        let b = move_b(&mut r, a, 20.0);
        assert!((r.gesture().scale() - 2.0).abs() < 1e-12);

        // lift the second finger, put a new one down 10px away, spread to 15px
        r.handle(&input(TouchPhase::End, &[b], &[a]));
        let c = Touch::new(3, 10.0, 0.0);
        r.handle(&input(TouchPhase::Start, &[c], &[a, c]));
        assert_eq!(r.gesture().scale_offset(), 2.0);
        assert_eq!(r.gesture().begin_distance(), 10.0);

        let c = Touch::new(3, 15.0, 0.0);
        r.handle(&input(TouchPhase::Move, &[c], &[a, c]));
        assert!((r.gesture().scale() - 3.0).abs() < 1e-12);
        assert_eq!(r.state(), GestureState::Changed);
    }

    #[test]
    fn removing_unknown_touch_is_noop() {
        let mut r = recognizer();
        let (a, b) = two_down(&mut r, 10.0);
        let stray = Touch::new(42, 0.0, 0.0);
        r.handle(&input(TouchPhase::End, &[stray], &[a, b]));
        assert_eq!(r.gesture().touch_ids(), &[TouchId(1), TouchId(2)]);
    }

    #[test]
    fn invalid_thresholds_are_refused() {
        assert!(matches!(PinchGesture::new(f64::NAN), Err(ConfigError::InvalidThreshold(_))));
        assert!(matches!(PinchGesture::new(-2.0), Err(ConfigError::InvalidThreshold(_))));
        assert_eq!(PinchGesture::new(0.0).unwrap().threshold(), 0.0);

        let bad = PinchConfig { threshold: f64::INFINITY };
        assert!(PinchRecognizer::pinch(&bad).is_err());
    }

    /// A second exclusive pinch that lost the arena to `winner`, with both
    /// fingers of the spread still down.
    fn lost_to(winner: &mut PinchRecognizer, arena: &Rc<GestureArena>) -> (PinchRecognizer, Touch) {
        let mut loser = recognizer().with_arena(arena.clone(), true);
        let (a, _) = two_down(winner, 10.0);
        two_down(&mut loser, 10.0);
        move_b(winner, a, 16.0);
        move_b(&mut loser, a, 16.0);
        assert_eq!(winner.state(), GestureState::Began);
        assert_eq!(loser.state(), GestureState::Failed);
        (loser, a)
    }

    #[test]
    fn failed_pinch_waits_for_full_release() {
        let arena = Rc::new(GestureArena::new());
        let mut winner = recognizer().with_arena(arena.clone(), true);
        let (mut loser, a) = lost_to(&mut winner, &arena);
        let b = Touch::new(2, 16.0, 0.0);

        loser.handle(&input(TouchPhase::End, &[b], &[a]));
        assert_eq!(loser.state(), GestureState::Failed);
        loser.handle(&input(TouchPhase::Cancel, &[b], &[a]));
        assert_eq!(loser.state(), GestureState::Failed);
        assert_eq!(loser.gesture().touch_ids(), &[TouchId(1)]);
    }

    #[test]
    fn cancel_while_failed_resets() {
        let arena = Rc::new(GestureArena::new());
        let mut winner = recognizer().with_arena(arena.clone(), true);
        let (mut loser, a) = lost_to(&mut winner, &arena);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            loser.add_listener(move |t, _: &PinchGesture| seen.borrow_mut().push(t.state));
        }
        let b = Touch::new(2, 16.0, 0.0);

        loser.handle(&input(TouchPhase::Cancel, &[a, b], &[]));
        assert!(seen.borrow().is_empty());
        assert_eq!(loser.state(), GestureState::Possible);
        assert_eq!(loser.gesture().scale(), 1.0);
        assert_eq!(loser.gesture().begin_distance(), 0.0);
        assert!(loser.gesture().touch_ids().is_empty());
        assert_eq!(arena.owner(), Some(winner.id()));
    }
}
