//! Generic recognizer framework.
//!
//! A [`GestureRecognizer`] owns the shared state machine and the registry of
//! live touches, and drives one [`Gesture`] through its hooks. Gestures only
//! read the registry and *request* transitions through [`RecognizerContext`];
//! the framework validates each request, consults the [`GestureArena`], and
//! notifies listeners once the hook has returned.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use log::{debug, trace};

use super::state::GestureState;
use super::touch::{Touch, TouchId, TouchInput, TouchPhase};

static NEXT_RECOGNIZER_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecognizerId(u32);

impl RecognizerId {
    fn next() -> Self {
        RecognizerId(NEXT_RECOGNIZER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Hooks implemented by each gesture kind.
pub trait Gesture {
    /// Return gesture-specific fields to their neutral values.
    fn reset(&mut self);
    fn should_begin(&self, input: &TouchInput) -> bool;
    fn touch_start(&mut self, ctx: &mut RecognizerContext, input: &TouchInput);
    fn touch_move(&mut self, ctx: &mut RecognizerContext, input: &TouchInput);
    fn touch_end(&mut self, ctx: &mut RecognizerContext, input: &TouchInput);
    fn touch_cancel(&mut self, ctx: &mut RecognizerContext, input: &TouchInput);
}

/// Delivered to listeners for every accepted transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureTransition {
    pub recognizer: RecognizerId,
    pub state: GestureState,
    pub cause: TouchPhase,
}

/// Records which recognizer currently holds exclusive recognition.
///
/// Shared between recognizers through `Rc`; all access happens on the event
/// thread.
#[derive(Debug, Default)]
pub struct GestureArena {
    owner: Cell<Option<RecognizerId>>,
}

impl GestureArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<RecognizerId> {
        self.owner.get()
    }

    fn claim(&self, id: RecognizerId) -> bool {
        match self.owner.get() {
            None => {
                self.owner.set(Some(id));
                true
            }
            Some(owner) => owner == id,
        }
    }

    fn release(&self, id: RecognizerId) {
        if self.owner.get() == Some(id) {
            self.owner.set(None);
        }
    }
}

/// Framework-owned part of a recognizer, handed to gesture hooks.
pub struct RecognizerContext {
    id: RecognizerId,
    state: GestureState,
    touches: HashMap<TouchId, Touch>,
    arena: Option<Rc<GestureArena>>,
    exclusive: bool,
    pending: Vec<GestureTransition>,
    reset_requested: bool,
}

impl RecognizerContext {
    fn new() -> Self {
        Self {
            id: RecognizerId::next(),
            state: GestureState::Possible,
            touches: HashMap::new(),
            arena: None,
            exclusive: false,
            pending: Vec::new(),
            reset_requested: false,
        }
    }

    pub fn id(&self) -> RecognizerId {
        self.id
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Latest sample for a live touch.
    pub fn touch(&self, id: TouchId) -> Option<&Touch> {
        self.touches.get(&id)
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Request a transition. Returns whether it was accepted.
    ///
    /// Illegal requests are dropped. A `Began` request from an exclusive
    /// recognizer while another one owns the arena moves this recognizer to
    /// `Failed` instead.
    pub fn transition_to(&mut self, next: GestureState, cause: TouchPhase) -> bool {
        if !self.state.can_transition_to(next) {
            trace!(
                "recognizer {:?}: rejected {:?} -> {:?}",
                self.id, self.state, next
            );
            return false;
        }
        if next == GestureState::Began && self.exclusive {
            let blocked_by = match &self.arena {
                Some(arena) if !arena.claim(self.id) => arena.owner(),
                _ => None,
            };
            if let Some(owner) = blocked_by {
                debug!("recognizer {:?}: arena held by {:?}, failing", self.id, owner);
                self.apply(GestureState::Failed, cause);
                return false;
            }
        }
        self.apply(next, cause);
        true
    }

    /// Ask the framework to reset this recognizer once listeners have run.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    fn apply(&mut self, next: GestureState, cause: TouchPhase) {
        debug!("recognizer {:?}: {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
        if next.is_terminal() {
            self.release_claim();
        }
        self.pending.push(GestureTransition {
            recognizer: self.id,
            state: next,
            cause,
        });
    }

    fn release_claim(&self) {
        if let Some(arena) = &self.arena {
            arena.release(self.id);
        }
    }

    fn record(&mut self, input: &TouchInput) {
        for touch in &input.changed_touches {
            self.touches.insert(touch.id, *touch);
        }
    }

    fn forget(&mut self, input: &TouchInput) {
        for id in input.changed_ids() {
            self.touches.remove(&id);
        }
    }

    fn reset(&mut self) {
        self.state = GestureState::Possible;
        self.pending.clear();
        self.reset_requested = false;
        self.release_claim();
    }
}

type Listener<G> = Box<dyn FnMut(&GestureTransition, &G)>;

/// Drives a [`Gesture`] from raw touch notifications.
pub struct GestureRecognizer<G: Gesture> {
    gesture: G,
    ctx: RecognizerContext,
    listeners: Vec<Listener<G>>,
}

impl<G: Gesture> GestureRecognizer<G> {
    pub fn new(gesture: G) -> Self {
        Self {
            gesture,
            ctx: RecognizerContext::new(),
            listeners: Vec::new(),
        }
    }

    /// Join an arena. Exclusive recognizers claim it when they begin and are
    /// failed when another recognizer already holds it.
    pub fn with_arena(mut self, arena: Rc<GestureArena>, exclusive: bool) -> Self {
        self.ctx.arena = Some(arena);
        self.ctx.exclusive = exclusive;
        self
    }

    pub fn id(&self) -> RecognizerId {
        self.ctx.id
    }

    pub fn state(&self) -> GestureState {
        self.ctx.state
    }

    pub fn gesture(&self) -> &G {
        &self.gesture
    }

    pub fn touch(&self, id: TouchId) -> Option<&Touch> {
        self.ctx.touch(id)
    }

    pub fn touch_count(&self) -> usize {
        self.ctx.touch_count()
    }

    /// Listeners run in registration order after each notification is
    /// processed, before any reset the gesture requested.
    pub fn add_listener(&mut self, listener: impl FnMut(&GestureTransition, &G) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn handle(&mut self, input: &TouchInput) {
        match input.phase {
            TouchPhase::Start => {
                self.ctx.record(input);
                self.gesture.touch_start(&mut self.ctx, input);
            }
            TouchPhase::Move => {
                self.ctx.record(input);
                self.gesture.touch_move(&mut self.ctx, input);
            }
            TouchPhase::End => {
                self.gesture.touch_end(&mut self.ctx, input);
                self.ctx.forget(input);
            }
            TouchPhase::Cancel => {
                self.gesture.touch_cancel(&mut self.ctx, input);
                self.ctx.forget(input);
            }
        }
        self.flush();
    }

    /// Neutral gesture fields, state back to `Possible`, arena claim dropped.
    /// The touch registry is left alone; it follows the device.
    pub fn reset(&mut self) {
        self.gesture.reset();
        self.ctx.reset();
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.ctx.pending);
        for transition in &pending {
            for listener in self.listeners.iter_mut() {
                listener(transition, &self.gesture);
            }
        }
        if self.ctx.reset_requested {
            self.reset();
        }
    }
}

impl<G: Gesture> Drop for GestureRecognizer<G> {
    fn drop(&mut self) {
        self.ctx.release_claim();
    }
}
