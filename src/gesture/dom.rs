//! Browser wiring: `web_sys::TouchEvent` in, `TouchInput` out.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, TouchEvent, TouchList};

use super::recognizer::{Gesture, GestureRecognizer};
use super::touch::{Touch, TouchInput, TouchPhase};

const TOUCH_EVENTS: [(&str, TouchPhase); 4] = [
    ("touchstart", TouchPhase::Start),
    ("touchmove", TouchPhase::Move),
    ("touchend", TouchPhase::End),
    ("touchcancel", TouchPhase::Cancel),
];

pub fn touches(list: &TouchList) -> Vec<Touch> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Touch::new(t.identifier(), t.screen_x() as f64, t.screen_y() as f64))
        .collect()
}

pub fn touch_input(phase: TouchPhase, e: &TouchEvent) -> TouchInput {
    TouchInput::new(
        phase,
        touches(&e.changed_touches()),
        touches(&e.target_touches()),
    )
}

/// Feeds a surface's touch events into a recognizer for as long as it lives.
/// Dropping the binding removes the listeners.
pub struct TouchBinding {
    target: EventTarget,
    callbacks: Vec<(&'static str, Closure<dyn FnMut(TouchEvent)>)>,
}

impl TouchBinding {
    pub fn attach<G: Gesture + 'static>(
        target: &EventTarget,
        recognizer: Rc<RefCell<GestureRecognizer<G>>>,
    ) -> Self {
        let mut callbacks = Vec::with_capacity(TOUCH_EVENTS.len());
        for (name, phase) in TOUCH_EVENTS {
            let recognizer = recognizer.clone();
            let cb = Closure::wrap(Box::new(move |e: TouchEvent| {
                e.prevent_default();
                let input = touch_input(phase, &e);
                match recognizer.try_borrow_mut() {
                    Ok(mut r) => r.handle(&input),
                    Err(_) => warn!("recognizer busy, dropping {} event", name),
                }
            }) as Box<dyn FnMut(TouchEvent)>);
            let f: &js_sys::Function = cb.as_ref().unchecked_ref();
            if target.add_event_listener_with_callback(name, f).is_err() {
                warn!("failed to register {} listener", name);
            }
            callbacks.push((name, cb));
        }
        Self {
            target: target.clone(),
            callbacks,
        }
    }
}

impl Drop for TouchBinding {
    fn drop(&mut self) {
        for (name, cb) in &self.callbacks {
            let _ = self
                .target
                .remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        }
    }
}
