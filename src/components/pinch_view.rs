use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use pinch_zoom::gesture::{
    GestureRecognizer, GestureState, PinchGesture, PinchRecognizer, TouchBinding,
};
use pinch_zoom::state::Camera;
use pinch_zoom::PinchConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, HtmlElement};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use super::gesture_panel::GesturePanel;
use super::settings_modal::SettingsModal;

const GRID_CELLS: u32 = 24;
const CELL_PX: f64 = 32.0;
const BUTTON_ZOOM_STEP: f64 = 1.25;

#[derive(Properties, PartialEq, Clone)]
pub struct PinchViewProps {
    pub config: PinchConfig,
    pub on_config: Callback<PinchConfig>,
}

fn canvas_center(canvas: &HtmlCanvasElement) -> (f64, f64) {
    (canvas.width() as f64 * 0.5, canvas.height() as f64 * 0.5)
}

#[function_component(PinchView)]
pub fn pinch_view(props: &PinchViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let readout = use_state(|| (GestureState::Possible, 1.0_f64));
    let zoom = use_state(|| Camera::default().zoom);
    let open_settings = use_state(|| false);

    // Rebuild recognizer and touch binding whenever the config changes
    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let draw_ref = draw_ref.clone();
        let readout = readout.clone();
        let zoom = zoom.clone();
        use_effect_with(props.config, move |config| {
            let config = *config;
            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let mut attached = None;
            if let (Some(window), Some(canvas)) = (window, canvas) {
                let compute_and_apply_canvas_size = {
                    let canvas = canvas.clone();
                    let window = window.clone();
                    move || {
                        let nav_height: f64 = window
                            .document()
                            .and_then(|d| d.get_element_by_id("top-bar"))
                            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                            .map(|el| el.client_height() as f64)
                            .unwrap_or(0.0);
                        let width = window
                            .inner_width()
                            .ok()
                            .and_then(|v| v.as_f64())
                            .unwrap_or(800.0);
                        let height = window
                            .inner_height()
                            .ok()
                            .and_then(|v| v.as_f64())
                            .unwrap_or(600.0)
                            - nav_height;
                        canvas.set_width(width.max(0.0) as u32);
                        canvas.set_height(height.max(0.0) as u32);
                    }
                };
                compute_and_apply_canvas_size();

                {
                    let mut cam = camera.borrow_mut();
                    if !cam.initialized {
                        let half = GRID_CELLS as f64 * CELL_PX * 0.5;
                        cam.center_on(half, half, canvas.width() as f64, canvas.height() as f64);
                    }
                }

                let draw: Rc<dyn Fn()> = {
                    let canvas = canvas.clone();
                    let camera = camera.clone();
                    Rc::new(move || {
                        if !canvas.is_connected() {
                            return;
                        }
                        let ctx = match canvas
                            .get_context("2d")
                            .ok()
                            .flatten()
                            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                        {
                            Some(c) => c,
                            None => return,
                        };
                        let w = canvas.width() as f64;
                        let h = canvas.height() as f64;
                        let cam = camera.borrow();
                        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
                        ctx.set_fill_style_str("#0e1116");
                        ctx.fill_rect(0.0, 0.0, w, h);
                        ctx.set_transform(cam.zoom, 0.0, 0.0, cam.zoom, cam.offset_x, cam.offset_y)
                            .ok();
                        for y in 0..GRID_CELLS {
                            for x in 0..GRID_CELLS {
                                let fill = if (x + y) % 2 == 0 { "#161b22" } else { "#1d2430" };
                                ctx.set_fill_style_str(fill);
                                let (px, py) = (x as f64 * CELL_PX, y as f64 * CELL_PX);
                                ctx.fill_rect(px, py, CELL_PX, CELL_PX);
                            }
                        }
                        let extent = GRID_CELLS as f64 * CELL_PX;
                        ctx.set_stroke_style_str("#2f3641");
                        ctx.set_line_width((1.0 / cam.zoom).max(0.001));
                        ctx.stroke_rect(0.0, 0.0, extent, extent);
                        ctx.begin_path();
                        ctx.set_fill_style_str("#58a6ff");
                        let mid = extent * 0.5;
                        ctx.arc(mid, mid, CELL_PX * 0.4, 0.0, std::f64::consts::TAU).ok();
                        ctx.fill();
                    })
                };
                *draw_ref.borrow_mut() = Some(draw.clone());
                draw();

                let mut recognizer = match PinchRecognizer::pinch(&config) {
                    Ok(r) => r,
                    Err(err) => {
                        warn!("{}, using the default threshold", err);
                        GestureRecognizer::new(PinchGesture::default())
                    }
                };
                {
                    let camera = camera.clone();
                    let canvas = canvas.clone();
                    let draw = draw.clone();
                    let readout = readout.clone();
                    let zoom = zoom.clone();
                    recognizer.add_listener(move |t, pinch: &PinchGesture| {
                        let (ax, ay) = canvas_center(&canvas);
                        let mut cam = camera.borrow_mut();
                        cam.apply_pinch(t.state, pinch.scale(), ax, ay);
                        zoom.set(cam.zoom);
                        drop(cam);
                        readout.set((t.state, pinch.scale()));
                        draw();
                    });
                }
                let recognizer = Rc::new(RefCell::new(recognizer));
                let target: &EventTarget = canvas.as_ref();
                let binding = TouchBinding::attach(target, recognizer);
                debug!("pinch recognizer attached, threshold {}", config.threshold);

                let resize_cb = {
                    let draw = draw.clone();
                    Closure::wrap(Box::new(move |_e: web_sys::Event| {
                        compute_and_apply_canvas_size();
                        draw();
                    }) as Box<dyn FnMut(_)>)
                };
                if window
                    .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                    .is_err()
                {
                    warn!("failed to register resize listener");
                }
                attached = Some((window, binding, resize_cb));
            } else {
                warn!("pinch view mounted without a window or canvas");
            }
            // Cleanup
            move || {
                if let Some((window, binding, resize_cb)) = attached {
                    let _ = window.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                    drop(binding);
                }
            }
        });
    }

    let zoom_by = {
        let camera = camera.clone();
        let canvas_ref = canvas_ref.clone();
        let draw_ref = draw_ref.clone();
        let zoom = zoom.clone();
        move |factor: f64| {
            let camera = camera.clone();
            let canvas_ref = canvas_ref.clone();
            let draw_ref = draw_ref.clone();
            let zoom = zoom.clone();
            Callback::from(move |_: ()| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    let (ax, ay) = canvas_center(&canvas);
                    let mut cam = camera.borrow_mut();
                    let next = cam.zoom * factor;
                    cam.zoom_about(next, ax, ay);
                    zoom.set(cam.zoom);
                }
                if let Some(f) = &*draw_ref.borrow() {
                    f();
                }
            })
        }
    };
    let on_reset = {
        let camera = camera.clone();
        let canvas_ref = canvas_ref.clone();
        let draw_ref = draw_ref.clone();
        let zoom = zoom.clone();
        Callback::from(move |_: ()| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let half = GRID_CELLS as f64 * CELL_PX * 0.5;
                let mut cam = camera.borrow_mut();
                cam.zoom = 1.0;
                cam.center_on(half, half, canvas.width() as f64, canvas.height() as f64);
                zoom.set(cam.zoom);
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };

    let toggle_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: MouseEvent| open_settings.set(!*open_settings))
    };
    let close_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: ()| open_settings.set(false))
    };

    let (state, scale) = *readout;
    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden;">
            <div id="top-bar" style="display:flex; justify-content:space-between; align-items:center; padding:6px 12px; background:#161b22; border-bottom:1px solid #30363d;">
                <span style="font-weight:600;">{"Pinch Zoom"}</span>
                <button onclick={toggle_settings}>{"Settings"}</button>
            </div>
            <canvas ref={canvas_ref} style="display:block; touch-action:none;"></canvas>
            <GesturePanel
                state={state}
                scale={scale}
                zoom={*zoom}
                threshold={props.config.threshold}
            />
            <CameraControls
                zoom={*zoom}
                on_zoom_in={zoom_by(BUTTON_ZOOM_STEP)}
                on_zoom_out={zoom_by(1.0 / BUTTON_ZOOM_STEP)}
                on_reset={on_reset}
            />
            <SettingsModal
                show={*open_settings}
                on_close={close_settings}
                config={props.config}
                on_change={props.on_config.clone()}
            />
        </div>
    }
}
