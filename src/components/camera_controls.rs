use pinch_zoom::state::camera::{can_zoom_in, can_zoom_out, zoom_percent};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub zoom: f64,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset: Callback<()>,
}

fn emit_on_click(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_: MouseEvent| cb.emit(()))
}

/// Zoom stepper. The buttons grey out at the camera's zoom limits.
#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let reset_style = if zoom_percent(props.zoom) == 100 { "opacity:0.6;" } else { "" };
    html! {<div style="position:absolute; left:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
        <button disabled={!can_zoom_out(props.zoom)} onclick={emit_on_click(&props.on_zoom_out)}>
            {"-"}
        </button>
        <span style="min-width:48px; text-align:center; font-variant-numeric:tabular-nums;">
            { format!("{}%", zoom_percent(props.zoom)) }
        </span>
        <button disabled={!can_zoom_in(props.zoom)} onclick={emit_on_click(&props.on_zoom_in)}>
            {"+"}
        </button>
        <button style={reset_style} onclick={emit_on_click(&props.on_reset)}>
            {"Reset View"}
        </button>
    </div>}
}
