use pinch_zoom::gesture::GestureState;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GesturePanelProps {
    pub state: GestureState,
    pub scale: f64,
    pub zoom: f64,
    pub threshold: f64,
}

fn state_color(state: GestureState) -> &'static str {
    match state {
        GestureState::Began | GestureState::Changed => "#2ea043",
        GestureState::Cancelled | GestureState::Failed => "#f85149",
        GestureState::Ended => "#58a6ff",
        GestureState::Possible => "#8b949e",
    }
}

#[function_component]
pub fn GesturePanel(props: &GesturePanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:absolute; top:48px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:200px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={label_style}>{"Pinch"}</span>
                <span style={format!("{} color:{};", value_style, state_color(props.state))}>{ props.state.label() }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Scale"}</span>
                <span style={value_style}>{ format!("{:.2}×", props.scale) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Zoom"}</span>
                <span style={value_style}>{ format!("{:.2}×", props.zoom) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} opacity:0.7;", label_style)}>{"Threshold"}</span>
                <span style={format!("{} opacity:0.7;", value_style)}>{ format!("{:.0}px", props.threshold) }</span>
            </div>
        </div>
    }
}
