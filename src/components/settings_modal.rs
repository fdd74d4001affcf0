use log::warn;
use pinch_zoom::PinchConfig;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub config: PinchConfig,
    pub on_change: Callback<PinchConfig>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let threshold_cb = {
        let cb = props.on_change.clone();
        let config = props.config;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Ok(value) = input.value().trim().parse::<f64>() else {
                warn!("ignoring non-numeric threshold {:?}", input.value());
                return;
            };
            match config.with_threshold(value) {
                Ok(next) => cb.emit(next),
                Err(err) => warn!("{}", err),
            }
        })
    };
    let defaults_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(PinchConfig::default()))
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px;">
                    <span style="flex:1;">{"Pinch threshold (px)"}</span>
                    <input type="number" min="0" step="1" style="width:80px;"
                        value={props.config.threshold.to_string()} onchange={threshold_cb} />
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={defaults_cb} style="flex:1;">{"Restore Defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"A pinch begins once the finger separation changes by more than the threshold."}</div>
        </div>
    </div>}
}
