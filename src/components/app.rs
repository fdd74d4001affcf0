use super::pinch_view::PinchView;
use log::{info, warn};
use pinch_zoom::config::STORAGE_KEY;
use pinch_zoom::PinchConfig;
use yew::prelude::*;

fn load_config() -> PinchConfig {
    let raw = web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
    match raw.map(|raw| PinchConfig::from_json(&raw)) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            warn!("stored pinch config unusable, using defaults: {}", err);
            PinchConfig::default()
        }
        None => PinchConfig::default(),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(load_config);

    // Persist config changes
    {
        let config = config.clone();
        use_effect_with(*config, move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    match config.to_json() {
                        Ok(s) => {
                            let _ = store.set_item(STORAGE_KEY, &s);
                        }
                        Err(err) => warn!("{}", err),
                    }
                }
            }
            || ()
        });
    }

    let on_config = {
        let config = config.clone();
        Callback::from(move |next: PinchConfig| {
            info!("pinch config: threshold {}", next.threshold);
            config.set(next);
        })
    };

    html! { <PinchView config={*config} on_config={on_config} /> }
}
