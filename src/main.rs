mod components;

use components::app::App;

fn main() {
    pinch_zoom::logging::init(pinch_zoom::logging::default_level());
    yew::Renderer::<App>::new().render();
}
