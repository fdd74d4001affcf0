// Logger setup. Library code only talks to the `log` facade.

/// Route `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn init(level: log::Level) {
    wasm_logger::init(wasm_logger::Config::new(level));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init(_level: log::Level) {}

/// Level used by the demo: verbose in debug builds.
pub fn default_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}
