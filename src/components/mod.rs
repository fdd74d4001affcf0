pub mod app;
pub mod camera_controls;
pub mod gesture_panel;
pub mod pinch_view;
pub mod settings_modal;
