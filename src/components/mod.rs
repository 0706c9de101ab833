pub mod answer_panel;
pub mod app;
pub mod settings_modal;
pub mod slide_controls;
pub mod start_overlay;
pub mod station_map;
pub mod yes_no_prompt;
