//! Panels around the viewport

pub mod placement_controls;
pub mod side_panel;
pub mod status_bar;
pub mod toasts;
pub mod toolbar;
