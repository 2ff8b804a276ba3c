// Library crate: editor core, exposed for integration tests and the command protocol.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod command;
pub mod error;
pub mod harness;
pub mod i18n;
pub mod input;
pub mod snapping;
pub mod state;

/// Ray picking shared by the viewport and the harness.
/// The rest of the viewport (camera, renderer) stays in the binary crate.
pub mod viewport {
    pub mod picking;
}
