mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::i18n`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use assise_gui_lib::error;
pub use assise_gui_lib::i18n;
pub use assise_gui_lib::input;
pub use assise_gui_lib::state;

use app::AssiseApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assise_gui=info,assise_gui_lib=info".into()),
        )
        .init();

    // Parse --layout <path> argument
    let initial_layout = parse_layout_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Assise - Maquette 3D")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "assise-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(AssiseApp::new(cc, initial_layout)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_layout_arg() -> Option<shared::LayoutDocument> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--layout" && i + 1 < args.len() {
            let path = std::path::Path::new(&args[i + 1]);
            match state::read_layout(path) {
                Ok(doc) => {
                    tracing::info!(
                        "Loaded layout from {} ({} elements)",
                        path.display(),
                        doc.placed_elements.len()
                    );
                    return Some(doc);
                }
                Err(e) => tracing::error!("Failed to load layout: {e}"),
            }
            break;
        }
        i += 1;
    }
    None
}
