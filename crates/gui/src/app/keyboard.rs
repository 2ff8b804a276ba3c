//! Keyboard shortcut handling

use eframe::egui;

use crate::input::EditorKey;
use crate::state::EditorState;

/// Forward key presses to the editor
pub fn handle_keyboard(ctx: &egui::Context, state: &mut EditorState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let keys: Vec<EditorKey> = ctx.input(|i| {
        if i.modifiers.command || i.modifiers.alt {
            return Vec::new();
        }
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    ..
                } => editor_key(*key),
                _ => None,
            })
            .collect()
    });

    for key in keys {
        let result = state.handle_key(key);
        state.run(result);
    }
}

fn editor_key(key: egui::Key) -> Option<EditorKey> {
    use egui::Key;
    let mapped = match key {
        Key::Escape => EditorKey::Escape,
        Key::Enter => EditorKey::Enter,
        Key::Delete => EditorKey::Delete,
        Key::Backspace => EditorKey::Backspace,
        Key::ArrowUp => EditorKey::ArrowUp,
        Key::ArrowDown => EditorKey::ArrowDown,
        Key::ArrowLeft => EditorKey::ArrowLeft,
        Key::ArrowRight => EditorKey::ArrowRight,
        Key::PageUp => EditorKey::PageUp,
        Key::PageDown => EditorKey::PageDown,
        Key::W => EditorKey::Char('w'),
        Key::A => EditorKey::Char('a'),
        Key::S => EditorKey::Char('s'),
        Key::D => EditorKey::Char('d'),
        Key::Q => EditorKey::Char('q'),
        Key::E => EditorKey::Char('e'),
        Key::M => EditorKey::Char('m'),
        Key::R => EditorKey::Char('r'),
        _ => return None,
    };
    Some(mapped)
}
