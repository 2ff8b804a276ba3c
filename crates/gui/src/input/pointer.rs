//! Pointer gesture tracking: click, drag and long press.
//!
//! Times are seconds on a monotonic clock (egui's `input.time`), positions
//! are screen pixels.

use shared::ElementId;

/// How a press ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRelease {
    /// Short press without significant movement
    Click { pos: [f32; 2] },
    /// Pointer moved past the drag threshold (orbit, not a click)
    Drag,
    /// The long press already fired; the release does nothing
    AfterLongPress,
    /// Held past the threshold without a long press target
    Held,
}

/// Long press that should open the context menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPress {
    pub target: ElementId,
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, Copy)]
struct Press {
    session: u64,
    start_time: f64,
    start_pos: [f32; 2],
    dragging: bool,
    /// Element under the pointer at press time (select tool only)
    long_press_target: Option<ElementId>,
    long_press_fired: bool,
}

/// Tracks one press at a time. Every `down` opens a new session and
/// invalidates the pending long press of the previous one.
#[derive(Debug)]
pub struct PointerTracker {
    long_press_secs: f64,
    drag_threshold_px: f32,
    session: u64,
    press: Option<Press>,
}

impl PointerTracker {
    pub fn new(long_press_ms: u64, drag_threshold_px: f32) -> Self {
        Self {
            long_press_secs: long_press_ms as f64 / 1000.0,
            drag_threshold_px,
            session: 0,
            press: None,
        }
    }

    /// Current session id (increments on every press)
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging)
    }

    /// Pointer pressed. `long_press_target` arms the long press timer.
    pub fn down(&mut self, pos: [f32; 2], time: f64, long_press_target: Option<ElementId>) -> u64 {
        self.session += 1;
        self.press = Some(Press {
            session: self.session,
            start_time: time,
            start_pos: pos,
            dragging: false,
            long_press_target,
            long_press_fired: false,
        });
        self.session
    }

    /// Pointer moved while pressed; returns true when this move starts a drag
    pub fn moved(&mut self, pos: [f32; 2]) -> bool {
        let threshold = self.drag_threshold_px;
        match self.press.as_mut() {
            Some(press) if !press.dragging && !press.long_press_fired => {
                if distance(press.start_pos, pos) >= threshold {
                    press.dragging = true;
                    press.long_press_target = None;
                    tracing::debug!("Drag started (session {})", press.session);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Fire the pending long press once its deadline has passed
    pub fn poll(&mut self, now: f64) -> Option<LongPress> {
        let deadline = self.long_press_secs;
        let press = self.press.as_mut()?;
        if press.dragging || press.long_press_fired {
            return None;
        }
        let target = press.long_press_target?;
        if now - press.start_time >= deadline {
            press.long_press_fired = true;
            tracing::debug!("Long press on element {} (session {})", target, press.session);
            return Some(LongPress {
                target,
                pos: press.start_pos,
            });
        }
        None
    }

    /// Pointer released; closes the session
    pub fn up(&mut self, pos: [f32; 2], time: f64) -> Option<PointerRelease> {
        let press = self.press.take()?;
        if press.long_press_fired {
            return Some(PointerRelease::AfterLongPress);
        }
        Some(classify(
            pos,
            time - press.start_time,
            distance(press.start_pos, pos),
            self.long_press_secs,
            self.drag_threshold_px,
            press.dragging,
        ))
    }

    /// Drop the current press without classifying it
    pub fn cancel(&mut self) {
        self.press = None;
    }
}

/// Click/drag classification from elapsed time and displacement
pub fn classify(
    pos: [f32; 2],
    elapsed_secs: f64,
    displacement_px: f32,
    long_press_secs: f64,
    drag_threshold_px: f32,
    dragged: bool,
) -> PointerRelease {
    if dragged || displacement_px >= drag_threshold_px {
        PointerRelease::Drag
    } else if elapsed_secs >= long_press_secs {
        PointerRelease::Held
    } else {
        PointerRelease::Click { pos }
    }
}

fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}
