//! Long-press context menu state

use serde::{Deserialize, Serialize};
use shared::ElementId;

/// Gap kept between the menu and the viewport border (px)
pub const MENU_MARGIN_PX: f32 = 10.0;

/// Actions offered by the element context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextAction {
    Rotate,
    Move,
    Duplicate,
    Delete,
}

impl ContextAction {
    pub const ALL: [ContextAction; 4] = [
        ContextAction::Rotate,
        ContextAction::Move,
        ContextAction::Duplicate,
        ContextAction::Delete,
    ];
}

/// Open menu: target element and anchor in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub target: ElementId,
    pub anchor: [f32; 2],
}

/// Keep a menu of `menu_size` anchored at `anchor` inside `viewport_size`,
/// `MENU_MARGIN_PX` away from every border.
pub fn clamp_menu_position(anchor: [f32; 2], menu_size: [f32; 2], viewport_size: [f32; 2]) -> [f32; 2] {
    let clamp_axis = |pos: f32, size: f32, limit: f32| {
        let mut p = pos;
        if p + size > limit - MENU_MARGIN_PX {
            p = limit - size - MENU_MARGIN_PX;
        }
        p.max(MENU_MARGIN_PX)
    };
    [
        clamp_axis(anchor[0], menu_size[0], viewport_size[0]),
        clamp_axis(anchor[1], menu_size[1], viewport_size[1]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside() {
        assert_eq!(clamp_menu_position([50.0, 60.0], [100.0, 80.0], [800.0, 600.0]), [50.0, 60.0]);
    }

    #[test]
    fn test_clamp_right_bottom() {
        assert_eq!(
            clamp_menu_position([780.0, 590.0], [100.0, 80.0], [800.0, 600.0]),
            [690.0, 510.0]
        );
    }

    #[test]
    fn test_clamp_top_left() {
        assert_eq!(clamp_menu_position([2.0, -5.0], [100.0, 80.0], [800.0, 600.0]), [10.0, 10.0]);
    }
}
