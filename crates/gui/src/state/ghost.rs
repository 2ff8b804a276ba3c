//! Placement preview ("ghost")

use glam::DVec3;
use shared::{Dimensions, ElementTypeDef, Rgb, Transform};

/// Tint of the ghost while adding a new element
pub const ADD_GHOST_COLOR: Rgb = Rgb::from_hex(0x00FF00);

/// The single translucent preview box.
///
/// Overwritten by every preview; never persisted.
#[derive(Debug, Clone, Default)]
pub struct Ghost {
    def: Option<ElementTypeDef>,
    color: Option<Rgb>,
    position: DVec3,
    rotation_y: f64,
    visible: bool,
}

impl Ghost {
    /// Take a new type and pose and become visible
    pub fn show(&mut self, def: ElementTypeDef, color: Rgb, position: DVec3, rotation_y: f64) {
        self.def = Some(def);
        self.color = Some(color);
        self.position = position;
        self.rotation_y = rotation_y;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn def(&self) -> Option<&ElementTypeDef> {
        self.def.as_ref()
    }

    pub fn dimensions(&self) -> Option<&Dimensions> {
        self.def.as_ref().map(|d| &d.dimensions)
    }

    pub fn color(&self) -> Rgb {
        self.color.unwrap_or(ADD_GHOST_COLOR)
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    pub fn set_rotation_y(&mut self, rotation_y: f64) {
        self.rotation_y = rotation_y;
    }

    /// Bottom face Y of the ghost box
    pub fn bottom_y(&self) -> Option<f64> {
        self.dimensions().map(|d| self.position.y - d.height / 2.0)
    }

    /// Ghost pose as an element transform
    pub fn transform(&self) -> Transform {
        Transform::new(self.position.to_array(), self.rotation_y)
    }
}
