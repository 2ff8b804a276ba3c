use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod dimensions;
pub mod layout;

pub use catalog::{Catalog, CatalogEntry};
pub use dimensions::{evaluate_dimension, DimensionError};
pub use layout::{LayoutDocument, PlacedElementRecord};

/// Identifier of a placed element (monotonic, never reused)
pub type ElementId = u64;

/// Catalog key of an element type ("M50", "B14", ...)
pub type TypeId = String;

/// Type id stored for elements with user-defined dimensions
pub const CUSTOM_TYPE_ID: &str = "CUSTOM";

/// Id of the free placement course
pub const POSE_LIBRE_ID: &str = "pose-libre";

/// Display name of the free placement course
pub const POSE_LIBRE_NAME: &str = "Pose Libre";

/// Default name for custom elements
pub const DEFAULT_CUSTOM_NAME: &str = "Personnalisé";

/// Tolerance (cm) used for dimension and course height comparisons
pub const DIMENSION_TOLERANCE: f64 = 0.01;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Build from a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

/// Color used for custom elements
pub const DEFAULT_CUSTOM_COLOR: Rgb = Rgb::from_hex(0xAAAAAA);

/// Box dimensions in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn from_array(dims: [f64; 3]) -> Self {
        Self::new(dims[0], dims[1], dims[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }

    /// All three sides finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.to_array().iter().all(|d| d.is_finite() && *d > 0.0)
    }

    /// Component-wise comparison within `DIMENSION_TOLERANCE`
    pub fn approx_eq(&self, other: &Dimensions) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() < DIMENSION_TOLERANCE)
    }
}

/// Element type definition: a catalog entry or a custom dimension set
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTypeDef {
    pub name: String,
    pub dimensions: Dimensions,
    pub color: Rgb,
    pub is_custom: bool,
    /// Catalog key this definition was derived from (duplicate/move of a placed element)
    pub origin_type_id: Option<TypeId>,
}

impl ElementTypeDef {
    pub fn custom(name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            dimensions,
            color: DEFAULT_CUSTOM_COLOR,
            is_custom: true,
            origin_type_id: None,
        }
    }

    /// First word of the name ("Brique M50" -> "Brique")
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// What a placed element is made of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    Catalog { type_id: TypeId },
    Custom { dimensions: Dimensions, name: String },
}

impl ElementKind {
    /// Type id as stored in the layout document
    pub fn type_id(&self) -> &str {
        match self {
            ElementKind::Catalog { type_id } => type_id,
            ElementKind::Custom { .. } => CUSTOM_TYPE_ID,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ElementKind::Custom { .. })
    }
}

/// Pose of a placed element: center position (cm) and rotation around Y (radians)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation_y: f64,
}

impl Transform {
    pub fn new(position: [f64; 3], rotation_y: f64) -> Self {
        Self {
            position,
            rotation_y,
        }
    }
}

/// Element placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub transform: Transform,
}

/// Horizontal course ("assise"); `height == None` is the free placement course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub height: Option<f64>,
}

impl Course {
    pub fn pose_libre() -> Self {
        Self {
            id: POSE_LIBRE_ID.to_string(),
            name: POSE_LIBRE_NAME.to_string(),
            height: None,
        }
    }

    /// Label shown in course selectors: name plus height when defined
    pub fn label(&self) -> String {
        match self.height {
            Some(h) => format!("{} ({h:.1} cm)", self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex(0xCC6633), Rgb(0xCC, 0x66, 0x33));
        assert_eq!(DEFAULT_CUSTOM_COLOR.to_array(), [0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn test_dimensions_validity() {
        assert!(Dimensions::new(19.0, 5.0, 9.0).is_valid());
        assert!(!Dimensions::new(19.0, 0.0, 9.0).is_valid());
        assert!(!Dimensions::new(-1.0, 5.0, 9.0).is_valid());
        assert!(!Dimensions::new(f64::NAN, 5.0, 9.0).is_valid());
    }

    #[test]
    fn test_dimensions_approx_eq() {
        let a = Dimensions::new(19.0, 5.7, 9.0);
        assert!(a.approx_eq(&Dimensions::new(19.005, 5.7, 9.0)));
        assert!(!a.approx_eq(&Dimensions::new(19.02, 5.7, 9.0)));
    }

    #[test]
    fn test_short_name() {
        let def = ElementTypeDef::custom("Brique M50", Dimensions::new(19.0, 5.0, 9.0));
        assert_eq!(def.short_name(), "Brique");
        let empty = ElementTypeDef::custom("", Dimensions::new(1.0, 1.0, 1.0));
        assert_eq!(empty.short_name(), "");
    }

    #[test]
    fn test_kind_type_id() {
        let catalog = ElementKind::Catalog {
            type_id: "M50".into(),
        };
        assert_eq!(catalog.type_id(), "M50");
        let custom = ElementKind::Custom {
            dimensions: Dimensions::new(1.0, 2.0, 3.0),
            name: "x".into(),
        };
        assert_eq!(custom.type_id(), CUSTOM_TYPE_ID);
        assert!(custom.is_custom());
    }

    #[test]
    fn test_course_label() {
        assert_eq!(Course::pose_libre().label(), "Pose Libre");
        let c = Course {
            id: "a".into(),
            name: "Assise 1 (Brique)".into(),
            height: Some(6.2),
        };
        assert_eq!(c.label(), "Assise 1 (Brique) (6.2 cm)");
    }
}
