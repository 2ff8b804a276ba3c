//! Flat layout document written by "save" and read by "open"/autosave

use serde::{Deserialize, Serialize};

use crate::{
    Course, Dimensions, ElementId, ElementKind, PlacedElement, Transform, CUSTOM_TYPE_ID,
    DEFAULT_CUSTOM_NAME, POSE_LIBRE_ID,
};

fn default_joint() -> f64 {
    1.2
}

fn default_active_course() -> String {
    POSE_LIBRE_ID.to_string()
}

/// Persisted form of a placed element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedElementRecord {
    pub id: ElementId,
    pub type_id: String,
    pub position: [f64; 3],
    #[serde(default)]
    pub rotation_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_dimensions: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}

impl PlacedElementRecord {
    pub fn from_element(element: &PlacedElement) -> Self {
        let (custom_dimensions, custom_name) = match &element.kind {
            ElementKind::Custom { dimensions, name } => {
                (Some(dimensions.to_array()), Some(name.clone()))
            }
            ElementKind::Catalog { .. } => (None, None),
        };
        Self {
            id: element.id,
            type_id: element.kind.type_id().to_string(),
            position: element.transform.position,
            rotation_y: element.transform.rotation_y,
            custom_dimensions,
            custom_name,
        }
    }

    /// Rebuild the tagged element kind; `None` when the custom marker and the
    /// custom dimensions disagree.
    pub fn kind(&self) -> Option<ElementKind> {
        let is_custom = self.type_id.eq_ignore_ascii_case(CUSTOM_TYPE_ID);
        match (is_custom, self.custom_dimensions) {
            (true, Some(dims)) => Some(ElementKind::Custom {
                dimensions: Dimensions::from_array(dims),
                name: self
                    .custom_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CUSTOM_NAME.to_string()),
            }),
            (false, None) => Some(ElementKind::Catalog {
                type_id: self.type_id.clone(),
            }),
            _ => None,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation_y)
    }
}

/// Snapshot of the editor layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    #[serde(default)]
    pub placed_elements: Vec<PlacedElementRecord>,
    #[serde(default)]
    pub next_element_id: ElementId,
    #[serde(default = "default_joint")]
    pub joint_thickness_cm: f64,
    #[serde(default, alias = "assises")]
    pub courses: Vec<Course>,
    #[serde(default = "default_active_course", alias = "activeAssiseId")]
    pub active_course_id: String,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            placed_elements: Vec::new(),
            next_element_id: 0,
            joint_thickness_cm: default_joint(),
            courses: vec![Course::pose_libre()],
            active_course_id: default_active_course(),
        }
    }
}

impl LayoutDocument {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
