//! Layout snapshot/restore, autosave and layout files

use std::path::{Path, PathBuf};

use shared::{ElementId, ElementKind, LayoutDocument, PlacedElement, PlacedElementRecord};

use super::{settings, EditorState, Tool};
use crate::error::{EditorError, EditorResult};

impl EditorState {
    /// Serializable copy of the current layout
    pub fn snapshot(&self) -> LayoutDocument {
        LayoutDocument {
            placed_elements: self
                .elements
                .elements()
                .iter()
                .map(PlacedElementRecord::from_element)
                .collect(),
            next_element_id: self.elements.next_id(),
            joint_thickness_cm: self.joint_thickness,
            courses: self.courses.courses().to_vec(),
            active_course_id: self.courses.active_id().to_string(),
        }
    }

    /// Replace the layout with a document. Records that would not pass
    /// placement validation are skipped. Returns the number of elements kept.
    pub fn restore(&mut self, doc: LayoutDocument) -> EditorResult<usize> {
        self.abort_in_flight();
        self.close_context_menu();
        self.selection.clear();
        self.switch_tool(Tool::Select);

        self.elements.reset(doc.next_element_id);
        let total = doc.placed_elements.len();
        for record in &doc.placed_elements {
            match self.validate_record(record) {
                Ok(element) => self.elements.insert(element),
                Err(e) => tracing::warn!("Skipping element {}: {}", record.id, e),
            }
        }

        if doc.joint_thickness_cm.is_finite() && doc.joint_thickness_cm >= 0.0 {
            self.joint_thickness = doc.joint_thickness_cm;
        } else {
            tracing::warn!(
                "Invalid joint thickness {} in layout, keeping {}",
                doc.joint_thickness_cm,
                self.joint_thickness
            );
        }
        self.joint_version += 1;
        self.courses.restore(doc.courses, &doc.active_course_id);
        self.touch();

        let kept = self.elements.len();
        tracing::info!(
            "Restored layout: {}/{} elements, {} courses",
            kept,
            total,
            self.courses.real_course_count()
        );
        Ok(kept)
    }

    /// Empty layout with default joint and Pose Libre only
    pub fn new_layout(&mut self) {
        let doc = LayoutDocument {
            joint_thickness_cm: self.settings.placement.default_joint_cm,
            ..LayoutDocument::default()
        };
        if let Err(e) = self.restore(doc) {
            tracing::error!("Failed to reset layout: {}", e);
        }
    }

    fn validate_record(&self, record: &PlacedElementRecord) -> EditorResult<PlacedElement> {
        let kind = record.kind().ok_or_else(|| {
            EditorError::InvalidType(format!("inconsistent custom data for '{}'", record.type_id))
        })?;
        match &kind {
            ElementKind::Catalog { type_id } if !self.catalog.contains(type_id) => {
                return Err(EditorError::InvalidType(format!("unknown type '{}'", type_id)));
            }
            ElementKind::Custom { dimensions, .. } if !dimensions.is_valid() => {
                return Err(EditorError::InvalidType("invalid custom dimensions".into()));
            }
            _ => {}
        }
        let transform = record.transform();
        if !transform.position.iter().all(|v| v.is_finite()) || !transform.rotation_y.is_finite() {
            return Err(EditorError::InvalidInput("non-finite pose".into()));
        }
        if record.id == ElementId::MAX {
            return Err(EditorError::InvalidInput(format!("id {} out of range", record.id)));
        }
        if self.elements.contains(record.id) {
            return Err(EditorError::InvalidInput(format!("duplicate id {}", record.id)));
        }
        Ok(PlacedElement {
            id: record.id,
            kind,
            transform,
        })
    }

    // ── Files ───────────────────────────────────────────────

    /// Write the layout as pretty JSON
    pub fn save_layout(&self, path: &Path) -> EditorResult<()> {
        let json = self
            .snapshot()
            .to_json()
            .map_err(|e| EditorError::Io(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| EditorError::Io(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, json).map_err(|e| EditorError::Io(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Saved layout to {}", path.display());
        Ok(())
    }

    /// Read a layout file and restore it
    pub fn load_layout(&mut self, path: &Path) -> EditorResult<usize> {
        let doc = read_layout(path)?;
        let kept = self.restore(doc)?;
        tracing::info!("Loaded layout from {}", path.display());
        Ok(kept)
    }

    // ── Autosave ────────────────────────────────────────────

    fn autosave_path() -> Option<PathBuf> {
        settings::project_dirs().map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save the layout to the autosave file
    pub fn autosave(&self) {
        if let Some(path) = Self::autosave_path() {
            if let Err(e) = self.save_layout(&path) {
                tracing::error!("Autosave failed: {}", e);
            }
        }
    }

    /// Read the autosave file, if any
    pub fn load_autosave() -> Option<LayoutDocument> {
        let path = Self::autosave_path()?;
        if !path.exists() {
            return None;
        }
        match read_layout(&path) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!("Ignoring autosave: {}", e);
                None
            }
        }
    }
}

/// Parse a layout file
pub fn read_layout(path: &Path) -> EditorResult<LayoutDocument> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| EditorError::Io(format!("{}: {}", path.display(), e)))?;
    LayoutDocument::from_json(&json).map_err(|e| EditorError::Io(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Mode, ToolKind};
    use crate::viewport::picking::Intersection;

    fn state_with_two() -> EditorState {
        let mut state = EditorState::default();
        state.create_course().unwrap();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap();
        state.confirm_add().unwrap();
        state.choose_type(shared::CUSTOM_TYPE_ID).unwrap();
        state.handle_click(&[Intersection::ground(40.0, 0.0)]).unwrap();
        state.confirm_add().unwrap();
        state
    }

    #[test]
    fn test_snapshot_restore_preserves_layout() {
        let state = state_with_two();
        let doc = state.snapshot();
        let json = doc.to_json().unwrap();

        let mut other = EditorState::default();
        let kept = other.restore(LayoutDocument::from_json(&json).unwrap()).unwrap();
        assert_eq!(kept, 2);
        assert_eq!(other.elements(), state.elements());
        assert_eq!(other.next_id(), state.next_id());
        assert_eq!(other.courses().courses(), state.courses().courses());
        assert_eq!(other.courses().active_id(), state.courses().active_id());
        assert_eq!(other.mode(), Mode::Select);
    }

    #[test]
    fn test_restore_skips_invalid_records() {
        let mut doc = state_with_two().snapshot();
        doc.placed_elements[0].type_id = "NOPE".into();
        doc.placed_elements[1].custom_dimensions = Some([0.0, 1.0, 1.0]);
        doc.next_element_id = 0;

        let mut state = EditorState::default();
        assert_eq!(state.restore(doc).unwrap(), 0);
        assert_eq!(state.element_count(), 0);
    }

    #[test]
    fn test_restore_next_id_covers_records() {
        let mut doc = state_with_two().snapshot();
        doc.next_element_id = 0;
        let mut state = EditorState::default();
        state.restore(doc).unwrap();
        let max = state.elements().iter().map(|e| e.id).max().unwrap();
        assert!(state.next_id() > max);
    }

    #[test]
    fn test_restore_never_reuses_last_id() {
        let json = format!(
            r#"{{"placedElements": [{{"id": {}, "typeId": "M50", "position": [0, 3.7, 0], "rotationY": 0}}]}}"#,
            ElementId::MAX
        );
        let mut state = EditorState::default();
        assert_eq!(state.restore(LayoutDocument::from_json(&json).unwrap()).unwrap(), 0);

        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap();
        let id = state.confirm_add().unwrap();
        assert_ne!(id, ElementId::MAX);

        let mut doc = state.snapshot();
        doc.next_element_id = ElementId::MAX;
        state.restore(doc).unwrap();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(40.0, 0.0)]).unwrap();
        assert!(state.confirm_add().is_err());
        let ids: Vec<_> = state.elements().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![id]);
    }

    #[test]
    fn test_restore_accepts_legacy_course_keys() {
        let json = r#"{
            "placedElements": [{"id": 4, "typeId": "M50", "position": [0, 2.5, 0], "rotationY": 0}],
            "nextElementId": 5,
            "assises": [{"id": "a1", "name": "Assise 1 (Brique)", "height": 6.2}],
            "activeAssiseId": "a1"
        }"#;
        let mut state = EditorState::default();
        state.restore(LayoutDocument::from_json(json).unwrap()).unwrap();
        assert_eq!(state.courses().active_height(), Some(6.2));
        assert_eq!(state.next_id(), 5);
        assert_eq!(state.joint_thickness(), 1.2);
    }

    #[test]
    fn test_new_layout_resets() {
        let mut state = state_with_two();
        state.new_layout();
        assert_eq!(state.element_count(), 0);
        assert_eq!(state.courses().real_course_count(), 0);
        assert_eq!(state.courses().active_height(), None);
    }

    #[test]
    fn test_file_roundtrip_and_errors() {
        let dir = std::env::temp_dir().join(format!("assise-test-{}", uuid::Uuid::new_v4()));
        let path = dir.join("layout.json");
        let state = state_with_two();
        state.save_layout(&path).unwrap();

        let mut loaded = EditorState::default();
        assert_eq!(loaded.load_layout(&path).unwrap(), 2);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(loaded.load_layout(&path), Err(EditorError::Io(_))));
        assert_eq!(loaded.element_count(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
