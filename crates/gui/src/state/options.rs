//! Side-panel options: element type, joint thickness, courses

use super::EditorState;
use crate::error::{EditorError, EditorResult};

impl EditorState {
    fn require_unlocked(&self, action: &str) -> EditorResult<()> {
        if self.inputs_locked() {
            tracing::warn!("{} ignored: inputs are locked", action);
            return Err(EditorError::InvalidState(format!(
                "{}: not available while placing",
                action
            )));
        }
        Ok(())
    }

    /// Choose the element type used by the add tool ("CUSTOM" or a catalog id)
    pub fn choose_type(&mut self, id: &str) -> EditorResult<()> {
        self.require_unlocked("choose type")?;
        if id != shared::CUSTOM_TYPE_ID && !self.catalog.contains(id) {
            return Err(EditorError::InvalidType(format!("unknown type '{}'", id)));
        }
        if self.type_choice.selected_id != id {
            tracing::info!("Element type: {}", id);
            self.type_choice.selected_id = id.to_string();
            self.touch();
        }
        Ok(())
    }

    /// Set the joint thickness (cm). Rejected values keep the previous one.
    pub fn set_joint_thickness(&mut self, value: f64) -> EditorResult<()> {
        self.require_unlocked("joint thickness")?;
        if !value.is_finite() || value < 0.0 {
            return Err(EditorError::InvalidInput(format!(
                "joint thickness must be a number >= 0, got {}",
                value
            )));
        }
        if value != self.joint_thickness {
            tracing::info!("Joint thickness: {} cm", value);
            self.joint_thickness = value;
            self.joint_version += 1;
            self.touch();
        }
        Ok(())
    }

    /// Create a course from the add type's height plus the joint; the new
    /// course becomes active. Returns its id.
    pub fn create_course(&mut self) -> EditorResult<String> {
        self.require_unlocked("create course")?;
        let def = self.type_for_add()?;
        let course = self
            .courses
            .create_course(def.dimensions.height, self.joint_thickness, &def.name)?;
        Ok(course.id.clone())
    }

    /// Activate a course by id
    pub fn select_course(&mut self, id: &str) -> EditorResult<()> {
        self.require_unlocked("select course")?;
        self.courses.select_course(id);
        Ok(())
    }
}
