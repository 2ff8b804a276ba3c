//! Element type chosen in the side panel

use shared::{
    evaluate_dimension, Catalog, Dimensions, ElementTypeDef, TypeId, CUSTOM_TYPE_ID,
    DEFAULT_CUSTOM_NAME,
};

use crate::error::{EditorError, EditorResult};

/// Raw text of the custom element inputs
#[derive(Debug, Clone, PartialEq)]
pub struct CustomInputs {
    pub name: String,
    pub width: String,
    pub height: String,
    pub depth: String,
}

impl Default for CustomInputs {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: "20".into(),
            height: "10".into(),
            depth: "10".into(),
        }
    }
}

impl CustomInputs {
    /// Evaluate the inputs into a custom type definition
    pub fn to_type_def(&self) -> EditorResult<ElementTypeDef> {
        let read = |label: &str, text: &str| {
            evaluate_dimension(text)
                .map_err(|e| EditorError::InvalidInput(format!("{}: {}", label, e)))
        };
        let dimensions = Dimensions::new(
            read("width", &self.width)?,
            read("height", &self.height)?,
            read("depth", &self.depth)?,
        );
        let name = match self.name.trim() {
            "" => DEFAULT_CUSTOM_NAME,
            n => n,
        };
        Ok(ElementTypeDef::custom(name, dimensions))
    }
}

/// Catalog key or "custom" plus the custom inputs
#[derive(Debug, Clone, PartialEq)]
pub struct TypeChoice {
    pub selected_id: TypeId,
    pub custom: CustomInputs,
}

impl TypeChoice {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            selected_id: catalog.first_id().unwrap_or(CUSTOM_TYPE_ID).to_string(),
            custom: CustomInputs::default(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.selected_id == CUSTOM_TYPE_ID
    }

    /// Chosen catalog key, if a catalog type is chosen
    pub fn catalog_id(&self) -> Option<&str> {
        (!self.is_custom()).then_some(self.selected_id.as_str())
    }

    /// Type definition used by the add tool and course creation
    pub fn type_for_add(&self, catalog: &Catalog) -> EditorResult<ElementTypeDef> {
        if self.is_custom() {
            return self.custom.to_type_def();
        }
        catalog
            .get(&self.selected_id)
            .map(|entry| entry.to_type_def())
            .ok_or_else(|| EditorError::InvalidType(format!("unknown type '{}'", self.selected_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_catalog_entry() {
        let catalog = Catalog::builtin();
        let choice = TypeChoice::new(&catalog);
        assert_eq!(choice.catalog_id(), catalog.first_id());
        let def = choice.type_for_add(&catalog).unwrap();
        assert!(!def.is_custom);
    }

    #[test]
    fn test_custom_inputs_with_expressions() {
        let catalog = Catalog::builtin();
        let mut choice = TypeChoice::new(&catalog);
        choice.selected_id = CUSTOM_TYPE_ID.into();
        choice.custom = CustomInputs {
            name: "  ".into(),
            width: "2*9,5".into(),
            height: "5".into(),
            depth: "9".into(),
        };
        let def = choice.type_for_add(&catalog).unwrap();
        assert!(def.is_custom);
        assert_eq!(def.name, DEFAULT_CUSTOM_NAME);
        assert!((def.dimensions.width - 19.0).abs() < 1e-9);
        assert_eq!(def.color, shared::DEFAULT_CUSTOM_COLOR);
    }

    #[test]
    fn test_custom_inputs_rejected() {
        let inputs = CustomInputs {
            height: "-1".into(),
            ..CustomInputs::default()
        };
        assert!(matches!(inputs.to_type_def(), Err(EditorError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_catalog_id() {
        let catalog = Catalog::builtin();
        let mut choice = TypeChoice::new(&catalog);
        choice.selected_id = "NOPE".into();
        assert!(matches!(choice.type_for_add(&catalog), Err(EditorError::InvalidType(_))));
    }
}
