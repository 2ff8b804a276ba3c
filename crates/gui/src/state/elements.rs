//! Placed element registry

use shared::{
    Catalog, ElementId, ElementKind, ElementTypeDef, PlacedElement, Transform,
};

use crate::error::{EditorError, EditorResult};

/// Resolve the type definition of a placed element.
///
/// Catalog elements whose key disappeared from the catalog resolve to `None`.
pub fn element_type_def(element: &PlacedElement, catalog: &Catalog) -> Option<ElementTypeDef> {
    match &element.kind {
        ElementKind::Catalog { type_id } => catalog.get(type_id).map(|e| e.to_type_def()),
        ElementKind::Custom { dimensions, name } => {
            Some(ElementTypeDef::custom(name.clone(), *dimensions))
        }
    }
}

/// Authoritative collection of placed elements, in placement order
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: Vec<PlacedElement>,
    next_id: ElementId,
    version: u64,
}

impl ElementRegistry {
    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Id the next placed element will receive; never decreases
    pub fn next_id(&self) -> ElementId {
        self.next_id
    }

    /// Registry version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Commit a new element of `def` at the given pose.
    ///
    /// Catalog definitions are mapped back to a catalog key: exact name and
    /// dimension match first, then `origin_type_id`, then `fallback_type_id`.
    pub fn place(
        &mut self,
        def: &ElementTypeDef,
        position: [f64; 3],
        rotation_y: f64,
        catalog: &Catalog,
        fallback_type_id: Option<&str>,
    ) -> EditorResult<ElementId> {
        if !def.dimensions.is_valid() {
            return Err(EditorError::InvalidType(format!(
                "{} has unusable dimensions {:?}",
                def.name,
                def.dimensions.to_array()
            )));
        }

        let kind = if def.is_custom {
            ElementKind::Custom {
                dimensions: def.dimensions,
                name: def.name.clone(),
            }
        } else {
            ElementKind::Catalog {
                type_id: resolve_catalog_id(def, catalog, fallback_type_id)?,
            }
        };

        let id = self.next_id;
        if id == ElementId::MAX {
            return Err(EditorError::InvalidState("element ids exhausted".into()));
        }
        self.insert(PlacedElement {
            id,
            kind,
            transform: Transform::new(position, rotation_y),
        });
        tracing::debug!("Placed element {} ({}) at {:?}", id, def.name, position);
        Ok(id)
    }

    /// Re-insert an element with a known id (layout restore)
    pub(crate) fn insert(&mut self, element: PlacedElement) {
        self.next_id = self.next_id.max(element.id.saturating_add(1));
        self.elements.push(element);
        self.version += 1;
    }

    /// Remove an element
    pub fn remove(&mut self, id: ElementId) -> EditorResult<PlacedElement> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EditorError::NotFound(format!("element {}", id)))?;
        self.version += 1;
        Ok(self.elements.remove(index))
    }

    /// Rotate an element around Y by `increment` radians; returns the new angle
    pub fn rotate(&mut self, id: ElementId, increment: f64) -> EditorResult<f64> {
        let element = self.get_mut(id)?;
        element.transform.rotation_y += increment;
        let angle = element.transform.rotation_y;
        self.version += 1;
        Ok(angle)
    }

    /// Overwrite an element's pose
    pub fn set_transform(&mut self, id: ElementId, transform: Transform) -> EditorResult<()> {
        self.get_mut(id)?.transform = transform;
        self.version += 1;
        Ok(())
    }

    /// Drop all elements and restart ids at `next_id`
    pub(crate) fn reset(&mut self, next_id: ElementId) {
        self.elements.clear();
        self.next_id = next_id;
        self.version += 1;
    }

    fn get_mut(&mut self, id: ElementId) -> EditorResult<&mut PlacedElement> {
        self.elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EditorError::NotFound(format!("element {}", id)))
    }
}

fn resolve_catalog_id(
    def: &ElementTypeDef,
    catalog: &Catalog,
    fallback_type_id: Option<&str>,
) -> EditorResult<String> {
    if let Some(id) = catalog.find_matching(def) {
        return Ok(id.to_string());
    }
    if let Some(origin) = def.origin_type_id.as_deref().filter(|id| catalog.contains(id)) {
        return Ok(origin.to_string());
    }
    match fallback_type_id.filter(|id| catalog.contains(id)) {
        Some(id) => {
            tracing::warn!(
                "No catalog entry matches '{}', storing it as '{}'",
                def.name,
                id
            );
            Ok(id.to_string())
        }
        None => Err(EditorError::InvalidType(format!(
            "'{}' is not a catalog type",
            def.name
        ))),
    }
}
