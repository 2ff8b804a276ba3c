pub mod context_menu;
pub mod courses;
pub mod elements;
pub mod ghost;
pub mod notifications;
pub mod selection;
pub mod settings;
pub mod tool;
pub mod type_choice;

mod interaction;
mod options;
mod persistence;
mod positioning;
mod status;
mod tools;

use shared::{Catalog, ElementId, ElementTypeDef, PlacedElement, Transform};

pub use context_menu::{ContextAction, ContextMenu};
use courses::CourseRegistry;
use elements::ElementRegistry;
use ghost::Ghost;
pub use interaction::ClickOutcome;
use notifications::Notifications;
pub use persistence::read_layout;
use selection::SelectionState;
pub use settings::{EditorSettings, Language};
pub use status::ToolAvailability;
pub use tool::{Mode, SubState, Tool, ToolKind};
pub use type_choice::{CustomInputs, TypeChoice};

use crate::error::{EditorError, EditorResult};
use crate::viewport::picking::{intersect_scene, ElementBox, Intersection, Ray};

/// Pose of the element being moved, captured when the move started
#[derive(Debug, Clone, Copy, PartialEq)]
struct MoveOrigin {
    id: ElementId,
    transform: Transform,
}

/// Whole editor state: registries, tool state machine, ghost and UI-facing
/// bits. Collaborators mutate it only through its operations.
pub struct EditorState {
    pub settings: EditorSettings,
    catalog: Catalog,
    elements: ElementRegistry,
    courses: CourseRegistry,
    selection: SelectionState,
    ghost: Ghost,
    tool: Tool,
    add_state: SubState,
    move_state: SubState,
    move_origin: Option<MoveOrigin>,
    /// Element hidden while its move is in flight
    hidden: Option<ElementId>,
    joint_thickness: f64,
    type_choice: TypeChoice,
    context_menu: Option<ContextMenu>,
    notifications: Notifications,
    /// Tool/ghost/menu/joint changes
    version: u64,
    joint_version: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorState {
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_catalog(settings, Catalog::builtin())
    }

    pub fn with_catalog(settings: EditorSettings, catalog: Catalog) -> Self {
        let joint_thickness = settings.placement.default_joint_cm;
        let type_choice = TypeChoice::new(&catalog);
        Self {
            settings,
            catalog,
            elements: ElementRegistry::default(),
            courses: CourseRegistry::default(),
            selection: SelectionState::default(),
            ghost: Ghost::default(),
            tool: Tool::Select,
            add_state: SubState::Idle,
            move_state: SubState::Idle,
            move_origin: None,
            hidden: None,
            joint_thickness,
            type_choice,
            context_menu: None,
            notifications: Notifications::default(),
            version: 0,
            joint_version: 0,
        }
    }

    // ── Read accessors ──────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn elements(&self) -> &[PlacedElement] {
        self.elements.elements()
    }

    pub fn element(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.get(id)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn next_id(&self) -> ElementId {
        self.elements.next_id()
    }

    pub fn courses(&self) -> &CourseRegistry {
        &self.courses
    }

    pub fn ghost(&self) -> &Ghost {
        &self.ghost
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection.selected()
    }

    /// Element not to be drawn (its move ghost stands in for it)
    pub fn hidden_element(&self) -> Option<ElementId> {
        self.hidden
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn add_state(&self) -> SubState {
        self.add_state
    }

    pub fn move_state(&self) -> SubState {
        self.move_state
    }

    pub fn mode(&self) -> Mode {
        Mode::from_parts(self.tool, self.add_state, self.move_state)
    }

    /// Orbit navigation is only active with the select tool
    pub fn navigation_enabled(&self) -> bool {
        self.tool == Tool::Select
    }

    pub fn joint_thickness(&self) -> f64 {
        self.joint_thickness
    }

    pub fn type_choice(&self) -> &TypeChoice {
        &self.type_choice
    }

    /// Custom dimension inputs, edited in place by the side panel
    pub fn custom_inputs_mut(&mut self) -> &mut CustomInputs {
        &mut self.type_choice.custom
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<notifications::Notification> {
        self.notifications.take()
    }

    /// Editor version (increments on every observable change)
    pub fn version(&self) -> u64 {
        self.version
            + self.elements.version()
            + self.courses.version()
            + self.selection.version()
    }

    /// Version of the persisted layout only
    pub fn layout_version(&self) -> u64 {
        self.elements.version() + self.courses.version() + self.joint_version
    }

    // ── Derived data ────────────────────────────────────────

    /// Type definition of a placed element, tagged with its catalog key
    pub fn type_for_element(&self, id: ElementId) -> EditorResult<ElementTypeDef> {
        let element = self
            .elements
            .get(id)
            .ok_or_else(|| EditorError::NotFound(format!("element {}", id)))?;
        elements::element_type_def(element, &self.catalog).ok_or_else(|| {
            EditorError::InvalidType(format!(
                "type '{}' of element {} is not in the catalog",
                element.kind.type_id(),
                id
            ))
        })
    }

    /// Type definition of the selected element
    pub fn type_for_selected(&self) -> EditorResult<ElementTypeDef> {
        let id = self.require_selection("type lookup")?;
        self.type_for_element(id)
    }

    /// Type definition the add tool would place
    pub fn type_for_add(&self) -> EditorResult<ElementTypeDef> {
        self.type_choice.type_for_add(&self.catalog)
    }

    /// Pickable boxes of all placed elements
    pub fn element_boxes(&self) -> Vec<ElementBox> {
        self.elements
            .elements()
            .iter()
            .filter_map(|e| ElementBox::from_element(e, &self.catalog))
            .collect()
    }

    /// Cast a ray into the scene; the element being moved is skipped
    pub fn pick(&self, ray: &Ray) -> Vec<Intersection> {
        intersect_scene(
            ray,
            &self.element_boxes(),
            self.hidden,
            self.settings.grid.half_extent(),
        )
    }

    // ── Error reporting ─────────────────────────────────────

    /// Log an error and surface it to the user when relevant
    pub fn report(&mut self, err: &EditorError) {
        if err.is_user_visible() {
            tracing::warn!("{}", err);
            self.notifications.warn(status::describe_error(err));
        } else {
            tracing::debug!("Ignored: {}", err);
        }
    }

    /// `report` helper for UI call sites that only care about the side effect
    pub fn run<T>(&mut self, result: EditorResult<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    fn require_selection(&self, action: &str) -> EditorResult<ElementId> {
        self.selection.selected().ok_or_else(|| {
            tracing::warn!("{} ignored: no element selected", action);
            EditorError::InvalidState(format!("{}: no element selected", action))
        })
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}
