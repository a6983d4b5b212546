//! The editor engine: element mutations, selection, and undo/redo wiring.
//!
//! `EditorEngine` owns the element store, the snapshot history, the
//! selection state machine, the single-element clipboard, and the
//! presentation [`UiState`]. Mutating methods return an [`Action`] the
//! host processes: re-render, schedule an autosave, or open the text-edit
//! overlay. The engine itself is fully synchronous — it is driven by
//! discrete UI events and never blocks or spawns.
//!
//! ERROR HANDLING
//! ==============
//! No method here errors or panics for well-typed input. Operations that
//! reference an id no longer in the store are no-ops returning
//! [`Action::None`]; such ids legitimately arrive from async callbacks
//! (image uploads, save completions) racing user edits.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::codec::{Document, from_document, to_document};
use crate::consts::{DUPLICATE_OFFSET, MAX_IMAGE_DIMENSION};
use crate::element::{
    ArrowAttrs, CircleAttrs, Element, ElementId, ElementKind, ElementPatch, EllipseAttrs,
    HeartAttrs, ImageAttrs, LineAttrs, RectAttrs, RegularPolygonAttrs, StarAttrs, TextAttrs,
    fresh_id,
};
use crate::history::History;
use crate::persist::UploadedImage;
use crate::store::ElementStore;
use crate::transform::{TransformEnd, bake};
use crate::ui::{Point, UiState};

/// Selection and text-editing state machine.
///
/// `Idle` ⇄ `Selected` ⇄ `Editing`; only text elements enter `Editing`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// No selection.
    #[default]
    Idle,
    /// One element selected.
    Selected(ElementId),
    /// A text element's content is being edited in the host overlay.
    Editing {
        /// The text element being edited.
        id: ElementId,
        /// Text at edit start, restored on cancel or empty commit.
        original_text: String,
    },
}

/// What the host should do after a call into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Nothing changed (stale id, reorder at the extreme, etc.).
    None,
    /// A new element was appended on top; the document changed.
    ElementAdded {
        id: ElementId,
    },
    /// The document's elements changed.
    DocumentChanged,
    /// Only the selection changed; no save needed.
    SelectionChanged,
    /// The host should open its text-edit overlay at `screen`.
    EditTextRequested {
        id: ElementId,
        text: String,
        screen: Point,
    },
}

/// The canvas document engine for one open design.
#[derive(Debug)]
pub struct EditorEngine {
    store: ElementStore,
    history: History,
    mode: Mode,
    clipboard: Option<Element>,
    ui: UiState,
    canvas_width: f64,
    canvas_height: f64,
    dirty: bool,
}

impl Default for EditorEngine {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_CANVAS_WIDTH, crate::consts::DEFAULT_CANVAS_HEIGHT)
    }
}

impl EditorEngine {
    /// An empty editor at the given canvas size.
    #[must_use]
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            store: ElementStore::new(),
            history: History::new(),
            mode: Mode::Idle,
            clipboard: None,
            ui: UiState::default(),
            canvas_width,
            canvas_height,
            dirty: false,
        }
    }

    // --- Document lifecycle ---

    /// Replace the open document: load elements, clear the selection, and
    /// restart history from the loaded state.
    pub fn load_document(&mut self, document: Document) {
        self.canvas_width = document.canvas_width;
        self.canvas_height = document.canvas_height;
        self.store.replace_all(from_document(document));
        self.history.reset(self.store.snapshot());
        self.mode = Mode::Idle;
        self.dirty = false;
    }

    /// Snapshot the live document into its persisted shape.
    #[must_use]
    pub fn document(&self) -> Document {
        to_document(self.store.elements(), self.canvas_width, self.canvas_height)
    }

    /// Resize the canvas. Changes the persisted payload but, unlike
    /// element edits, pushes no history snapshot (history covers elements
    /// only).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> Action {
        self.canvas_width = width;
        self.canvas_height = height;
        self.dirty = true;
        Action::DocumentChanged
    }

    // --- Element creation ---

    /// Add a text element with the current style settings.
    pub fn add_text(&mut self, text: &str) -> Action {
        let style = &self.ui.style;
        let attrs = TextAttrs {
            text: text.to_owned(),
            font_size: style.font_size,
            font_family: style.font_family.clone(),
            font_weight: style.font_weight(),
            font_style: style.font_style(),
            text_decoration: style.text_decoration(),
            align: style.align.clone(),
            fill: style.fill.clone(),
            ..TextAttrs::default()
        };
        self.commit_add(Element::new(ElementKind::Text(attrs)).at(100.0, 100.0))
    }

    /// Add a 100×100 rectangle with the current fill.
    pub fn add_rect(&mut self) -> Action {
        let attrs = RectAttrs {
            width: 100.0,
            height: 100.0,
            fill: self.ui.style.fill.clone(),
            stroke: None,
            stroke_width: 0.0,
        };
        self.commit_add(Element::new(ElementKind::Rect(attrs)).at(150.0, 150.0))
    }

    /// Add a circle of radius 50 with the current fill.
    pub fn add_circle(&mut self) -> Action {
        let attrs = CircleAttrs { radius: 50.0, fill: self.ui.style.fill.clone() };
        self.commit_add(Element::new(ElementKind::Circle(attrs)).at(200.0, 200.0))
    }

    /// Add an 80×40 ellipse with the current fill.
    pub fn add_ellipse(&mut self) -> Action {
        let attrs = EllipseAttrs {
            radius_x: 80.0,
            radius_y: 40.0,
            fill: self.ui.style.fill.clone(),
        };
        self.commit_add(Element::new(ElementKind::Ellipse(attrs)).at(200.0, 200.0))
    }

    /// Add an equilateral triangle of radius 50 with the current fill.
    pub fn add_triangle(&mut self) -> Action {
        let attrs = RegularPolygonAttrs { radius: 50.0, fill: self.ui.style.fill.clone() };
        self.commit_add(Element::new(ElementKind::Triangle(attrs)).at(250.0, 200.0))
    }

    /// Add a regular pentagon of radius 50 with the current fill.
    pub fn add_pentagon(&mut self) -> Action {
        let attrs = RegularPolygonAttrs { radius: 50.0, fill: self.ui.style.fill.clone() };
        self.commit_add(Element::new(ElementKind::Pentagon(attrs)).at(200.0, 200.0))
    }

    /// Add a regular hexagon of radius 50 with the current fill.
    pub fn add_hexagon(&mut self) -> Action {
        let attrs = RegularPolygonAttrs { radius: 50.0, fill: self.ui.style.fill.clone() };
        self.commit_add(Element::new(ElementKind::Hexagon(attrs)).at(200.0, 200.0))
    }

    /// Add a five-point star with the current fill.
    pub fn add_star(&mut self) -> Action {
        let attrs = StarAttrs {
            num_points: 5,
            inner_radius: 25.0,
            outer_radius: 50.0,
            fill: self.ui.style.fill.clone(),
        };
        self.commit_add(Element::new(ElementKind::Star(attrs)).at(200.0, 200.0))
    }

    /// Add a horizontal line segment with the current fill as stroke.
    pub fn add_line(&mut self) -> Action {
        let attrs = LineAttrs {
            points: vec![100.0, 150.0, 200.0, 150.0],
            stroke: self.ui.style.fill.clone(),
            stroke_width: 3.0,
        };
        self.commit_add(Element::new(ElementKind::Line(attrs)))
    }

    /// Add a horizontal arrow with the current fill.
    pub fn add_arrow(&mut self) -> Action {
        let fill = self.ui.style.fill.clone();
        let attrs = ArrowAttrs {
            points: vec![100.0, 200.0, 200.0, 200.0],
            fill: fill.clone(),
            stroke: fill,
            stroke_width: 4.0,
            pointer_length: 10.0,
            pointer_width: 10.0,
        };
        self.commit_add(Element::new(ElementKind::Arrow(attrs)))
    }

    /// Add an 80×80 heart with the current fill.
    pub fn add_heart(&mut self) -> Action {
        let attrs = HeartAttrs {
            width: 80.0,
            height: 80.0,
            fill: self.ui.style.fill.clone(),
        };
        self.commit_add(Element::new(ElementKind::Heart(attrs)).at(200.0, 200.0))
    }

    /// Add an image element for an uploaded file, scaled down to fit
    /// [`MAX_IMAGE_DIMENSION`] while keeping its aspect ratio.
    pub fn add_image(&mut self, uploaded: &UploadedImage) -> Action {
        let scale = (MAX_IMAGE_DIMENSION / uploaded.width)
            .min(MAX_IMAGE_DIMENSION / uploaded.height)
            .min(1.0);
        let attrs = ImageAttrs {
            src: uploaded.url.clone(),
            width: (uploaded.width * scale).round(),
            height: (uploaded.height * scale).round(),
        };
        self.commit_add(Element::new(ElementKind::Image(attrs)).at(100.0, 100.0))
    }

    // --- Element mutation ---

    /// Shallow-merge a patch into an element. Stale ids are a logged no-op.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> Action {
        if self.store.update(id, patch) {
            self.commit()
        } else {
            debug!(id, "update for unknown element ignored");
            Action::None
        }
    }

    /// Remove an element. Clears the selection if it pointed at the
    /// removed element. Stale ids are a no-op with no history push.
    pub fn remove_element(&mut self, id: &str) -> Action {
        if self.store.remove(id).is_none() {
            debug!(id, "remove for unknown element ignored");
            return Action::None;
        }
        if self.selected_id().is_some_and(|selected| selected == id) {
            self.mode = Mode::Idle;
        }
        self.commit()
    }

    /// Duplicate an element with a fresh id, offset +15/+15, on top.
    pub fn duplicate_element(&mut self, id: &str) -> Action {
        match self.store.duplicate(id) {
            Some(new_id) => {
                self.commit();
                Action::ElementAdded { id: new_id }
            }
            None => Action::None,
        }
    }

    /// Move an element one step toward the top of the z-order.
    pub fn bring_forward(&mut self, id: &str) -> Action {
        if self.store.bring_forward(id) { self.commit() } else { Action::None }
    }

    /// Move an element one step toward the bottom of the z-order.
    pub fn send_backward(&mut self, id: &str) -> Action {
        if self.store.send_backward(id) { self.commit() } else { Action::None }
    }

    /// Move an element to the top of the z-order.
    pub fn bring_to_front(&mut self, id: &str) -> Action {
        if self.store.bring_to_front(id) { self.commit() } else { Action::None }
    }

    /// Move an element to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: &str) -> Action {
        if self.store.send_to_back(id) { self.commit() } else { Action::None }
    }

    /// Bake a finished resize/rotate gesture into the element's geometry
    /// and reset its transient scale factors.
    pub fn transform_end(&mut self, id: &str, end: &TransformEnd) -> Action {
        let Some(element) = self.store.get_mut(id) else {
            debug!(id, "transform end for unknown element ignored");
            return Action::None;
        };
        bake(element, end);
        self.commit()
    }

    // --- Selection ---

    /// Select an element (click). Replaces any prior selection; commits a
    /// pending text edit first, since clicking away is a blur.
    pub fn select(&mut self, id: &str) -> Action {
        if matches!(self.mode, Mode::Editing { .. }) {
            self.commit_text_edit();
        }
        if !self.store.contains(id) {
            return Action::None;
        }
        self.mode = Mode::Selected(id.to_owned());
        Action::SelectionChanged
    }

    /// Clear the selection (click on empty canvas). Commits a pending
    /// text edit first.
    pub fn clear_selection(&mut self) -> Action {
        if matches!(self.mode, Mode::Editing { .. }) {
            self.commit_text_edit();
        }
        if self.mode == Mode::Idle {
            return Action::None;
        }
        self.mode = Mode::Idle;
        Action::SelectionChanged
    }

    /// Remove the selected element (Delete/Backspace).
    pub fn delete_selected(&mut self) -> Action {
        match self.selected_id().map(ToOwned::to_owned) {
            Some(id) => self.remove_element(&id),
            None => Action::None,
        }
    }

    /// The selected element's id, in both `Selected` and `Editing` modes.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        match &self.mode {
            Mode::Idle => None,
            Mode::Selected(id) | Mode::Editing { id, .. } => Some(id),
        }
    }

    /// The current selection/editing mode.
    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    // --- Clipboard ---

    /// Copy the selected element into the clipboard. Returns whether
    /// anything was copied.
    pub fn copy_selected(&mut self) -> bool {
        let copied = self
            .selected_id()
            .and_then(|id| self.store.get(id))
            .cloned();
        let any = copied.is_some();
        if any {
            self.clipboard = copied;
        }
        any
    }

    /// Paste the clipboard element with a fresh id, offset +15/+15.
    pub fn paste(&mut self) -> Action {
        let Some(template) = self.clipboard.clone() else {
            return Action::None;
        };
        let mut element = template;
        element.id = fresh_id();
        element.x += DUPLICATE_OFFSET;
        element.y += DUPLICATE_OFFSET;
        self.commit_add(element)
    }

    // --- Text editing ---

    /// Enter text-edit mode on a text element (double-click while
    /// selected). Mirrors the current font and fill settings onto the
    /// element and tells the host where to place its overlay.
    pub fn begin_text_edit(&mut self, id: &str) -> Action {
        let Some(element) = self.store.get(id) else {
            return Action::None;
        };
        let ElementKind::Text(attrs) = &element.kind else {
            return Action::None;
        };
        let original_text = attrs.text.clone();
        let screen = self.ui.document_to_screen(Point::new(element.x, element.y));
        let style = &self.ui.style;
        let mirror = ElementPatch {
            font_family: Some(style.font_family.clone()),
            font_size: Some(style.font_size),
            font_weight: Some(style.font_weight()),
            font_style: Some(style.font_style()),
            text_decoration: Some(style.text_decoration()),
            fill: Some(style.fill.clone()),
            ..ElementPatch::default()
        };
        self.store.update(id, &mirror);
        self.mode = Mode::Editing { id: id.to_owned(), original_text: original_text.clone() };
        Action::EditTextRequested { id: id.to_owned(), text: original_text, screen }
    }

    /// Live-update the edited element's text on each keystroke. Transient:
    /// no history is pushed until the edit commits.
    pub fn edit_text_input(&mut self, text: &str) -> Action {
        let Mode::Editing { id, .. } = &self.mode else {
            return Action::None;
        };
        let patch = ElementPatch { text: Some(text.to_owned()), ..ElementPatch::default() };
        let id = id.clone();
        self.store.update(&id, &patch);
        Action::None
    }

    /// Commit the text edit (Enter/blur). An empty result is rejected and
    /// the element keeps its previous text; otherwise the session's edits
    /// become one history entry.
    pub fn commit_text_edit(&mut self) -> Action {
        let Mode::Editing { id, original_text } = self.mode.clone() else {
            return Action::None;
        };
        self.mode = Mode::Selected(id.clone());
        let current = match self.store.get(&id) {
            Some(Element { kind: ElementKind::Text(attrs), .. }) => attrs.text.clone(),
            _ => return Action::SelectionChanged,
        };
        if current.trim().is_empty() {
            let patch = ElementPatch { text: Some(original_text), ..ElementPatch::default() };
            self.store.update(&id, &patch);
            return Action::SelectionChanged;
        }
        self.commit()
    }

    /// Abort the text edit (Escape), restoring the original text.
    pub fn cancel_text_edit(&mut self) -> Action {
        let Mode::Editing { id, original_text } = self.mode.clone() else {
            return Action::None;
        };
        let patch = ElementPatch { text: Some(original_text), ..ElementPatch::default() };
        self.store.update(&id, &patch);
        self.mode = Mode::Selected(id);
        Action::SelectionChanged
    }

    // --- History ---

    /// Step the document back one snapshot.
    pub fn undo(&mut self) -> Action {
        match self.history.undo() {
            Some(snapshot) => self.restore(snapshot),
            None => Action::None,
        }
    }

    /// Step the document forward one snapshot.
    pub fn redo(&mut self) -> Action {
        match self.history.redo() {
            Some(snapshot) => self.restore(snapshot),
            None => Action::None,
        }
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Queries and bookkeeping ---

    /// The elements in z-order, bottom-most first.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.store.get(id)
    }

    /// Presentation state (tool, style pickers, zoom/pan).
    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Mutable presentation state for the host chrome.
    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    /// Canvas width in document units.
    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Canvas height in document units.
    #[must_use]
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Whether there are unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the current state has been persisted.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // --- Internals ---

    fn commit_add(&mut self, element: Element) -> Action {
        let id = element.id.clone();
        self.store.push(element);
        self.commit();
        Action::ElementAdded { id }
    }

    fn commit(&mut self) -> Action {
        self.history.push(self.store.elements());
        self.dirty = true;
        Action::DocumentChanged
    }

    fn restore(&mut self, snapshot: Vec<Element>) -> Action {
        self.store.replace_all(snapshot);
        let selection_stale = self
            .selected_id()
            .is_some_and(|id| !self.store.contains(id));
        if selection_stale {
            self.mode = Mode::Idle;
        }
        self.dirty = true;
        Action::DocumentChanged
    }
}
