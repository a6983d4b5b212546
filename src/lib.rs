//! Canvas document engine for a browser-based design editor.
//!
//! This crate owns the in-memory model of an open design: the ordered
//! element collection, the selection and transform state machine, the
//! linear undo/redo history, the persisted-Document codec, and the
//! orchestration of saves, autosave, and export. The surrounding
//! application — HTTP auth and routing, the document database, the pixel
//! renderer, image hosting — stays outside and is reached through the
//! collaborator traits in [`persist`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EditorEngine`]: mutation API, selection, undo/redo wiring |
//! | [`element`] | Element types, the `"type"`-tagged kind union, sparse patches |
//! | [`store`] | Ordered element collection; z-order is array order |
//! | [`history`] | Snapshot stack with cursor for linear undo/redo |
//! | [`transform`] | Baking interactive resize/rotate into persisted geometry |
//! | [`codec`] | The persisted `{elements, canvasWidth, canvasHeight}` Document |
//! | [`persist`] | Collaborator traits and save/autosave/export orchestration |
//! | [`ui`] | Presentation state: tool, style pickers, zoom/pan |
//! | [`consts`] | Shared numeric constants (minimum sizes, zoom limits, etc.) |

pub mod codec;
pub mod consts;
pub mod element;
pub mod engine;
pub mod history;
pub mod persist;
pub mod store;
pub mod transform;
pub mod ui;
