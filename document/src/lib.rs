//! In-memory scene graph of a vector illustration.
//!
//! Every type here is immutable once built. Edits produce new values that share all unchanged subtrees with the old ones,
//! and a [`Document`] keeps those values as its undo history.

pub mod bounds;
pub mod consts;
pub mod curve;
pub mod document;
pub mod error;
pub mod id;
pub mod layers;

pub use bounds::Bounds;
pub use curve::{Curve, CurveKind, Edge, Node, NodeKind};
pub use document::{Document, HistoryLimit};
pub use error::DocumentError;
pub use id::{ElementId, IdGenerator};
pub use layers::{Group, Item, ItemMetadata, Shape};
