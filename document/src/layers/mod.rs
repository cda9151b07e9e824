pub mod group_layer;
pub mod layer_info;
pub mod metadata;
pub mod shape_layer;
pub mod style;

pub use group_layer::{Group, LookupEntry};
pub use layer_info::{DescendantsIter, Item};
pub use metadata::ItemMetadata;
pub use shape_layer::Shape;
pub use style::{Color, Fill, Stroke};
