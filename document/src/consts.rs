// Document
pub const DEFAULT_DOCUMENT_NAME: &str = "Untitled Document";

// Ids
pub const FIRST_ELEMENT_ID: u64 = 1;

// Stroke
pub const DEFAULT_STROKE_WIDTH: f64 = 1.;
/// Every bit set means every dash segment is drawn, i.e. a solid line.
pub const SOLID_DASH_PATTERN: u32 = 0xFFFF_FFFF;
