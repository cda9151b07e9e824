use super::metadata::ItemMetadata;
use super::style::{Fill, Stroke};
use crate::bounds::Bounds;
use crate::curve::Curve;
use crate::error::DocumentError;
use crate::id::ElementId;
use kurbo::BezPath;
use std::sync::Arc;

/// A drawable item made of one or more curves sharing a fill and stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
	id: ElementId,
	bounds: Bounds,
	metadata: Option<ItemMetadata>,
	curves: Arc<[Curve]>,
	fill: Option<Fill>,
	stroke: Option<Stroke>,
}

impl Default for Shape {
	fn default() -> Self {
		Self::new(Vec::new())
	}
}

impl Shape {
	pub fn new(curves: Vec<Curve>) -> Self {
		Self::new_with_id(ElementId::new(), curves)
	}

	pub fn new_with_id(id: ElementId, curves: Vec<Curve>) -> Self {
		Self {
			id,
			bounds: Self::calc_bounds(&curves),
			metadata: None,
			curves: curves.into(),
			fill: None,
			stroke: None,
		}
	}

	pub fn id(&self) -> ElementId {
		self.id
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn metadata(&self) -> Option<&ItemMetadata> {
		self.metadata.as_ref()
	}

	pub fn curves(&self) -> &[Curve] {
		&self.curves
	}

	pub fn fill(&self) -> Option<Fill> {
		self.fill
	}

	pub fn stroke(&self) -> Option<Stroke> {
		self.stroke
	}

	#[must_use]
	pub fn with_curves(&self, curves: Vec<Curve>) -> Self {
		Self {
			bounds: Self::calc_bounds(&curves),
			curves: curves.into(),
			..self.clone()
		}
	}

	/// Replaces the curves without recomputing the bounds. The caller guarantees the geometry did not change.
	#[must_use]
	pub fn with_curves_assuming_same_bounds(&self, curves: Vec<Curve>) -> Self {
		Self {
			curves: curves.into(),
			..self.clone()
		}
	}

	/// Replaces a single curve, keeping the bounds when the replacement spans the same box.
	pub fn set_curve(&self, index: usize, curve: Curve) -> Result<Self, DocumentError> {
		let len = self.curves.len();
		let old = self.curves.get(index).ok_or(DocumentError::IndexOutOfBounds { index, len })?;
		let same_bounds = old.bounds() == curve.bounds();

		let mut curves = self.curves.to_vec();
		curves[index] = curve;
		Ok(if same_bounds { self.with_curves_assuming_same_bounds(curves) } else { self.with_curves(curves) })
	}

	#[must_use]
	pub fn with_fill(&self, fill: Option<Fill>) -> Self {
		Self { fill, ..self.clone() }
	}

	#[must_use]
	pub fn with_stroke(&self, stroke: Option<Stroke>) -> Self {
		Self { stroke, ..self.clone() }
	}

	#[must_use]
	pub fn with_metadata(&self, metadata: Option<ItemMetadata>) -> Self {
		Self { metadata, ..self.clone() }
	}

	#[must_use]
	pub fn clone_with_new_id(&self) -> Self {
		self.clone_with_id(ElementId::new())
	}

	#[must_use]
	pub fn clone_with_id(&self, id: ElementId) -> Self {
		Self { id, ..self.clone() }
	}

	/// All curves as subpaths of one path, in the shape's local space.
	pub fn to_bez_path(&self) -> BezPath {
		let mut path = BezPath::new();
		for curve in self.curves.iter() {
			curve.append_to_bez_path(&mut path);
		}
		path
	}

	pub fn calc_bounds(curves: &[Curve]) -> Bounds {
		Bounds::union_all(curves.iter().map(Curve::bounds))
	}
}
