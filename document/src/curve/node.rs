use crate::id::ElementId;
use bitflags::bitflags;
use glam::DVec2;

bitflags! {
	/// Per-node flags packed into three fields: smoothness in the low nibble, the shape of the outgoing edge at bit 4,
	/// and the style of the outgoing edge in bits 8 to 11. A cleared field means cusp, straight edge and no edge.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
	#[repr(transparent)]
	pub struct NodeKind: u32 {
		const SMOOTH      = 1 << 0;
		const SYMMETRIC   = 2 << 0;

		const CURVE_EDGE  = 1 << 4;

		const SOLID_EDGE  = 1 << 8;
		const DASHED_EDGE = 2 << 8;
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Smoothness {
	#[default]
	Cusp,
	Smooth,
	Symmetric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeShape {
	#[default]
	Straight,
	Curve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeStyle {
	#[default]
	None,
	Solid,
	Dashed,
}

impl NodeKind {
	pub fn from_parts(smoothness: Smoothness, shape: EdgeShape, style: EdgeStyle) -> Self {
		let smoothness = match smoothness {
			Smoothness::Cusp => Self::empty(),
			Smoothness::Smooth => Self::SMOOTH,
			Smoothness::Symmetric => Self::SYMMETRIC,
		};
		let shape = match shape {
			EdgeShape::Straight => Self::empty(),
			EdgeShape::Curve => Self::CURVE_EDGE,
		};
		let style = match style {
			EdgeStyle::None => Self::empty(),
			EdgeStyle::Solid => Self::SOLID_EDGE,
			EdgeStyle::Dashed => Self::DASHED_EDGE,
		};
		smoothness | shape | style
	}

	pub fn smoothness(self) -> Smoothness {
		if self.contains(Self::SYMMETRIC) {
			Smoothness::Symmetric
		} else if self.contains(Self::SMOOTH) {
			Smoothness::Smooth
		} else {
			Smoothness::Cusp
		}
	}

	pub fn edge_shape(self) -> EdgeShape {
		if self.contains(Self::CURVE_EDGE) { EdgeShape::Curve } else { EdgeShape::Straight }
	}

	pub fn edge_style(self) -> EdgeStyle {
		if self.contains(Self::DASHED_EDGE) {
			EdgeStyle::Dashed
		} else if self.contains(Self::SOLID_EDGE) {
			EdgeStyle::Solid
		} else {
			EdgeStyle::None
		}
	}
}

/// An editable curve vertex. The control points are stored relative to `point`.
///
/// `c1` is the forward handle used by the edge leaving this node, `c2` the reverse handle used by the edge arriving at it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
	id: ElementId,
	pub kind: NodeKind,
	pub point: DVec2,
	pub c1: DVec2,
	pub c2: DVec2,
}

impl Node {
	pub fn new(kind: NodeKind, point: DVec2, c1: DVec2, c2: DVec2) -> Self {
		Self::new_with_id(ElementId::new(), kind, point, c1, c2)
	}

	pub fn new_with_id(id: ElementId, kind: NodeKind, point: DVec2, c1: DVec2, c2: DVec2) -> Self {
		Self { id, kind, point, c1, c2 }
	}

	/// A cusp with both handles collapsed onto the anchor.
	pub fn from_point(kind: NodeKind, point: DVec2) -> Self {
		Self::new(kind, point, DVec2::ZERO, DVec2::ZERO)
	}

	pub fn id(&self) -> ElementId {
		self.id
	}

	pub fn abs_c1(&self) -> DVec2 {
		self.point + self.c1
	}

	pub fn abs_c2(&self) -> DVec2 {
		self.point + self.c2
	}

	#[must_use]
	pub fn with_kind(self, kind: NodeKind) -> Self {
		Self { kind, ..self }
	}

	#[must_use]
	pub fn with_point(self, point: DVec2) -> Self {
		Self { point, ..self }
	}

	#[must_use]
	pub fn with_c1(self, c1: DVec2) -> Self {
		Self { c1, ..self }
	}

	#[must_use]
	pub fn with_c2(self, c2: DVec2) -> Self {
		Self { c2, ..self }
	}

	/// Moves the anchor, and with it both handles since they are relative.
	#[must_use]
	pub fn translated(self, delta: DVec2) -> Self {
		Self { point: self.point + delta, ..self }
	}

	#[must_use]
	pub fn clone_with_new_id(&self) -> Self {
		Self { id: ElementId::new(), ..*self }
	}

	#[must_use]
	pub fn clone_with_id(&self, id: ElementId) -> Self {
		Self { id, ..*self }
	}

	pub fn has_same_points(&self, other: &Self) -> bool {
		self.point == other.point && self.c1 == other.c1 && self.c2 == other.c2
	}
}
