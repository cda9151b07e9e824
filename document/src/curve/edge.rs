use super::node::{EdgeShape, Node, NodeKind};
use glam::DVec2;
use kurbo::{CubicBez, Point};

/// Cubic segment between two adjacent nodes of a curve. Edges are derived from the nodes and never edited directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
	/// The kind of the node the edge leaves from.
	pub kind: NodeKind,
	pub start: Node,
	pub end: Node,
}

impl Edge {
	pub fn new(start: Node, end: Node) -> Self {
		Self { kind: start.kind, start, end }
	}

	pub fn p1(&self) -> DVec2 {
		self.start.point
	}

	pub fn p2(&self) -> DVec2 {
		self.start.abs_c1()
	}

	pub fn p3(&self) -> DVec2 {
		self.end.abs_c2()
	}

	pub fn p4(&self) -> DVec2 {
		self.end.point
	}

	pub fn points(&self) -> [DVec2; 4] {
		[self.p1(), self.p2(), self.p3(), self.p4()]
	}

	pub fn is_straight(&self) -> bool {
		self.kind.edge_shape() == EdgeShape::Straight
	}

	pub fn to_cubic_bez(&self) -> CubicBez {
		let [p1, p2, p3, p4] = self.points().map(|point| Point::new(point.x, point.y));
		CubicBez::new(p1, p2, p3, p4)
	}
}
