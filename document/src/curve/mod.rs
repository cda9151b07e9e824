pub mod edge;
pub mod node;

pub use edge::Edge;
pub use node::{EdgeShape, EdgeStyle, Node, NodeKind, Smoothness};

use crate::bounds::Bounds;
use crate::error::DocumentError;
use crate::id::ElementId;
use bitflags::bitflags;
use glam::DVec2;
use kurbo::{BezPath, Point};
use std::sync::Arc;

bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
	#[repr(transparent)]
	pub struct CurveKind: u32 {
		const CLOSED = 1 << 0;
	}
}

/// An ordered run of nodes, optionally closed, with its edges and bounds cached.
///
/// The edge count is `nodes.len()` for closed curves and `nodes.len() - 1` for open ones, or zero when there are fewer
/// than two nodes. Every constructor regenerates the edges unless the caller hands them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
	id: ElementId,
	kind: CurveKind,
	nodes: Arc<[Node]>,
	edges: Arc<[Edge]>,
	bounds: Bounds,
}

impl Curve {
	pub fn new(kind: CurveKind, nodes: Vec<Node>) -> Self {
		Self::new_with_id(ElementId::new(), kind, nodes)
	}

	pub fn new_with_id(id: ElementId, kind: CurveKind, nodes: Vec<Node>) -> Self {
		let bounds = Self::calc_bounds(&nodes);
		Self::from_parts(id, kind, nodes.into(), bounds)
	}

	fn from_parts(id: ElementId, kind: CurveKind, nodes: Arc<[Node]>, bounds: Bounds) -> Self {
		let edges = generate_edges(&nodes, kind.contains(CurveKind::CLOSED));
		Self { id, kind, nodes, edges, bounds }
	}

	pub fn id(&self) -> ElementId {
		self.id
	}

	pub fn kind(&self) -> CurveKind {
		self.kind
	}

	pub fn is_closed(&self) -> bool {
		self.kind.contains(CurveKind::CLOSED)
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node_by_id(&self, id: ElementId) -> Option<(usize, &Node)> {
		self.nodes.iter().enumerate().find(|(_, node)| node.id() == id)
	}

	/// Replaces the nodes, recomputing both edges and bounds.
	#[must_use]
	pub fn with_nodes(&self, nodes: Vec<Node>) -> Self {
		let bounds = Self::calc_bounds(&nodes);
		Self::from_parts(self.id, self.kind, nodes.into(), bounds)
	}

	/// Replaces the nodes but keeps the current bounds.
	///
	/// The caller guarantees that the new nodes span exactly the same box. This is not checked, so passing nodes that
	/// moved leaves a stale bounding box behind.
	#[must_use]
	pub fn with_nodes_assuming_same_bounds(&self, nodes: Vec<Node>) -> Self {
		Self::from_parts(self.id, self.kind, nodes.into(), self.bounds)
	}

	/// Replaces the nodes together with precomputed edges. The edges are trusted to match the nodes.
	#[must_use]
	pub fn with_nodes_and_edges(&self, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		Self {
			id: self.id,
			kind: self.kind,
			bounds: Self::calc_bounds(&nodes),
			nodes: nodes.into(),
			edges: edges.into(),
		}
	}

	/// Changing the kind can open or close the curve, so the edges are regenerated while the bounds are kept.
	#[must_use]
	pub fn with_kind(&self, kind: CurveKind) -> Self {
		Self::from_parts(self.id, kind, self.nodes.clone(), self.bounds)
	}

	#[must_use]
	pub fn with_closed(&self, closed: bool) -> Self {
		let mut kind = self.kind;
		kind.set(CurveKind::CLOSED, closed);
		self.with_kind(kind)
	}

	#[must_use]
	pub fn add_node(&self, node: Node) -> Self {
		self.add_nodes([node])
	}

	#[must_use]
	pub fn add_nodes(&self, nodes: impl IntoIterator<Item = Node>) -> Self {
		let mut new_nodes = self.nodes.to_vec();
		new_nodes.extend(nodes);
		self.with_nodes(new_nodes)
	}

	/// Inserts before `index`, where `index == len` appends.
	pub fn insert_node(&self, index: usize, node: Node) -> Result<Self, DocumentError> {
		if index > self.nodes.len() {
			return Err(DocumentError::IndexOutOfBounds { index, len: self.nodes.len() });
		}
		let mut nodes = self.nodes.to_vec();
		nodes.insert(index, node);
		Ok(self.with_nodes(nodes))
	}

	pub fn remove_node(&self, index: usize) -> Result<Self, DocumentError> {
		self.check_index(index)?;
		let mut nodes = self.nodes.to_vec();
		nodes.remove(index);
		Ok(self.with_nodes(nodes))
	}

	/// Replaces the node at `index`. The bounds are only carried over when the replacement has the same anchor and handles.
	pub fn set_node(&self, index: usize, node: Node) -> Result<Self, DocumentError> {
		self.check_index(index)?;
		let same_points = node.has_same_points(&self.nodes[index]);
		let mut nodes = self.nodes.to_vec();
		nodes[index] = node;
		Ok(if same_points { self.with_nodes_assuming_same_bounds(nodes) } else { self.with_nodes(nodes) })
	}

	#[must_use]
	pub fn clone_with_new_id(&self) -> Self {
		self.clone_with_id(ElementId::new())
	}

	#[must_use]
	pub fn clone_with_id(&self, id: ElementId) -> Self {
		Self { id, ..self.clone() }
	}

	/// Builds the path a renderer strokes and fills. Straight edges become line segments.
	pub fn to_bez_path(&self) -> BezPath {
		let mut path = BezPath::new();
		self.append_to_bez_path(&mut path);
		path
	}

	pub(crate) fn append_to_bez_path(&self, path: &mut BezPath) {
		let Some(first) = self.nodes.first() else { return };

		path.move_to(to_point(first.point));
		for edge in self.edges.iter() {
			if edge.is_straight() {
				path.line_to(to_point(edge.p4()));
			} else {
				path.curve_to(to_point(edge.p2()), to_point(edge.p3()), to_point(edge.p4()));
			}
		}
		if self.is_closed() && self.nodes.len() > 1 {
			path.close_path();
		}
	}

	/// Hull bounds over every anchor and both absolute handles of each node.
	pub fn calc_bounds(nodes: &[Node]) -> Bounds {
		Bounds::from_points(nodes.iter().flat_map(|node| [node.point, node.abs_c1(), node.abs_c2()]))
	}

	fn check_index(&self, index: usize) -> Result<(), DocumentError> {
		if index < self.nodes.len() {
			Ok(())
		} else {
			Err(DocumentError::IndexOutOfBounds { index, len: self.nodes.len() })
		}
	}
}

fn generate_edges(nodes: &[Node], closed: bool) -> Arc<[Edge]> {
	if nodes.len() < 2 {
		return Arc::new([]);
	}

	let open_edges = nodes.windows(2).map(|pair| Edge::new(pair[0], pair[1]));
	let closing_edge = closed.then(|| Edge::new(nodes[nodes.len() - 1], nodes[0]));
	open_edges.chain(closing_edge).collect()
}

fn to_point(point: DVec2) -> Point {
	Point::new(point.x, point.y)
}

#[cfg(test)]
mod tests {
	use super::*;
	use kurbo::PathEl;

	fn square_nodes() -> Vec<Node> {
		[DVec2::new(0., 0.), DVec2::new(10., 0.), DVec2::new(10., 10.), DVec2::new(0., 10.)]
			.into_iter()
			.map(|point| Node::from_point(NodeKind::SOLID_EDGE, point))
			.collect()
	}

	#[test]
	fn edge_count_follows_closedness() {
		let open = Curve::new(CurveKind::empty(), square_nodes());
		assert_eq!(open.edges().len(), 3);

		let closed = open.with_closed(true);
		assert_eq!(closed.edges().len(), 4);
		assert_eq!(closed.edges()[3].start.id(), closed.nodes()[3].id());
		assert_eq!(closed.edges()[3].end.id(), closed.nodes()[0].id());

		assert_eq!(closed.with_closed(false).edges().len(), 3);
	}

	#[test]
	fn edges_are_consecutive_pairs() {
		let curve = Curve::new(CurveKind::empty(), square_nodes());
		for (index, edge) in curve.edges().iter().enumerate() {
			assert_eq!(edge.start, curve.nodes()[index]);
			assert_eq!(edge.end, curve.nodes()[index + 1]);
		}
	}

	#[test]
	fn fewer_than_two_nodes_have_no_edges() {
		let empty = Curve::new(CurveKind::CLOSED, Vec::new());
		assert!(empty.edges().is_empty());
		assert!(empty.bounds().is_none());

		let single = empty.add_node(Node::from_point(NodeKind::empty(), DVec2::ONE));
		assert!(single.edges().is_empty());
		assert_eq!(single.bounds(), Bounds::from_point(DVec2::ONE));
	}

	#[test]
	fn bounds_include_handles() {
		let node = Node::new(NodeKind::CURVE_EDGE, DVec2::ZERO, DVec2::new(5., -3.), DVec2::new(-2., 1.));
		let curve = Curve::new(CurveKind::empty(), vec![node]);
		assert_eq!(curve.bounds(), Bounds::new(DVec2::new(-2., -3.), DVec2::new(5., 1.)));
	}

	#[test]
	fn node_edits_keep_identity() {
		let curve = Curve::new(CurveKind::empty(), square_nodes());
		let extra = Node::from_point(NodeKind::empty(), DVec2::new(20., 20.));

		assert_eq!(curve.add_node(extra).id(), curve.id());
		assert_eq!(curve.insert_node(1, extra).unwrap().id(), curve.id());
		assert_eq!(curve.remove_node(0).unwrap().id(), curve.id());
		assert_eq!(curve.set_node(2, extra).unwrap().id(), curve.id());
		assert_eq!(curve.with_kind(CurveKind::CLOSED).id(), curve.id());
		assert_eq!(curve.clone().id(), curve.id());
		assert_ne!(curve.clone_with_new_id().id(), curve.id());
	}

	#[test]
	fn insert_and_remove_update_geometry() {
		let curve = Curve::new(CurveKind::empty(), square_nodes());
		let far = Node::from_point(NodeKind::empty(), DVec2::new(-5., 30.));

		let inserted = curve.insert_node(4, far).unwrap();
		assert_eq!(inserted.nodes()[4], far);
		assert_eq!(inserted.edges().len(), 4);
		assert_eq!(inserted.bounds(), Bounds::new(DVec2::new(-5., 0.), DVec2::new(10., 30.)));

		let removed = inserted.remove_node(4).unwrap();
		assert_eq!(removed.bounds(), curve.bounds());
		assert_eq!(removed.nodes(), curve.nodes());
	}

	#[test]
	fn index_operations_report_out_of_bounds() {
		let curve = Curve::new(CurveKind::empty(), square_nodes());
		let node = Node::from_point(NodeKind::empty(), DVec2::ZERO);

		assert_eq!(curve.insert_node(5, node), Err(DocumentError::IndexOutOfBounds { index: 5, len: 4 }));
		assert_eq!(curve.remove_node(4), Err(DocumentError::IndexOutOfBounds { index: 4, len: 4 }));
		assert_eq!(curve.set_node(9, node), Err(DocumentError::IndexOutOfBounds { index: 9, len: 4 }));
	}

	#[test]
	fn set_node_recomputes_bounds_when_points_change() {
		let curve = Curve::new(CurveKind::CLOSED, square_nodes());
		let moved = curve.nodes()[2].with_point(DVec2::new(40., 40.));

		let edited = curve.set_node(2, moved).unwrap();
		assert_eq!(edited.bounds(), Bounds::new(DVec2::ZERO, DVec2::new(40., 40.)));
		assert_eq!(edited.edges()[1].end, moved);
		assert_eq!(edited.edges()[2].start, moved);

		let restyled = curve.nodes()[2].with_kind(NodeKind::DASHED_EDGE);
		let edited = curve.set_node(2, restyled).unwrap();
		assert_eq!(edited.bounds(), curve.bounds());
		assert_eq!(edited.edges()[2].kind, NodeKind::DASHED_EDGE);
	}

	#[test]
	fn stale_bounds_hint_is_not_corrected() {
		let curve = Curve::new(CurveKind::empty(), square_nodes());
		let mut nodes = curve.nodes().to_vec();
		nodes[0] = nodes[0].with_point(DVec2::new(-100., -100.));

		let stale = curve.with_nodes_assuming_same_bounds(nodes.clone());
		assert_eq!(stale.bounds(), curve.bounds());
		assert_ne!(stale.bounds(), Curve::calc_bounds(&nodes));

		let fresh = curve.with_nodes(nodes.clone());
		assert_eq!(fresh.bounds(), Curve::calc_bounds(&nodes));
	}

	#[test]
	fn supplied_edges_are_trusted() {
		let curve = Curve::new(CurveKind::empty(), square_nodes());
		let nodes = curve.nodes().to_vec();
		let edges = vec![Edge::new(nodes[0], nodes[1])];

		let custom = curve.with_nodes_and_edges(nodes, edges);
		assert_eq!(custom.edges().len(), 1);
	}

	#[test]
	fn node_lookup_by_id() {
		let curve = Curve::new(CurveKind::empty(), square_nodes());
		let target = curve.nodes()[3];
		assert_eq!(curve.node_by_id(target.id()), Some((3, &target)));
		assert_eq!(curve.node_by_id(ElementId::new()), None);
	}

	#[test]
	fn bez_path_closes_closed_curves() {
		let curve = Curve::new(CurveKind::CLOSED, square_nodes());
		let elements = curve.to_bez_path().elements().to_vec();
		assert_eq!(elements.len(), 6);
		assert_eq!(elements[0], PathEl::MoveTo(Point::new(0., 0.)));
		assert_eq!(elements[4], PathEl::LineTo(Point::new(0., 0.)));
		assert_eq!(elements[5], PathEl::ClosePath);

		let curved = curve.set_node(0, curve.nodes()[0].with_kind(NodeKind::CURVE_EDGE).with_c1(DVec2::new(5., -5.))).unwrap();
		let elements = curved.to_bez_path().elements().to_vec();
		assert_eq!(elements[1], PathEl::CurveTo(Point::new(5., -5.), Point::new(10., 0.), Point::new(10., 0.)));

		assert!(Curve::new(CurveKind::CLOSED, Vec::new()).to_bez_path().elements().is_empty());
	}
}
