use glam::DVec2;

/// Axis aligned bounding box stored as its two corners.
///
/// [`Bounds::NONE`] has inverted corners and is the identity of [`Bounds::union`], so it is the starting value when
/// folding over children. [`Bounds::INFINITY`] covers the whole plane.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
	pub min: DVec2,
	pub max: DVec2,
}

impl Default for Bounds {
	fn default() -> Self {
		Self::NONE
	}
}

impl Bounds {
	pub const NONE: Self = Self {
		min: DVec2::INFINITY,
		max: DVec2::NEG_INFINITY,
	};
	pub const INFINITY: Self = Self {
		min: DVec2::NEG_INFINITY,
		max: DVec2::INFINITY,
	};

	/// Creates bounds from two arbitrary corners.
	pub fn new(a: DVec2, b: DVec2) -> Self {
		Self { min: a.min(b), max: a.max(b) }
	}

	pub fn from_point(point: DVec2) -> Self {
		Self { min: point, max: point }
	}

	pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Self {
		points.into_iter().fold(Self::NONE, Self::include_point)
	}

	/// Union fold over any number of bounds, starting from [`Bounds::NONE`].
	pub fn union_all(bounds: impl IntoIterator<Item = Bounds>) -> Self {
		bounds.into_iter().fold(Self::NONE, |acc, bounds| acc.union(bounds))
	}

	#[must_use]
	pub fn union(self, other: Self) -> Self {
		Self {
			min: self.min.min(other.min),
			max: self.max.max(other.max),
		}
	}

	#[must_use]
	pub fn include_point(self, point: DVec2) -> Self {
		Self {
			min: self.min.min(point),
			max: self.max.max(point),
		}
	}

	/// True when the box encloses nothing, as is the case for [`Bounds::NONE`].
	pub fn is_none(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y
	}

	pub fn center(&self) -> DVec2 {
		(self.min + self.max) * 0.5
	}

	pub fn size(&self) -> DVec2 {
		self.max - self.min
	}

	pub fn width(&self) -> f64 {
		self.max.x - self.min.x
	}

	pub fn height(&self) -> f64 {
		self.max.y - self.min.y
	}

	pub fn contains_point(&self, point: DVec2) -> bool {
		point.cmpge(self.min).all() && point.cmple(self.max).all()
	}

	pub fn intersects(&self, other: &Self) -> bool {
		!self.is_none() && !other.is_none() && self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
	}
}

impl From<Bounds> for kurbo::Rect {
	fn from(bounds: Bounds) -> Self {
		kurbo::Rect::new(bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn none_is_the_union_identity() {
		let bounds = Bounds::new(DVec2::new(4., 3.), DVec2::new(-1., 2.));
		assert_eq!(Bounds::NONE.union(bounds), bounds);
		assert_eq!(bounds.union(Bounds::NONE), bounds);
		assert!(Bounds::NONE.is_none());
		assert!(!bounds.is_none());
	}

	#[test]
	fn new_normalizes_corners() {
		let bounds = Bounds::new(DVec2::new(4., 3.), DVec2::new(-1., 2.));
		assert_eq!(bounds.min, DVec2::new(-1., 2.));
		assert_eq!(bounds.max, DVec2::new(4., 3.));
	}

	#[test]
	fn union_of_disjoint_boxes() {
		let a = Bounds::new(DVec2::ZERO, DVec2::ONE);
		let b = Bounds::new(DVec2::new(5., -2.), DVec2::new(6., 0.5));
		let union = a.union(b);
		assert_eq!(union, Bounds::new(DVec2::new(0., -2.), DVec2::new(6., 1.)));
		assert_eq!(Bounds::union_all([a, b]), union);
		assert_eq!(union.center(), DVec2::new(3., -0.5));
		assert_eq!(union.width(), 6.);
		assert_eq!(union.height(), 3.);
	}

	#[test]
	fn infinity_covers_everything() {
		assert!(Bounds::INFINITY.contains_point(DVec2::new(1e300, -1e300)));
		assert_eq!(Bounds::INFINITY.union(Bounds::from_point(DVec2::ONE)), Bounds::INFINITY);
	}

	#[test]
	fn from_points() {
		let bounds = Bounds::from_points([DVec2::new(1., 1.), DVec2::new(-3., 2.), DVec2::new(0., 5.)]);
		assert_eq!(bounds, Bounds::new(DVec2::new(-3., 1.), DVec2::new(1., 5.)));
		assert!(Bounds::from_points([]).is_none());
	}

	#[test]
	fn intersection() {
		let a = Bounds::new(DVec2::ZERO, DVec2::splat(2.));
		let b = Bounds::new(DVec2::ONE, DVec2::splat(3.));
		let c = Bounds::new(DVec2::splat(5.), DVec2::splat(6.));
		assert!(a.intersects(&b));
		assert!(!a.intersects(&c));
		assert!(!a.intersects(&Bounds::NONE));
	}

	#[test]
	fn into_kurbo_rect() {
		let rect: kurbo::Rect = Bounds::new(DVec2::new(1., 2.), DVec2::new(4., 8.)).into();
		assert_eq!(rect, kurbo::Rect::new(1., 2., 4., 8.));
		assert_eq!(rect.area(), 18.);
	}
}
