use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// Optional per-item data that does not affect identity: a display name and the item's local transform.
///
/// The transform helpers multiply on the right, so `metadata.translate(t).rotate(a)` applies the rotation first when
/// mapping a point and composed transforms read in call order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
	pub name: Option<String>,
	pub transform: DAffine2,
}

impl Default for ItemMetadata {
	fn default() -> Self {
		Self {
			name: None,
			transform: DAffine2::IDENTITY,
		}
	}
}

impl ItemMetadata {
	pub fn new(name: Option<String>, transform: DAffine2) -> Self {
		Self { name, transform }
	}

	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Default::default()
		}
	}

	#[must_use]
	pub fn with_name(&self, name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			transform: self.transform,
		}
	}

	#[must_use]
	pub fn with_transform(&self, transform: DAffine2) -> Self {
		Self { name: self.name.clone(), transform }
	}

	#[must_use]
	pub fn rotate(&self, angle: f64) -> Self {
		self.with_transform(self.transform * DAffine2::from_angle(angle))
	}

	#[must_use]
	pub fn scale(&self, scale: DVec2) -> Self {
		self.with_transform(self.transform * DAffine2::from_scale(scale))
	}

	#[must_use]
	pub fn translate(&self, translation: DVec2) -> Self {
		self.with_transform(self.transform * DAffine2::from_translation(translation))
	}
}
