use crate::consts::{DEFAULT_STROKE_WIDTH, SOLID_DASH_PATTERN};
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color with channels in `0..=1`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
	pub r: f32,
	pub g: f32,
	pub b: f32,
	pub a: f32,
}

impl Color {
	pub const BLACK: Color = Color::from_rgbaf32(0., 0., 0., 1.);
	pub const WHITE: Color = Color::from_rgbaf32(1., 1., 1., 1.);
	pub const TRANSPARENT: Color = Color::from_rgbaf32(0., 0., 0., 0.);

	pub const fn from_rgbaf32(r: f32, g: f32, b: f32, a: f32) -> Self {
		Self { r, g, b, a }
	}

	pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
		let map = |channel: u8| channel as f32 / 255.;
		Self::from_rgbaf32(map(r), map(g), map(b), map(a))
	}

	/// Lowercase `rrggbbaa` hex string.
	pub fn rgba_hex(&self) -> String {
		let channel = |value: f32| (value.clamp(0., 1.) * 255.).round() as u8;
		format!("{:02x}{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b), channel(self.a))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fill {
	Solid(Color),
}

impl Fill {
	pub fn solid(color: Color) -> Self {
		Self::Solid(color)
	}

	pub fn color(&self) -> Color {
		match self {
			Self::Solid(color) => *color,
		}
	}
}

/// Outline style. Each bit of `dash_pattern` toggles one dash segment on or off, so the solid pattern has every bit set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
	pub color: Color,
	pub width: f64,
	pub dash_pattern: u32,
}

impl Default for Stroke {
	fn default() -> Self {
		Self::BLACK_PEN
	}
}

impl Stroke {
	pub const BLACK_PEN: Stroke = Stroke::new(Color::BLACK);
	pub const WHITE_PEN: Stroke = Stroke::new(Color::WHITE);

	pub const fn new(color: Color) -> Self {
		Self {
			color,
			width: DEFAULT_STROKE_WIDTH,
			dash_pattern: SOLID_DASH_PATTERN,
		}
	}

	#[must_use]
	pub fn with_width(self, width: f64) -> Self {
		Self { width, ..self }
	}

	#[must_use]
	pub fn with_dash_pattern(self, dash_pattern: u32) -> Self {
		Self { dash_pattern, ..self }
	}

	#[must_use]
	pub fn with_color(self, color: Color) -> Self {
		Self { color, ..self }
	}

	pub fn is_dashed(&self) -> bool {
		self.dash_pattern != SOLID_DASH_PATTERN
	}
}
