// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

/// Class shared by every status banner; at most one element carries it at a time.
pub const BANNER_CLASS: &str = "form-submit-message";
/// How long a banner stays fully visible before fading.
pub const BANNER_LIFETIME: Duration = Duration::from_secs(5);
pub const BANNER_FADE: Duration = Duration::from_millis(500);

const BASE_STYLE: &str = "padding: 15px; margin: 15px 0; border-radius: 4px; font-weight: 500;";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BannerKind {
	Success,
	Error,
}

impl BannerKind {
	pub fn modifier(self) -> &'static str {
		match self {
			Self::Success => "success",
			Self::Error => "error",
		}
	}

	/// Background, text, and border colours.
	fn palette(self) -> (&'static str, &'static str, &'static str) {
		match self {
			Self::Success => ("#d4edda", "#155724", "1px solid #c3e6cb"),
			Self::Error => ("#f8d7da", "#721c24", "1px solid #f5c6cb"),
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Banner {
	pub kind: BannerKind,
	pub message: String,
}

impl Banner {
	pub fn success(message: impl Into<String>) -> Self {
		Self {
			kind: BannerKind::Success,
			message: message.into(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			kind: BannerKind::Error,
			message: message.into(),
		}
	}

	pub fn class_name(&self) -> String {
		format!("{} form-submit-{}", BANNER_CLASS, self.kind.modifier())
	}

	pub fn style(&self) -> String {
		let (background, color, border) = self.kind.palette();
		format!(
			"{} background-color: {}; color: {}; border: {};",
			BASE_STYLE, background, color, border
		)
	}

	/// Style applied once the banner's lifetime is up.
	pub fn fade_style() -> String {
		format!("transition: opacity {}s; opacity: 0;", BANNER_FADE.as_secs_f32())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn class_name_marks_the_variant() {
		assert_eq!(Banner::success("ok").class_name(), "form-submit-message form-submit-success");
		assert_eq!(Banner::error("no").class_name(), "form-submit-message form-submit-error");
	}

	#[test]
	fn variants_are_styled_differently() {
		let success = Banner::success("ok").style();
		let error = Banner::error("no").style();
		assert!(success.starts_with(BASE_STYLE));
		assert!(success.contains("background-color: #d4edda"));
		assert!(success.contains("color: #155724"));
		assert!(error.contains("background-color: #f8d7da"));
		assert!(error.contains("border: 1px solid #f5c6cb"));
	}

	#[test]
	fn fade_takes_half_a_second() {
		assert_eq!(Banner::fade_style(), "transition: opacity 0.5s; opacity: 0;");
	}
}
