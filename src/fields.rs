// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

/// Key under which the configured recipient is added to every collected payload.
pub const RECIPIENT_KEY: &str = "to_email";

const SKIPPED_CONTROL_TYPES: [&str; 3] = ["submit", "button", "file"];

/// Snapshot of one input, textarea, or select control as the page reports it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormControl {
	pub name: String,
	/// Lower-cased `type` of the control (`text`, `checkbox`, `textarea`, `select-one`, ...)
	pub control_type: String,
	pub value: String,
	pub checked: bool,
}

impl FormControl {
	pub fn new(name: impl Into<String>, control_type: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			control_type: control_type.into().to_ascii_lowercase(),
			value: value.into(),
			checked: false,
		}
	}

	pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(name, "text", value)
	}

	pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
		Self {
			checked,
			..Self::new(name, "checkbox", value)
		}
	}

	pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
		Self {
			checked,
			..Self::new(name, "radio", value)
		}
	}

	fn is_toggle(&self) -> bool {
		self.control_type == "checkbox" || self.control_type == "radio"
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormField {
	pub name: String,
	pub value: String,
}

impl FormField {
	/// Returns the field a control contributes, if any.
	///
	/// Buttons and file pickers never contribute, unchecked checkboxes and radios don't either,
	/// and neither do unnamed controls or controls whose value is empty.
	pub fn from_control(control: &FormControl) -> Option<Self> {
		if SKIPPED_CONTROL_TYPES.contains(&control.control_type.as_str()) {
			return None;
		}
		if control.is_toggle() && !control.checked {
			return None;
		}
		if control.name.is_empty() || control.value.is_empty() {
			return None;
		}

		Some(Self {
			name: control.name.clone(),
			value: control.value.clone(),
		})
	}
}

/// Field values gathered from one form submission.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubmissionPayload {
	fields: BTreeMap<String, String>,
}

impl SubmissionPayload {
	pub fn collect<'a>(controls: impl IntoIterator<Item = &'a FormControl>, recipient_email: &str) -> Self {
		let mut fields: BTreeMap<String, String> = controls
			.into_iter()
			.filter_map(FormField::from_control)
			.map(|field| (field.name, field.value))
			.collect();
		fields.insert(String::from(RECIPIENT_KEY), String::from(recipient_email));
		Self { fields }
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.fields.get(name).map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.fields.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}
}
