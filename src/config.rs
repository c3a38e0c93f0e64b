// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ConfigError;
use crate::transport::BodyEncoding;
use knus::Decode;
#[cfg(feature = "cli")]
use miette::IntoDiagnostic;
use serde::Deserialize;
#[cfg(feature = "cli")]
use tokio::fs::read_to_string;

pub const DEFAULT_FORM_ID: &str = "detail_contact_form";
pub const DEFAULT_ENDPOINT: &str = "https://formsubmit.co/ajax/";
pub const DEFAULT_SUCCESS_MESSAGE: &str =
	"Thank you! Your message has been sent successfully. We will get back to you soon.";
pub const DEFAULT_ERROR_MESSAGE: &str =
	"Sorry, there was an error sending your message. Please try again or contact us directly.";

const DEFAULT_VISITOR_NAME: &str = "Website Visitor";
const DEFAULT_VISITOR_EMAIL: &str = "noreply@bigsharkdeveloper.com";
const DEFAULT_PHONE_CODE: &str = "+91-";
const DEFAULT_PHONE: &str = "Not provided";
const DEFAULT_PROJECT: &str = "Property Inquiry";
const DEFAULT_MESSAGE: &str = "No message provided";
const DEFAULT_CAPTCHA: &str = "Not verified";
const DEFAULT_SUBJECT_PREFIX: &str = "New Property Inquiry: ";
const DEFAULT_TEMPLATE: &str = "box";

/// Options for one relayed form.
///
/// Pages embed these as JSON with camelCase keys; the command-line tool reads them from KDL,
/// one kebab-case node per option.
#[derive(Clone, Debug, Decode, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FormHandlerConfig {
	#[knus(child, unwrap(argument), default = true)]
	pub enabled: bool,
	#[knus(child, unwrap(argument), default)]
	pub recipient_email: String,
	#[knus(child, unwrap(argument), default = DEFAULT_FORM_ID.into())]
	pub form_id: String,
	#[knus(child, unwrap(argument), default = true)]
	pub show_success_message: bool,
	#[knus(child, unwrap(argument), default = true)]
	pub show_error_message: bool,
	#[knus(child, unwrap(argument), default = DEFAULT_SUCCESS_MESSAGE.into())]
	pub success_message: String,
	#[knus(child, unwrap(argument), default = DEFAULT_ERROR_MESSAGE.into())]
	pub error_message: String,
	#[knus(child, unwrap(argument), default = DEFAULT_ENDPOINT.into())]
	pub form_submit_endpoint: String,
	#[knus(child, unwrap(argument), default)]
	pub body_encoding: BodyEncoding,
	#[knus(child, default)]
	pub defaults: PayloadDefaults,
}

impl Default for FormHandlerConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			recipient_email: String::new(),
			form_id: String::from(DEFAULT_FORM_ID),
			show_success_message: true,
			show_error_message: true,
			success_message: String::from(DEFAULT_SUCCESS_MESSAGE),
			error_message: String::from(DEFAULT_ERROR_MESSAGE),
			form_submit_endpoint: String::from(DEFAULT_ENDPOINT),
			body_encoding: BodyEncoding::default(),
			defaults: PayloadDefaults::default(),
		}
	}
}

/// Values substituted into the outgoing request when the visitor left a field out.
#[derive(Clone, Debug, Decode, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PayloadDefaults {
	#[knus(child, unwrap(argument), default = DEFAULT_VISITOR_NAME.into())]
	pub name: String,
	#[knus(child, unwrap(argument), default = DEFAULT_VISITOR_EMAIL.into())]
	pub email: String,
	#[knus(child, unwrap(argument), default = DEFAULT_PHONE_CODE.into())]
	pub phone_code: String,
	#[knus(child, unwrap(argument), default = DEFAULT_PHONE.into())]
	pub phone: String,
	#[knus(child, unwrap(argument), default = DEFAULT_PROJECT.into())]
	pub project: String,
	#[knus(child, unwrap(argument), default = DEFAULT_MESSAGE.into())]
	pub message: String,
	#[knus(child, unwrap(argument), default = DEFAULT_CAPTCHA.into())]
	pub captcha: String,
	#[knus(child, unwrap(argument), default = DEFAULT_SUBJECT_PREFIX.into())]
	pub subject_prefix: String,
	#[knus(child, unwrap(argument), default = DEFAULT_TEMPLATE.into())]
	pub template: String,
}

impl Default for PayloadDefaults {
	fn default() -> Self {
		Self {
			name: String::from(DEFAULT_VISITOR_NAME),
			email: String::from(DEFAULT_VISITOR_EMAIL),
			phone_code: String::from(DEFAULT_PHONE_CODE),
			phone: String::from(DEFAULT_PHONE),
			project: String::from(DEFAULT_PROJECT),
			message: String::from(DEFAULT_MESSAGE),
			captcha: String::from(DEFAULT_CAPTCHA),
			subject_prefix: String::from(DEFAULT_SUBJECT_PREFIX),
			template: String::from(DEFAULT_TEMPLATE),
		}
	}
}

impl FormHandlerConfig {
	pub fn new(recipient_email: impl Into<String>) -> Self {
		Self {
			recipient_email: recipient_email.into(),
			..Self::default()
		}
	}

	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Parses a KDL document with one node per option, e.g. `recipient-email "me@example.com"`.
	/// Payload defaults go in a `defaults { ... }` block.
	pub fn from_kdl(file_name: &str, text: &str) -> Result<Self, ConfigError> {
		let config: Self = knus::parse(file_name, text)?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects configurations that can't address a submission. A disabled relay is always valid.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.enabled {
			return Ok(());
		}
		if self.recipient_email.trim().is_empty() {
			return Err(ConfigError::MissingRecipient);
		}
		if self.form_submit_endpoint.trim().is_empty() {
			return Err(ConfigError::MissingEndpoint);
		}
		Ok(())
	}

	/// The forwarding service addresses the inbox by appending it to the endpoint.
	pub fn endpoint_url(&self) -> String {
		format!("{}{}", self.form_submit_endpoint, self.recipient_email)
	}
}

#[cfg(feature = "cli")]
pub async fn parse_config(config_path: &str) -> miette::Result<FormHandlerConfig> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	let config = FormHandlerConfig::from_kdl(config_path, &config_file_contents)?;
	Ok(config)
}
