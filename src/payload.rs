// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::FormHandlerConfig;
use crate::fields::SubmissionPayload;
use serde::Serialize;

/// Body sent to the forwarding endpoint. The underscored keys are instructions to the service itself.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RequestPayload {
	pub name: String,
	pub email: String,
	pub phone: String,
	pub project: String,
	pub subject: String,
	pub message: String,
	pub captcha: String,
	#[serde(rename = "_to")]
	pub to: String,
	#[serde(rename = "_subject")]
	pub email_subject: String,
	#[serde(rename = "_template")]
	pub template: String,
	/// Always `"false"`; captcha checking happens on the page, not at the forwarding service.
	#[serde(rename = "_captcha")]
	pub captcha_check: String,
}

impl RequestPayload {
	pub fn build(collected: &SubmissionPayload, config: &FormHandlerConfig) -> Self {
		let defaults = &config.defaults;
		let field = |name: &str, fallback: &str| String::from(collected.get(name).unwrap_or(fallback));

		let project = field("project", &defaults.project);
		let email_subject = format!("{}{}", defaults.subject_prefix, project);
		let phone = format!(
			"{}{}",
			collected.get("phone_code").unwrap_or(&defaults.phone_code),
			collected.get("phone").unwrap_or(&defaults.phone)
		);

		Self {
			name: field("name", &defaults.name),
			email: field("email", &defaults.email),
			phone,
			subject: field("subject", &email_subject),
			message: field("message", &defaults.message),
			captcha: field("captcha", &defaults.captcha),
			to: config.recipient_email.clone(),
			email_subject,
			template: defaults.template.clone(),
			captcha_check: String::from("false"),
			project,
		}
	}

	/// Wire keys and values in the order the forwarding service documents them.
	pub fn pairs(&self) -> [(&'static str, &str); 11] {
		[
			("name", self.name.as_str()),
			("email", self.email.as_str()),
			("phone", self.phone.as_str()),
			("project", self.project.as_str()),
			("subject", self.subject.as_str()),
			("message", self.message.as_str()),
			("captcha", self.captcha.as_str()),
			("_to", self.to.as_str()),
			("_subject", self.email_subject.as_str()),
			("_template", self.template.as_str()),
			("_captcha", self.captcha_check.as_str()),
		]
	}
}
