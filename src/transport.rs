// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::banner::Banner;
use crate::config::FormHandlerConfig;
use crate::error::TransportError;
use crate::payload::RequestPayload;
use async_trait::async_trait;
use knus::DecodeScalar;
use reqwest::Client;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Shown instead of the configured error text when the endpoint couldn't be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";
pub const SENT_MESSAGE: &str = "Email sent successfully";

/// How the request body is encoded. Both encodings carry the same keys and produce the same results.
#[derive(Clone, Copy, Debug, Default, DecodeScalar, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum BodyEncoding {
	#[default]
	UrlEncoded,
	Multipart,
}

impl FromStr for BodyEncoding {
	type Err = ();

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"url-encoded" | "urlEncoded" => Ok(Self::UrlEncoded),
			"multipart" => Ok(Self::Multipart),
			_ => Err(()),
		}
	}
}

/// Status object the forwarding endpoint answers with.
///
/// Fields of an unexpected type are treated as absent so a malformed rejection still shows as a rejection.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ForwardingResponse {
	#[serde(default, deserialize_with = "deserialize_flag")]
	pub success: bool,
	#[serde(default, deserialize_with = "deserialize_text")]
	pub message: Option<String>,
}

/// FormSubmit sends `"success": "true"` as a string; other services send a real boolean.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::Bool(flag) => flag,
		Value::String(text) => text.eq_ignore_ascii_case("true"),
		_ => false,
	})
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(text) => Some(text),
		_ => None,
	})
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionResult {
	Success { message: Option<String> },
	Failure { message: Option<String> },
}

impl SubmissionResult {
	pub fn from_response(response: ForwardingResponse, default_error: &str) -> Self {
		if response.success {
			return Self::Success {
				message: Some(String::from(SENT_MESSAGE)),
			};
		}

		let message = response
			.message
			.filter(|message| !message.is_empty())
			.unwrap_or_else(|| String::from(default_error));
		Self::Failure { message: Some(message) }
	}

	/// Folds a transport outcome into a result, logging transport failures.
	pub fn from_transport(outcome: Result<ForwardingResponse, TransportError>, default_error: &str) -> Self {
		match outcome {
			Ok(response) => Self::from_response(response, default_error),
			Err(error) => {
				tracing::error!(source = ?error, "Form submission error");
				Self::Failure {
					message: Some(String::from(NETWORK_ERROR_MESSAGE)),
				}
			}
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	pub fn message(&self) -> Option<&str> {
		match self {
			Self::Success { message } | Self::Failure { message } => message.as_deref(),
		}
	}

	/// The banner to show for this result, if the configuration wants one.
	pub fn banner(&self, config: &FormHandlerConfig) -> Option<Banner> {
		match self {
			Self::Success { .. } if config.show_success_message => Some(Banner::success(&config.success_message)),
			Self::Failure { message } if config.show_error_message => Some(Banner::error(
				message.as_deref().unwrap_or(&config.error_message),
			)),
			_ => None,
		}
	}
}

/// Delivers a request payload to the forwarding endpoint and decodes its status object.
#[async_trait(?Send)]
pub trait SubmissionTransport {
	async fn send(&self, url: &str, payload: &RequestPayload) -> Result<ForwardingResponse, TransportError>;
}

pub struct ReqwestTransport {
	client: Client,
	encoding: BodyEncoding,
}

impl ReqwestTransport {
	pub fn new(encoding: BodyEncoding) -> Self {
		Self::with_client(Client::new(), encoding)
	}

	pub fn with_client(client: Client, encoding: BodyEncoding) -> Self {
		Self { client, encoding }
	}

	pub fn encoding(&self) -> BodyEncoding {
		self.encoding
	}
}

#[async_trait(?Send)]
impl SubmissionTransport for ReqwestTransport {
	#[tracing::instrument(skip(self, payload), fields(encoding = ?self.encoding))]
	async fn send(&self, url: &str, payload: &RequestPayload) -> Result<ForwardingResponse, TransportError> {
		let request = self.client.post(url).header(ACCEPT, "application/json");
		let request = match self.encoding {
			BodyEncoding::UrlEncoded => request.form(payload),
			BodyEncoding::Multipart => {
				let form = payload
					.pairs()
					.into_iter()
					.fold(Form::new(), |form, (key, value)| form.text(key, String::from(value)));
				request.multipart(form)
			}
		};

		let response = request.send().await.map_err(TransportError::Request)?;
		let status = response.status();
		if !status.is_success() {
			tracing::warn!(status = status.as_u16(), "Forwarding endpoint answered with a non-success status");
		}

		let body = response.bytes().await.map_err(TransportError::Request)?;
		serde_json::from_slice(&body).map_err(|source| TransportError::Decode {
			status: status.as_u16(),
			source,
		})
	}
}
