// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum ConfigError {
	#[error("form relay configuration is not valid JSON")]
	Json(#[from] serde_json::Error),
	#[error(transparent)]
	#[diagnostic(transparent)]
	Kdl(#[from] knus::Error),
	#[error("a recipient email is required while the form relay is enabled")]
	#[diagnostic(help("set `recipient-email` to the address that should receive submissions"))]
	MissingRecipient,
	#[error("the form submit endpoint must not be empty")]
	MissingEndpoint,
}

/// Failures talking to the forwarding endpoint. Remote rejections are not errors; they decode normally.
#[derive(Debug, Diagnostic, Error)]
pub enum TransportError {
	#[error("request to the forwarding endpoint failed")]
	Request(#[source] reqwest::Error),
	#[error("forwarding endpoint answered HTTP {status} with a body that is not a status object")]
	Decode {
		status: u16,
		#[source]
		source: serde_json::Error,
	},
}
