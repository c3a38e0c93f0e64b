// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use form_relay::config::parse_config;
use form_relay::fields::{FormControl, SubmissionPayload};
use form_relay::interceptor::relay_submission;
use form_relay::telemetry::init_cli_subscriber;
use form_relay::transport::{BodyEncoding, ReqwestTransport};
use miette::{bail, miette};

const DEFAULT_CONFIG_PATH: &str = "config.kdl";
const USAGE: &str = "usage: form-relay [--config <path>] [--multipart] name=value...";

#[derive(Debug)]
struct CliArgs {
	config_path: String,
	multipart: bool,
	controls: Vec<FormControl>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> miette::Result<CliArgs> {
	let mut config_path = String::from(DEFAULT_CONFIG_PATH);
	let mut multipart = false;
	let mut controls = Vec::new();

	let mut args = args.into_iter();
	while let Some(arg) = args.next() {
		match arg.as_str() {
			"--config" => {
				config_path = args.next().ok_or_else(|| miette!("--config needs a path\n{}", USAGE))?;
			}
			"--multipart" => multipart = true,
			"--help" | "-h" => bail!("{}", USAGE),
			field => {
				let Some((name, value)) = field.split_once('=') else {
					bail!("expected a name=value field, got `{}`\n{}", field, USAGE);
				};
				controls.push(FormControl::text(name, value));
			}
		}
	}

	Ok(CliArgs {
		config_path,
		multipart,
		controls,
	})
}

#[tokio::main]
async fn main() -> miette::Result<()> {
	init_cli_subscriber();

	let args = parse_args(std::env::args().skip(1))?;
	let mut config = parse_config(&args.config_path).await?;
	if args.multipart {
		config.body_encoding = BodyEncoding::Multipart;
	}
	if !config.enabled {
		bail!("the form relay is disabled in {}", args.config_path);
	}

	let collected = SubmissionPayload::collect(&args.controls, &config.recipient_email);
	let transport = ReqwestTransport::new(config.body_encoding);
	let result = relay_submission(&config, &collected, &transport).await;

	let banner_text = match result.banner(&config) {
		Some(banner) => banner.message,
		None => String::from(result.message().unwrap_or_default()),
	};
	if result.is_success() {
		println!("{}", banner_text);
		Ok(())
	} else {
		Err(miette!("{}", banner_text))
	}
}
