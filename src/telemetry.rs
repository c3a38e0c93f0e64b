// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "form_relay=info";

/// Logs to stderr for the command-line tool, filtered by `RUST_LOG`.
pub fn init_cli_subscriber() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}

/// Logs to the browser console. Browsers stamp console lines themselves, so no timer is set.
#[cfg(feature = "web")]
pub fn init_console_subscriber() {
	use crate::web::ConsoleMakeWriter;

	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::new(DEFAULT_FILTER))
		.with_writer(ConsoleMakeWriter)
		.with_ansi(false)
		.without_time()
		.try_init();
}
