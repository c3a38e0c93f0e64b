// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod banner;
pub mod config;
pub mod error;
pub mod fields;
pub mod interceptor;
pub mod page;
pub mod payload;
pub mod telemetry;
pub mod transport;
#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "web")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn start() {
	console_error_panic_hook::set_once();
	telemetry::init_console_subscriber();
	web::start_form_relay();
}
