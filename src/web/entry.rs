// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::page::WebPage;
use crate::config::FormHandlerConfig;
use crate::error::ConfigError;
use crate::interceptor::FormInterceptor;
use crate::transport::ReqwestTransport;
use js_sys::{Function, Reflect};
use leptos::prelude::{document, window};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// ID of the `<script type="application/json">` element holding the page's relay options.
pub const CONFIG_ELEMENT_ID: &str = "form-relay-config";
const CONVERSION_HOOK_NAME: &str = "gtag_form_conversion";

/// Binds the relay once the document has been parsed.
pub fn start_form_relay() {
	if document().ready_state() != "loading" {
		bind_page();
		return;
	}

	let on_ready = Closure::<dyn FnMut()>::once(bind_page);
	if let Err(error) =
		document().add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
	{
		tracing::error!(source = ?error, "Couldn't wait for the document to load");
		return;
	}
	on_ready.forget();
}

fn bind_page() {
	let config = match read_page_config() {
		Ok(config) => config,
		Err(error) => {
			tracing::error!(source = ?error, "Form relay configuration is invalid");
			return;
		}
	};

	let transport = ReqwestTransport::new(config.body_encoding);
	let interceptor = FormInterceptor::new(config, WebPage, transport).with_conversion_hook(call_conversion_hook);
	Rc::new(interceptor).bind();
}

fn read_page_config() -> Result<FormHandlerConfig, ConfigError> {
	let text = document()
		.get_element_by_id(CONFIG_ELEMENT_ID)
		.and_then(|element| element.text_content());

	match text {
		Some(text) => FormHandlerConfig::from_json(&text),
		None => {
			let config = FormHandlerConfig::default();
			config.validate()?;
			Ok(config)
		}
	}
}

/// Calls the page's conversion tracking function if it defines one.
fn call_conversion_hook() {
	let Ok(hook) = Reflect::get(&window(), &JsValue::from_str(CONVERSION_HOOK_NAME)) else {
		return;
	};
	let Ok(hook) = hook.dyn_into::<Function>() else {
		return;
	};
	if let Err(error) = hook.call0(&JsValue::NULL) {
		tracing::warn!(source = ?error, "Conversion tracking hook threw");
	}
}
