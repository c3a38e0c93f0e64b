// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::banner::{BANNER_CLASS, BANNER_FADE, BANNER_LIFETIME, Banner};
use crate::fields::FormControl;
use crate::page::{FormHandle, LocalTask, PageAdapter, SubmitEvent, SubmitListener};
use leptos::prelude::{document, set_timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
	Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

const CONTROL_SELECTOR: &str = "input, textarea, select";
const SUBMIT_SELECTOR: &str = "button[type=\"submit\"], input[type=\"submit\"]";

impl SubmitEvent for Event {
	fn prevent_default(&self) {
		Event::prevent_default(self);
	}

	fn stop_propagation(&self) {
		Event::stop_propagation(self);
	}
}

/// The live document.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebPage;

#[derive(Clone, Debug)]
pub struct WebForm {
	element: HtmlFormElement,
}

enum SubmitControl {
	Button(HtmlButtonElement),
	Input(HtmlInputElement),
}

impl WebForm {
	fn submit_control(&self) -> Option<SubmitControl> {
		let element = self.element.query_selector(SUBMIT_SELECTOR).ok().flatten()?;
		match element.dyn_into::<HtmlButtonElement>() {
			Ok(button) => Some(SubmitControl::Button(button)),
			Err(element) => element.dyn_into::<HtmlInputElement>().ok().map(SubmitControl::Input),
		}
	}
}

fn control_from_element(element: Element) -> Option<FormControl> {
	let element = match element.dyn_into::<HtmlInputElement>() {
		Ok(input) => {
			return Some(FormControl {
				name: input.name(),
				control_type: input.type_().to_ascii_lowercase(),
				value: input.value(),
				checked: input.checked(),
			});
		}
		Err(element) => element,
	};
	let element = match element.dyn_into::<HtmlTextAreaElement>() {
		Ok(text_area) => return Some(FormControl::new(text_area.name(), "textarea", text_area.value())),
		Err(element) => element,
	};
	element
		.dyn_into::<HtmlSelectElement>()
		.ok()
		.map(|select| FormControl::new(select.name(), select.type_(), select.value()))
}

impl FormHandle for WebForm {
	fn clear_inline_submit_handler(&self) {
		self.element.set_onsubmit(None);
	}

	fn check_validity(&self) -> bool {
		self.element.check_validity()
	}

	fn report_validity(&self) {
		self.element.report_validity();
	}

	fn controls(&self) -> Vec<FormControl> {
		let Ok(nodes) = self.element.query_selector_all(CONTROL_SELECTOR) else {
			return Vec::new();
		};
		(0..nodes.length())
			.filter_map(|index| nodes.get(index))
			.filter_map(|node| node.dyn_into::<Element>().ok())
			.filter_map(control_from_element)
			.collect()
	}

	fn submit_label(&self) -> Option<String> {
		match self.submit_control()? {
			SubmitControl::Button(button) => Some(button.inner_html()),
			SubmitControl::Input(input) => Some(input.value()),
		}
	}

	fn set_submit_state(&self, disabled: bool, label: &str) {
		match self.submit_control() {
			Some(SubmitControl::Button(button)) => {
				button.set_disabled(disabled);
				button.set_inner_html(label);
			}
			Some(SubmitControl::Input(input)) => {
				input.set_disabled(disabled);
				input.set_value(label);
			}
			None => (),
		}
	}

	fn reset(&self) {
		self.element.reset();
	}
}

impl PageAdapter for WebPage {
	type Form = WebForm;

	fn find_form(&self, form_id: &str) -> Option<Self::Form> {
		let element = document().get_element_by_id(form_id)?;
		match element.dyn_into::<HtmlFormElement>() {
			Ok(element) => Some(WebForm { element }),
			Err(_) => {
				tracing::warn!(form_id, "Element with the configured ID is not a form");
				None
			}
		}
	}

	fn add_submit_listener(&self, form: &Self::Form, listener: SubmitListener) {
		let callback = Closure::<dyn Fn(Event)>::new(move |event: Event| listener(&event));
		if let Err(error) = form
			.element
			.add_event_listener_with_callback("submit", callback.as_ref().unchecked_ref())
		{
			tracing::error!(source = ?error, "Couldn't attach the submit listener");
			return;
		}
		// The listener lives as long as the page does.
		callback.forget();
	}

	fn remove_banner(&self) {
		if let Ok(Some(existing)) = document().query_selector(&format!(".{}", BANNER_CLASS)) {
			existing.remove();
		}
	}

	fn insert_banner_after(&self, form: &Self::Form, banner: &Banner) {
		let Some(parent) = form.element.parent_node() else {
			return;
		};
		let Ok(element) = document().create_element("div") else {
			return;
		};

		element.set_class_name(&banner.class_name());
		if let Err(error) = element.set_attribute("style", &banner.style()) {
			tracing::error!(source = ?error, "Couldn't style the status banner");
		}
		element.set_text_content(Some(banner.message.as_str()));

		if let Err(error) = parent.insert_before(&element, form.element.next_sibling().as_ref()) {
			tracing::error!(source = ?error, "Couldn't insert the status banner");
			return;
		}

		let faded_style = format!("{} {}", banner.style(), Banner::fade_style());
		set_timeout(
			move || {
				if element.parent_node().is_none() {
					return;
				}
				if let Err(error) = element.set_attribute("style", &faded_style) {
					tracing::error!(source = ?error, "Couldn't fade out the status banner");
				}
				set_timeout(
					move || {
						if element.parent_node().is_some() {
							element.remove();
						}
					},
					BANNER_FADE,
				);
			},
			BANNER_LIFETIME,
		);
	}

	fn spawn_local(&self, task: LocalTask) {
		wasm_bindgen_futures::spawn_local(task);
	}
}
