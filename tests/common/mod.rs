// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory page and transport used to drive the interceptor without a browser.

#![allow(dead_code)]

use async_trait::async_trait;
use form_relay::banner::Banner;
use form_relay::error::TransportError;
use form_relay::fields::FormControl;
use form_relay::page::{FormHandle, LocalTask, PageAdapter, SubmitEvent, SubmitListener};
use form_relay::payload::RequestPayload;
use form_relay::transport::{ForwardingResponse, SubmissionTransport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const RECIPIENT: &str = "owner@example.com";
pub const FORM_ID: &str = "detail_contact_form";
pub const SUBMIT_LABEL: &str = "Send <b>message</b>";

#[derive(Default)]
pub struct FakeEvent {
	pub prevented: Cell<bool>,
	pub stopped: Cell<bool>,
}

impl SubmitEvent for FakeEvent {
	fn prevent_default(&self) {
		self.prevented.set(true);
	}

	fn stop_propagation(&self) {
		self.stopped.set(true);
	}
}

pub struct FormState {
	initial_controls: Vec<FormControl>,
	controls: RefCell<Vec<FormControl>>,
	pub valid: Cell<bool>,
	pub inline_handler: Cell<bool>,
	pub validity_reports: Cell<u32>,
	pub submit_label: RefCell<Option<String>>,
	pub submit_disabled: Cell<bool>,
	/// Every label the submit control has shown, oldest first.
	pub label_history: RefCell<Vec<String>>,
}

#[derive(Clone)]
pub struct FakeForm(pub Rc<FormState>);

impl FakeForm {
	/// A form whose controls start out with the given values.
	pub fn new(controls: Vec<FormControl>) -> Self {
		Self(Rc::new(FormState {
			initial_controls: controls.clone(),
			controls: RefCell::new(controls),
			valid: Cell::new(true),
			inline_handler: Cell::new(true),
			validity_reports: Cell::new(0),
			submit_label: RefCell::new(Some(String::from(SUBMIT_LABEL))),
			submit_disabled: Cell::new(false),
			label_history: RefCell::new(Vec::new()),
		}))
	}

	/// The usual contact form, empty.
	pub fn contact() -> Self {
		Self::new(vec![
			FormControl::text("name", ""),
			FormControl::new("email", "email", ""),
			FormControl::text("phone_code", ""),
			FormControl::new("phone", "tel", ""),
			FormControl::new("message", "textarea", ""),
			FormControl::checkbox("newsletter", "yes", false),
			FormControl::new("send", "submit", SUBMIT_LABEL),
		])
	}

	pub fn without_submit_control(self) -> Self {
		*self.0.submit_label.borrow_mut() = None;
		self
	}

	pub fn fill(&self, name: &str, value: &str) {
		for control in self.0.controls.borrow_mut().iter_mut() {
			if control.name == name {
				control.value = String::from(value);
			}
		}
	}

	pub fn check(&self, name: &str) {
		for control in self.0.controls.borrow_mut().iter_mut() {
			if control.name == name {
				control.checked = true;
			}
		}
	}

	pub fn value_of(&self, name: &str) -> Option<String> {
		self.0
			.controls
			.borrow()
			.iter()
			.find(|control| control.name == name)
			.map(|control| control.value.clone())
	}

	pub fn label(&self) -> Option<String> {
		self.0.submit_label.borrow().clone()
	}
}

impl FormHandle for FakeForm {
	fn clear_inline_submit_handler(&self) {
		self.0.inline_handler.set(false);
	}

	fn check_validity(&self) -> bool {
		self.0.valid.get()
	}

	fn report_validity(&self) {
		self.0.validity_reports.set(self.0.validity_reports.get() + 1);
	}

	fn controls(&self) -> Vec<FormControl> {
		self.0.controls.borrow().clone()
	}

	fn submit_label(&self) -> Option<String> {
		self.label()
	}

	fn set_submit_state(&self, disabled: bool, label: &str) {
		let mut current = self.0.submit_label.borrow_mut();
		if current.is_none() {
			return;
		}
		*current = Some(String::from(label));
		self.0.submit_disabled.set(disabled);
		self.0.label_history.borrow_mut().push(String::from(label));
	}

	fn reset(&self) {
		*self.0.controls.borrow_mut() = self.0.initial_controls.clone();
	}
}

#[derive(Default)]
pub struct PageState {
	forms: RefCell<Vec<(String, FakeForm)>>,
	listeners: RefCell<Vec<SubmitListener>>,
	banners: RefCell<Vec<Banner>>,
	tasks: RefCell<Vec<LocalTask>>,
	mutations: Cell<u32>,
}

#[derive(Clone, Default)]
pub struct FakePage(pub Rc<PageState>);

impl FakePage {
	pub fn with_form(form_id: &str, form: FakeForm) -> Self {
		let page = Self::default();
		page.0.forms.borrow_mut().push((String::from(form_id), form));
		page
	}

	/// Fires a submit event at every attached listener and hands the event back for inspection.
	pub fn submit(&self) -> FakeEvent {
		let event = FakeEvent::default();
		for listener in self.0.listeners.borrow().iter() {
			listener(&event);
		}
		event
	}

	/// Runs every spawned task to completion.
	pub async fn run_tasks(&self) {
		let tasks: Vec<LocalTask> = self.0.tasks.borrow_mut().drain(..).collect();
		for task in tasks {
			task.await;
		}
	}

	pub fn listener_count(&self) -> usize {
		self.0.listeners.borrow().len()
	}

	pub fn banners(&self) -> Vec<Banner> {
		self.0.banners.borrow().clone()
	}

	/// Number of changes made to the document through this page.
	pub fn mutations(&self) -> u32 {
		self.0.mutations.get()
	}

	fn record_mutation(&self) {
		self.0.mutations.set(self.0.mutations.get() + 1);
	}
}

impl PageAdapter for FakePage {
	type Form = FakeForm;

	fn find_form(&self, form_id: &str) -> Option<Self::Form> {
		self.0
			.forms
			.borrow()
			.iter()
			.find(|(id, _)| id == form_id)
			.map(|(_, form)| form.clone())
	}

	fn add_submit_listener(&self, _form: &Self::Form, listener: SubmitListener) {
		self.record_mutation();
		self.0.listeners.borrow_mut().push(listener);
	}

	fn remove_banner(&self) {
		let mut banners = self.0.banners.borrow_mut();
		if !banners.is_empty() {
			banners.clear();
			self.record_mutation();
		}
	}

	fn insert_banner_after(&self, _form: &Self::Form, banner: &Banner) {
		self.record_mutation();
		self.0.banners.borrow_mut().push(banner.clone());
	}

	fn spawn_local(&self, task: LocalTask) {
		self.0.tasks.borrow_mut().push(task);
	}
}

pub enum StubReply {
	Respond(ForwardingResponse),
	Fail,
}

/// Transport that records requests and answers with a canned reply.
pub struct StubTransport {
	reply: StubReply,
	pub requests: Rc<RefCell<Vec<(String, RequestPayload)>>>,
}

impl StubTransport {
	pub fn new(reply: StubReply) -> Self {
		Self {
			reply,
			requests: Rc::new(RefCell::new(Vec::new())),
		}
	}

	pub fn accepting() -> Self {
		Self::new(StubReply::Respond(ForwardingResponse {
			success: true,
			message: None,
		}))
	}

	pub fn rejecting(message: &str) -> Self {
		Self::new(StubReply::Respond(ForwardingResponse {
			success: false,
			message: Some(String::from(message)),
		}))
	}

	pub fn failing() -> Self {
		Self::new(StubReply::Fail)
	}
}

#[async_trait(?Send)]
impl SubmissionTransport for StubTransport {
	async fn send(&self, url: &str, payload: &RequestPayload) -> Result<ForwardingResponse, TransportError> {
		self.requests.borrow_mut().push((String::from(url), payload.clone()));
		match &self.reply {
			StubReply::Respond(response) => Ok(response.clone()),
			StubReply::Fail => {
				let source = serde_json::from_str::<ForwardingResponse>("<html>Bad Gateway</html>").unwrap_err();
				Err(TransportError::Decode { status: 502, source })
			}
		}
	}
}
