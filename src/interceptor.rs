// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::banner::Banner;
use crate::config::FormHandlerConfig;
use crate::fields::SubmissionPayload;
use crate::page::{FormHandle, PageAdapter, SubmitEvent};
use crate::payload::RequestPayload;
use crate::transport::{SubmissionResult, SubmissionTransport};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

pub const SENDING_LABEL: &str = "Sending...";

type ConversionHook = Box<dyn Fn()>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
	/// The form failed its own constraints; nothing was sent.
	Invalid,
	Completed(SubmissionResult),
}

/// A submission that passed validation and is waiting on the network.
#[derive(Debug)]
pub struct PendingSubmission<F> {
	form: F,
	collected: SubmissionPayload,
	original_label: Option<String>,
}

impl<F> PendingSubmission<F> {
	pub fn collected(&self) -> &SubmissionPayload {
		&self.collected
	}
}

/// Builds the request for a collected payload, sends it, and interprets the answer.
pub async fn relay_submission<T: SubmissionTransport + ?Sized>(
	config: &FormHandlerConfig,
	collected: &SubmissionPayload,
	transport: &T,
) -> SubmissionResult {
	let payload = RequestPayload::build(collected, config);
	tracing::debug!(?payload, "Relaying form submission");
	let outcome = transport.send(&config.endpoint_url(), &payload).await;
	SubmissionResult::from_transport(outcome, &config.error_message)
}

pub struct FormInterceptor<P, T> {
	config: FormHandlerConfig,
	page: P,
	transport: T,
	conversion_hook: Option<ConversionHook>,
}

impl<P, T> FormInterceptor<P, T>
where
	P: PageAdapter + 'static,
	T: SubmissionTransport + 'static,
{
	pub fn new(config: FormHandlerConfig, page: P, transport: T) -> Self {
		Self {
			config,
			page,
			transport,
			conversion_hook: None,
		}
	}

	/// Sets a callback run on every submit attempt before validation, for conversion tracking.
	pub fn with_conversion_hook(mut self, hook: impl Fn() + 'static) -> Self {
		self.conversion_hook = Some(Box::new(hook));
		self
	}

	pub fn config(&self) -> &FormHandlerConfig {
		&self.config
	}

	pub fn page(&self) -> &P {
		&self.page
	}

	/// Attaches the relay to the configured form.
	///
	/// A page without that form is left untouched; the relay may be included on pages that don't carry it.
	pub fn bind(self: &Rc<Self>) -> Option<P::Form> {
		if !self.config.enabled {
			tracing::debug!("Form relay is disabled");
			return None;
		}

		let Some(form) = self.page.find_form(&self.config.form_id) else {
			tracing::warn!(form_id = %self.config.form_id, "Form with the configured ID not found");
			return None;
		};

		form.clear_inline_submit_handler();

		let interceptor = Rc::clone(self);
		let bound_form = form.clone();
		self.page.add_submit_listener(
			&form,
			Box::new(move |event: &dyn SubmitEvent| {
				let Some(pending) = interceptor.intercept(&bound_form, event) else {
					return;
				};
				let task_interceptor = Rc::clone(&interceptor);
				interceptor.page.spawn_local(Box::pin(async move {
					task_interceptor.complete(pending).await;
				}));
			}),
		);

		tracing::debug!(form_id = %self.config.form_id, "Form relay bound");
		Some(form)
	}

	/// Runs the part of submit handling that has to happen inside the event callback.
	///
	/// Returns `None` when the form is invalid; the browser has been asked to show why.
	pub fn intercept(&self, form: &P::Form, event: &dyn SubmitEvent) -> Option<PendingSubmission<P::Form>> {
		event.prevent_default();
		event.stop_propagation();

		self.run_conversion_hook();

		if !form.check_validity() {
			form.report_validity();
			return None;
		}

		let collected = SubmissionPayload::collect(&form.controls(), &self.config.recipient_email);

		let original_label = form.submit_label();
		if original_label.is_some() {
			form.set_submit_state(true, SENDING_LABEL);
		}

		Some(PendingSubmission {
			form: form.clone(),
			collected,
			original_label,
		})
	}

	/// Sends an intercepted submission and reports the outcome on the page.
	pub async fn complete(&self, pending: PendingSubmission<P::Form>) -> SubmissionResult {
		let PendingSubmission {
			form,
			collected,
			original_label,
		} = pending;

		let result = relay_submission(&self.config, &collected, &self.transport).await;

		if let Some(label) = original_label {
			form.set_submit_state(false, &label);
		}

		if result.is_success() {
			tracing::info!(form_id = %self.config.form_id, "Form submission relayed");
		} else {
			tracing::info!(form_id = %self.config.form_id, message = ?result.message(), "Form submission failed");
		}

		if let Some(banner) = result.banner(&self.config) {
			self.display_banner(&form, banner);
		}
		if result.is_success() {
			form.reset();
		}

		result
	}

	pub async fn handle_submit(&self, form: &P::Form, event: &dyn SubmitEvent) -> SubmitOutcome {
		match self.intercept(form, event) {
			Some(pending) => SubmitOutcome::Completed(self.complete(pending).await),
			None => SubmitOutcome::Invalid,
		}
	}

	/// Replaces whatever banner is on the page with this one.
	pub fn display_banner(&self, form: &P::Form, banner: Banner) {
		self.page.remove_banner();
		self.page.insert_banner_after(form, &banner);
	}

	fn run_conversion_hook(&self) {
		let Some(hook) = &self.conversion_hook else {
			return;
		};
		if catch_unwind(AssertUnwindSafe(|| hook())).is_err() {
			tracing::warn!("Conversion tracking hook panicked");
		}
	}
}
