// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The seam between the relay and the page it runs in.
//!
//! Everything the interceptor does to the document goes through [PageAdapter] and [FormHandle],
//! so the browser implementation in `web` can be swapped for an in-memory page in tests.

use crate::banner::Banner;
use crate::fields::FormControl;
use std::future::Future;
use std::pin::Pin;

/// Work spawned onto the page's single-threaded executor.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

pub type SubmitListener = Box<dyn Fn(&dyn SubmitEvent)>;

pub trait SubmitEvent {
	fn prevent_default(&self);
	fn stop_propagation(&self);
}

/// A form element found on the page.
pub trait FormHandle: Clone {
	/// Drops an inline `onsubmit` handler left in the markup.
	fn clear_inline_submit_handler(&self);

	fn check_validity(&self) -> bool;

	/// Shows the browser's own validation messages.
	fn report_validity(&self);

	/// Snapshots every input, textarea, and select in document order.
	fn controls(&self) -> Vec<FormControl>;

	/// Current label of the submit button or submit input, or `None` if the form has neither.
	fn submit_label(&self) -> Option<String>;

	fn set_submit_state(&self, disabled: bool, label: &str);

	/// Puts every control back to its initial value.
	fn reset(&self);
}

pub trait PageAdapter {
	type Form: FormHandle;

	fn find_form(&self, form_id: &str) -> Option<Self::Form>;

	fn add_submit_listener(&self, form: &Self::Form, listener: SubmitListener);

	/// Removes the banner currently on the page, if there is one.
	fn remove_banner(&self);

	/// Inserts the banner right after the form and schedules its fade-out and removal.
	fn insert_banner_after(&self, form: &Self::Form, banner: &Banner);

	fn spawn_local(&self, task: LocalTask);
}
