// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod console;
mod entry;
mod page;

pub use console::ConsoleMakeWriter;
pub use entry::start_form_relay;
pub use page::{WebForm, WebPage};
