// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::{self, Write};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use web_sys::console;

/// Hands formatted tracing lines to the matching `console` method.
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
	type Writer = ConsoleWriter;

	fn make_writer(&'a self) -> Self::Writer {
		ConsoleWriter::new(Level::INFO)
	}

	fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
		ConsoleWriter::new(*meta.level())
	}
}

/// Buffers one event and flushes it to the console when dropped.
pub struct ConsoleWriter {
	level: Level,
	buffer: Vec<u8>,
}

impl ConsoleWriter {
	fn new(level: Level) -> Self {
		Self {
			level,
			buffer: Vec::new(),
		}
	}
}

impl Write for ConsoleWriter {
	fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
		self.buffer.extend_from_slice(bytes);
		Ok(bytes.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		if self.buffer.is_empty() {
			return Ok(());
		}

		let line = String::from_utf8_lossy(&self.buffer);
		let line = line.trim_end();
		match self.level {
			Level::ERROR => console::error_1(&line.into()),
			Level::WARN => console::warn_1(&line.into()),
			Level::INFO => console::info_1(&line.into()),
			_ => console::debug_1(&line.into()),
		}
		self.buffer.clear();
		Ok(())
	}
}

impl Drop for ConsoleWriter {
	fn drop(&mut self) {
		let _ = self.flush();
	}
}
