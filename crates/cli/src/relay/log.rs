//! Per-session traffic log.
//!
//! Every line is timestamped and written to stdout, and also appended to a
//! per-target file when file logging is enabled.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::warn;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Append-only log sink owned by one relay session.
pub struct SessionLog {
	file: Option<(PathBuf, Mutex<File>)>,
}

impl SessionLog {
	/// A sink that only writes to stdout.
	pub fn stdout() -> Self {
		Self { file: None }
	}

	/// Opens the sink for target `id`.
	///
	/// `template` names the log file, with `%s` standing for the sanitized id.
	/// `None` or an empty template logs to stdout only. Missing parent
	/// directories are created.
	pub fn open(template: Option<&str>, id: &str) -> io::Result<Self> {
		let Some(template) = template.filter(|template| !template.is_empty()) else {
			return Ok(Self::stdout());
		};

		let path = log_path(template, id);
		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}
		let file = OpenOptions::new().create(true).append(true).open(&path)?;

		Ok(Self {
			file: Some((path, Mutex::new(file))),
		})
	}

	/// Path of the backing file, if any.
	pub fn path(&self) -> Option<&Path> {
		self.file.as_ref().map(|(path, _)| path.as_path())
	}

	/// Writes one timestamped line.
	pub fn line(&self, args: fmt::Arguments<'_>) {
		let line = format!("{} {args}\n", chrono::Local::now().format(TIMESTAMP_FORMAT));

		let mut stdout = io::stdout().lock();
		let _ = stdout.write_all(line.as_bytes());
		let _ = stdout.flush();
		drop(stdout);

		if let Some((path, file)) = &self.file {
			if let Err(err) = file.lock().write_all(line.as_bytes()) {
				warn!(target = "debugger.relay", path = %path.display(), error = %err, "writing session log failed");
			}
		}
	}
}

impl fmt::Debug for SessionLog {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SessionLog").field("path", &self.path()).finish()
	}
}

/// Strips every character outside `[A-Za-z0-9_.-]`.
pub fn sanitize_id(id: &str) -> String {
	id.chars()
		.filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
		.collect()
}

/// Expands `template` for target `id`. A template without `%s` is used as is.
pub fn log_path(template: &str, id: &str) -> PathBuf {
	if template.contains("%s") {
		PathBuf::from(template.replace("%s", &sanitize_id(id)))
	} else {
		PathBuf::from(template)
	}
}
