//! Step outputs and failure alerts handed back to the calling pipeline.
//!
//! The runner reads outputs from the file named by `GITHUB_OUTPUT`, using
//! heredoc blocks so multi-line values such as the JSON payload survive
//! intact. Failure alerts are `::error::` workflow commands on stdout. When
//! no output file is configured, outputs fall back to `name=value` lines on
//! stdout so the guard can be run by hand.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::github::error::CheckError;

/// Output carrying the serialised pull request.
pub const PAYLOAD_OUTPUT: &str = "payload";

/// Output carrying the final `true`/`false` decision.
pub const VALID_OUTPUT: &str = "VALID";

/// A sink that delivers outputs and alerts to the pipeline.
pub trait OutputSink: Send + Sync {
    /// Publishes a named step output.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Io`] when the output channel cannot be written.
    fn set_output(&self, name: &str, value: &str) -> Result<(), CheckError>;

    /// Raises a failure alert that marks the step as failed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Io`] when the alert cannot be written.
    fn set_failed(&self, message: &str) -> Result<(), CheckError>;
}

/// Sink speaking the runner's file-command and workflow-command protocols.
#[derive(Debug, Clone, Default)]
pub struct RunnerOutputs {
    output_file: Option<PathBuf>,
}

impl RunnerOutputs {
    /// Creates a sink appending outputs to `output_file`, or writing them to
    /// stdout when no file is given.
    #[must_use]
    pub const fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    /// The output file in use, if any.
    #[must_use]
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }
}

impl OutputSink for RunnerOutputs {
    fn set_output(&self, name: &str, value: &str) -> Result<(), CheckError> {
        let Some(path) = self.output_file.as_deref() else {
            let mut stdout = io::stdout().lock();
            return writeln!(stdout, "{name}={value}").map_err(CheckError::from);
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|error| CheckError::Io {
                message: format!("open output file '{}': {error}", path.display()),
            })?;
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        write_file_command(&mut file, name, value, &delimiter)
    }

    fn set_failed(&self, message: &str) -> Result<(), CheckError> {
        let mut stdout = io::stdout().lock();
        write_error_command(&mut stdout, message)
    }
}

/// Writes one output as a heredoc block.
///
/// # Errors
///
/// Returns [`CheckError::Io`] when the delimiter occurs in the name or value,
/// or when writing fails.
pub fn write_file_command<W: Write>(
    writer: &mut W,
    name: &str,
    value: &str,
    delimiter: &str,
) -> Result<(), CheckError> {
    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(CheckError::Io {
            message: format!("output {name} contains the delimiter {delimiter}"),
        });
    }

    write!(writer, "{name}<<{delimiter}\n{value}\n{delimiter}\n").map_err(CheckError::from)
}

/// Writes an `::error::` workflow command.
///
/// # Errors
///
/// Returns [`CheckError::Io`] when writing fails.
pub fn write_error_command<W: Write>(writer: &mut W, message: &str) -> Result<(), CheckError> {
    writeln!(writer, "::error::{}", escape_command_data(message)).map_err(CheckError::from)
}

/// Raises `message` through `sink`, copying it to `fallback` if the sink
/// cannot deliver it.
///
/// # Errors
///
/// Returns the sink's error once the fallback copy has been written, or the
/// fallback's own write error.
pub fn raise_alert<S: OutputSink, W: Write>(
    sink: &S,
    message: &str,
    fallback: &mut W,
) -> Result<(), CheckError> {
    let Err(sink_error) = sink.set_failed(message) else {
        return Ok(());
    };
    write_error_command(fallback, message)?;
    Err(sink_error)
}

/// Escapes workflow-command data so line breaks survive on one line.
#[must_use]
pub fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Something recorded by [`RecordingOutputs`].
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// A step output.
    Output {
        /// Output name.
        name: String,
        /// Output value.
        value: String,
    },
    /// A failure alert.
    Failed {
        /// Alert text.
        message: String,
    },
}

/// In-memory sink for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingOutputs {
    events: std::sync::Mutex<Vec<OutputEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingOutputs {
    /// Everything recorded so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<OutputEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// The last value recorded for `name`.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            OutputEvent::Output {
                name: recorded,
                value,
            } if recorded == name => Some(value),
            _ => None,
        })
    }

    /// Every failure alert recorded.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                OutputEvent::Failed { message } => Some(message),
                OutputEvent::Output { .. } => None,
            })
            .collect()
    }

    fn push(&self, event: OutputEvent) -> Result<(), CheckError> {
        self.events
            .lock()
            .map(|mut events| events.push(event))
            .map_err(|error| CheckError::Io {
                message: error.to_string(),
            })
    }
}

#[cfg(any(test, feature = "test-support"))]
impl OutputSink for RecordingOutputs {
    fn set_output(&self, name: &str, value: &str) -> Result<(), CheckError> {
        self.push(OutputEvent::Output {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    fn set_failed(&self, message: &str) -> Result<(), CheckError> {
        self.push(OutputEvent::Failed {
            message: message.to_owned(),
        })
    }
}
