//! Classic sensors report, produced by running the `sensors` tool
//!
//! Output of the command is reshaped into the classic report format so
//! existing monitoring consumers keep working unchanged.

use crate::cache::{run_command, CommandSpec, Producer};
use crate::config::SensorsConfig;
use crate::error::{SensordError, SensordResult};
use crate::report::{ClassicReport, Entry};
use async_trait::async_trait;
use bytes::Bytes;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// Producer that shells out to the `sensors` command.
pub struct ClassicSensors {
    spec: CommandSpec,
}

impl ClassicSensors {
    /// Producer running `command` with a per-invocation budget.
    ///
    /// The budget is the process timeout, distinct from (and expected to be
    /// shorter than) the owning cache's refresh interval.
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            spec: CommandSpec::new(command, timeout),
        }
    }

    pub fn from_config(config: &SensorsConfig) -> Self {
        Self::new(
            config.command.clone(),
            Duration::from_secs(config.command_timeout_secs),
        )
    }
}

#[async_trait]
impl Producer for ClassicSensors {
    async fn produce(&self) -> SensordResult<Option<Bytes>> {
        let stdout = run_command(&self.spec).await?;
        Ok(Some(format(&stdout)?))
    }
}

/// Reshape `sensors` stdout into the classic report payload.
///
/// Stanzas are separated by blank lines; the first line names the chip and
/// each `key: value` line below it becomes a map entry. Threshold annotations
/// in parentheses are stripped before parsing. A stanza with no body ends the
/// report.
fn format(stdout: &[u8]) -> SensordResult<Bytes> {
    let text = std::str::from_utf8(stdout).map_err(|_| SensordError::OutputEncoding)?;

    static PARENS: OnceLock<Regex> = OnceLock::new();
    let parens = PARENS.get_or_init(|| Regex::new(r"\(.+?\)").expect("static pattern"));
    let data = parens.replace_all(text, "");

    let mut information = Vec::new();
    for stanza in data.split("\n\n") {
        let Some((name, body)) = stanza.split_once('\n') else {
            break;
        };

        let mut entry = Entry::new();
        entry.insert("name".to_string(), name.trim().to_string());
        for line in body.split('\n') {
            let mut fields = line.split(':');
            let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
                continue;
            };
            entry.insert(key.trim().to_string(), value.trim().to_string());
        }

        information.push(entry);
    }

    ClassicReport::with_information(information).encode()
}
