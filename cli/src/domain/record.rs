//! `KEY=VALUE` encoding of the per-project container record.

use std::fmt::Write as _;

use autodock_common::{ContainerRecord, ProjectType};
use chrono::{DateTime, Utc};

use crate::domain::detect::Port;
use crate::domain::error::RecordError;

/// Record file name in the project root.
pub const RECORD_FILE: &str = ".autodock";

/// Serialize a record. Keys are written in a fixed order.
#[must_use]
pub fn encode(record: &ContainerRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "NAME={}", record.name);
    let _ = writeln!(out, "IMAGE={}", record.image);
    let _ = writeln!(out, "PORT={}", record.port);
    if let Some(entry) = &record.entry {
        let _ = writeln!(out, "ENTRY={entry}");
    }
    let _ = writeln!(out, "TYPE={}", record.project_type);
    let _ = writeln!(out, "CREATED_AT={}", record.created_at.to_rfc3339());
    out
}

/// Parse record text.
///
/// Blank lines, `#` comments and unknown keys are ignored. `IMAGE` defaults to
/// the name and `CREATED_AT` to the epoch when absent.
///
/// # Errors
///
/// [`RecordError::Malformed`] when `NAME`, `PORT` or `TYPE` is missing or
/// invalid.
pub fn parse(text: &str) -> Result<ContainerRecord, RecordError> {
    let mut name = None;
    let mut image = None;
    let mut port = None;
    let mut entry = None;
    let mut project_type = None;
    let mut created_at = None;

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(RecordError::Malformed(format!(
                "line {} is not KEY=VALUE",
                lineno + 1
            )));
        };
        let value = value.trim();
        match key.trim() {
            "NAME" => name = non_empty(value),
            "IMAGE" => image = non_empty(value),
            "PORT" => {
                let parsed = Port::parse(value)
                    .ok_or_else(|| RecordError::Malformed(format!("invalid port '{value}'")))?;
                port = Some(parsed.get());
            }
            "ENTRY" => entry = non_empty(value),
            "TYPE" => {
                let parsed: ProjectType = value
                    .parse()
                    .map_err(|e| RecordError::Malformed(format!("{e}")))?;
                project_type = Some(parsed);
            }
            "CREATED_AT" => {
                let parsed = DateTime::parse_from_rfc3339(value)
                    .map_err(|e| RecordError::Malformed(format!("invalid timestamp: {e}")))?;
                created_at = Some(parsed.with_timezone(&Utc));
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| RecordError::Malformed("missing NAME".to_string()))?;
    Ok(ContainerRecord {
        image: image.unwrap_or_else(|| name.clone()),
        port: port.ok_or_else(|| RecordError::Malformed("missing PORT".to_string()))?,
        entry,
        project_type: project_type
            .ok_or_else(|| RecordError::Malformed("missing TYPE".to_string()))?,
        created_at: created_at.unwrap_or_default(),
        name,
    })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
