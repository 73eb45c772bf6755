//! Launcher script-filter output.
//!
//! Stdout carries only the JSON payload; every diagnostic goes to
//! stderr so the launcher never sees it.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::OutputError;
use crate::flatten::JobRecord;

/// Top-level script-filter payload.
#[derive(Debug, Serialize)]
struct Output<'a> {
    items: &'a [LauncherItem],
}

/// One selectable row in the launcher.
#[derive(Debug, Serialize)]
pub struct LauncherItem {
    /// Stable identifier the launcher uses for ranking; the job URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Value handed to the action when the row is chosen; the job URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    /// Space-joined filter tokens the launcher matches typed input against.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ItemIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

/// Icon reference for a launcher item.
#[derive(Debug, Serialize)]
pub struct ItemIcon {
    pub path: String,
}

impl LauncherItem {
    /// Presentation row for one flattened job.
    pub fn for_job(record: &JobRecord, resource_dir: &Path) -> Self {
        Self {
            uid: Some(record.url.clone()),
            title: record.name.clone(),
            subtitle: record.description.clone(),
            arg: Some(record.url.clone()),
            match_query: Some(record.match_tokens.join(" ")),
            icon: Some(ItemIcon {
                path: resource_dir.join(&record.icon).display().to_string(),
            }),
            valid: None,
        }
    }

    /// Non-actionable row shown when a run fails.
    pub fn error(message: &str) -> Self {
        Self {
            uid: None,
            title: "Jenkins query failed".to_string(),
            subtitle: Some(message.to_string()),
            arg: None,
            match_query: None,
            icon: None,
            valid: Some(false),
        }
    }
}

/// Build the presentation rows for an already-sorted record list.
pub fn items_for(records: &[JobRecord], resource_dir: &Path) -> Vec<LauncherItem> {
    records
        .iter()
        .map(|record| LauncherItem::for_job(record, resource_dir))
        .collect()
}

/// Write the script-filter payload for `items` onto `out`.
pub fn emit(items: &[LauncherItem], out: &mut impl Write) -> Result<(), OutputError> {
    let payload = serde_json::to_string(&Output { items })?;
    writeln!(out, "{payload}")?;
    Ok(())
}
