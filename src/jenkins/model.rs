//! Jenkins status-API ingestion types.
//!
//! The `jobs` field of a node is decided once at parse time: a sequence
//! becomes `Branch`, anything else (absent, null, or a non-sequence
//! value) becomes `Leaf`. Later stages never re-inspect the raw shape.

use serde::{Deserialize, Deserializer};

/// One entry of a job's health report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEntry {
    /// Health score, 0–100 on a well-behaved server. Kept signed and
    /// unclamped; the icon resolver owns the bucket boundaries.
    #[serde(default)]
    pub score: Option<i64>,
    /// Explicit icon reference supplied by the server.
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Human-readable health summary.
    #[serde(default)]
    pub description: Option<String>,
}

/// Children of a job node, fixed at ingestion.
#[derive(Debug, Clone, Default)]
pub enum JobChildren {
    /// No nested jobs.
    #[default]
    Leaf,
    /// Nested jobs, in server order.
    Branch(Vec<RawJob>),
}

impl JobChildren {
    /// The children as a slice; empty for a leaf.
    pub fn as_slice(&self) -> &[RawJob] {
        match self {
            Self::Leaf => &[],
            Self::Branch(children) => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }
}

/// A job node exactly as the status API returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJob {
    /// Display name; nested-folder names carry a literal `%2F`.
    pub name: String,
    /// Absolute URL of the job on the server.
    pub url: String,
    /// Status color code ("blue", "red", …); folders have none.
    #[serde(default)]
    pub color: Option<String>,
    /// Health report entries; only the first is consulted downstream.
    #[serde(default)]
    pub health_report: Vec<HealthEntry>,
    /// Nested jobs, or `Leaf`.
    #[serde(default, deserialize_with = "children_or_leaf")]
    pub jobs: JobChildren,
}

/// Envelope of the `/api/json` response. A body without `jobs` is a
/// decode failure, reported at the fetch boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct JobsEnvelope {
    pub jobs: Vec<RawJob>,
}

fn children_or_leaf<'de, D>(deserializer: D) -> Result<JobChildren, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<RawJob>, _>>()
            .map(JobChildren::Branch)
            .map_err(serde::de::Error::custom),
        _ => Ok(JobChildren::Leaf),
    }
}
