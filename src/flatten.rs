//! Recursive flattening of the raw job tree into launcher-ready records.

use serde::{Deserialize, Serialize};

use crate::icon;
use crate::jenkins::{JobChildren, RawJob};
use crate::tokens;

/// One flattened job, ready for caching and presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Decoded display name; every `%2F` becomes a literal slash.
    pub name: String,
    /// Absolute job URL; doubles as the launcher item identifier.
    pub url: String,
    /// Icon path relative to the resource root.
    pub icon: String,
    /// First health-report description, if any.
    pub description: Option<String>,
    /// Filter tokens: the job's own first, then every ancestor's.
    #[serde(rename = "match")]
    pub match_tokens: Vec<String>,
    /// Depth in the tree; top-level jobs sit at level 0.
    pub level: u32,
}

/// Flatten one top-level node and its subtree, depth-first pre-order.
pub fn flatten_tree(job: &RawJob) -> Vec<JobRecord> {
    let mut records = Vec::new();
    flatten_into(job, &[], 0, &mut records);
    records
}

fn flatten_into(job: &RawJob, inherited: &[String], level: u32, out: &mut Vec<JobRecord>) {
    let name = job.name.replace("%2F", "/");
    let health = job.health_report.first();

    let mut match_tokens = tokens::match_tokens(&name);
    match_tokens.extend_from_slice(inherited);

    let record = JobRecord {
        icon: icon::icon_for(
            health.and_then(|h| h.score),
            health.and_then(|h| h.icon_url.as_deref()),
            job.color.as_deref(),
        ),
        description: health.and_then(|h| h.description.clone()),
        url: job.url.clone(),
        match_tokens,
        name,
        level,
    };

    match &job.jobs {
        JobChildren::Leaf => out.push(record),
        JobChildren::Branch(children) => {
            let inherited = record.match_tokens.clone();
            out.push(record);
            for child in children {
                flatten_into(child, &inherited, level + 1, out);
            }
        }
    }
}
