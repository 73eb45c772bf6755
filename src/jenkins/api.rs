//! HTTP collaborator for the Jenkins status API. Pure I/O, no business
//! logic; the flattener and icon rules live elsewhere.

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::config::{Credentials, LauncherConfig};
use crate::error::ApiError;
use crate::jenkins::model::{JobsEnvelope, RawJob};

/// `depth` parameter sent alongside the tree expression.
const API_DEPTH: u32 = 10;
/// Nesting levels spelled out in the tree expression. The flattener
/// copes with deeper trees should the server return them anyway.
const TREE_LEVELS: usize = 3;
/// Per-job fields requested at every level.
const JOB_FIELDS: &str = "name,url,color,healthReport[description,score,iconUrl]";

/// Fetches the top-level job list from a Jenkins server.
#[async_trait]
pub trait JenkinsApi: Send + Sync {
    /// Fetch the raw top-level jobs, nested per the tree query.
    async fn fetch_jobs(&self) -> Result<Vec<RawJob>, ApiError>;
}

/// `reqwest`-backed implementation of [`JenkinsApi`].
pub struct HttpJenkinsApi {
    client: reqwest::Client,
    host: String,
    credentials: Option<Credentials>,
}

impl HttpJenkinsApi {
    pub fn new(config: &LauncherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: config.host.clone(),
            credentials: config.credentials.clone(),
        }
    }

    fn api_url(&self) -> String {
        format!(
            "{}/api/json?depth={}&tree={}",
            self.host,
            API_DEPTH,
            job_tree_query(TREE_LEVELS)
        )
    }
}

#[async_trait]
impl JenkinsApi for HttpJenkinsApi {
    async fn fetch_jobs(&self) -> Result<Vec<RawJob>, ApiError> {
        let url = self.api_url();
        tracing::debug!(url = %url, "fetching job tree");

        let mut request = self.client.get(&url);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(
                &credentials.user,
                Some(credentials.api_token.expose_secret()),
            );
        }

        let response = request.send().await.map_err(|source| ApiError::Request {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        let envelope: JobsEnvelope = response.json().await.map_err(ApiError::Decode)?;
        tracing::debug!(top_level_jobs = envelope.jobs.len(), "job tree fetched");
        Ok(envelope.jobs)
    }
}

/// Build the `tree` expression requesting `levels` nested job layers.
fn job_tree_query(levels: usize) -> String {
    let mut expr = format!("jobs[{JOB_FIELDS}]");
    for _ in 1..levels {
        expr = format!("jobs[{JOB_FIELDS},{expr}]");
    }
    expr
}
