//! Jenkins status-API surface: ingestion model and fetch collaborator.

pub mod api;
pub mod model;

pub use api::{HttpJenkinsApi, JenkinsApi};
pub use model::{HealthEntry, JobChildren, JobsEnvelope, RawJob};
