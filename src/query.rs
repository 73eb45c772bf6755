//! End-to-end job query: cache first, then fetch, flatten, and sort.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::JobCache;
use crate::error::Error;
use crate::flatten::{self, JobRecord};
use crate::jenkins::JenkinsApi;

/// Produces the depth-ordered job list for presentation.
pub struct QueryOrchestrator {
    api: Arc<dyn JenkinsApi>,
    cache: Arc<dyn JobCache>,
    cache_max_age: Duration,
}

impl QueryOrchestrator {
    pub fn new(
        api: Arc<dyn JenkinsApi>,
        cache: Arc<dyn JobCache>,
        cache_max_age: Duration,
    ) -> Self {
        Self {
            api,
            cache,
            cache_max_age,
        }
    }

    /// The flattened job list, sorted by level ascending.
    ///
    /// A fresh cache entry short-circuits the fetch entirely. On a miss
    /// the tree is fetched, flattened, and written back stamped with
    /// the configured freshness window. Fetch failures propagate
    /// unchanged; there are no retries.
    pub async fn query_all(&self) -> Result<Vec<JobRecord>, Error> {
        let mut records = match self.cache.get().await {
            Some(records) => {
                tracing::debug!(records = records.len(), "serving job list from cache");
                records
            }
            None => {
                let started = std::time::Instant::now();
                let jobs = self.api.fetch_jobs().await?;
                let records: Vec<JobRecord> =
                    jobs.iter().flat_map(flatten::flatten_tree).collect();
                self.cache.set(&records, self.cache_max_age).await?;
                tracing::info!(
                    jobs = jobs.len(),
                    records = records.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "fetched and flattened job tree"
                );
                records
            }
        };

        // Stable sort: same-level records keep their flatten order.
        records.sort_by_key(|record| record.level);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::{ApiError, CacheError, Error};
    use crate::jenkins::{JobChildren, RawJob};

    fn job(name: &str, url: &str) -> RawJob {
        RawJob {
            name: name.to_string(),
            url: url.to_string(),
            color: None,
            health_report: Vec::new(),
            jobs: JobChildren::Leaf,
        }
    }

    /// Stub API returning a fixed tree and counting invocations.
    struct StubApi {
        jobs: Vec<RawJob>,
        calls: AtomicUsize,
    }

    impl StubApi {
        fn with_jobs(jobs: Vec<RawJob>) -> Arc<Self> {
            Arc::new(Self {
                jobs,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl JenkinsApi for StubApi {
        async fn fetch_jobs(&self) -> Result<Vec<RawJob>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.jobs.clone())
        }
    }

    /// Stub API that fails every fetch.
    struct FailingApi;

    #[async_trait::async_trait]
    impl JenkinsApi for FailingApi {
        async fn fetch_jobs(&self) -> Result<Vec<RawJob>, ApiError> {
            Err(ApiError::Status {
                url: "https://ci/api/json".to_string(),
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            })
        }
    }

    /// In-memory cache; `serving` false simulates an expired entry.
    struct MemoryCache {
        entry: Mutex<Option<Vec<JobRecord>>>,
        serving: bool,
    }

    impl MemoryCache {
        fn fresh() -> Arc<Self> {
            Arc::new(Self {
                entry: Mutex::new(None),
                serving: true,
            })
        }

        fn always_expired() -> Arc<Self> {
            Arc::new(Self {
                entry: Mutex::new(None),
                serving: false,
            })
        }

        fn stored(&self) -> Option<Vec<JobRecord>> {
            self.entry.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl JobCache for MemoryCache {
        async fn get(&self) -> Option<Vec<JobRecord>> {
            if !self.serving {
                return None;
            }
            self.entry.lock().unwrap().clone()
        }

        async fn set(&self, records: &[JobRecord], _max_age: Duration) -> Result<(), CacheError> {
            *self.entry.lock().unwrap() = Some(records.to_vec());
            Ok(())
        }
    }

    fn two_subtree_fixture() -> Vec<RawJob> {
        let mut a = job("a", "ua");
        a.jobs = JobChildren::Branch(vec![job("a-child", "uac")]);
        vec![a, job("b", "ub")]
    }

    #[tokio::test]
    async fn cold_cache_fetches_flattens_and_sorts_by_level() {
        let api = StubApi::with_jobs(two_subtree_fixture());
        let cache = MemoryCache::fresh();
        let orchestrator =
            QueryOrchestrator::new(api.clone(), cache.clone(), Duration::from_secs(300));

        let records = orchestrator.query_all().await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

        // Level grouping pulls "b" ahead of "a-child" across subtrees.
        assert_eq!(names, vec!["a", "b", "a-child"]);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn fresh_list_is_written_back_in_flatten_order() {
        let api = StubApi::with_jobs(two_subtree_fixture());
        let cache = MemoryCache::fresh();
        let orchestrator =
            QueryOrchestrator::new(api.clone(), cache.clone(), Duration::from_secs(300));

        orchestrator.query_all().await.unwrap();

        let stored = cache.stored().unwrap();
        let names: Vec<&str> = stored.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a-child", "b"]);
    }

    #[tokio::test]
    async fn second_query_is_served_from_cache() {
        let api = StubApi::with_jobs(vec![job("build", "u")]);
        let cache = MemoryCache::fresh();
        let orchestrator =
            QueryOrchestrator::new(api.clone(), cache.clone(), Duration::from_secs(300));

        let first = orchestrator.query_all().await.unwrap();
        let second = orchestrator.query_all().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn expired_cache_triggers_a_refetch() {
        let api = StubApi::with_jobs(vec![job("build", "u")]);
        let cache = MemoryCache::always_expired();
        let orchestrator =
            QueryOrchestrator::new(api.clone(), cache.clone(), Duration::from_secs(300));

        orchestrator.query_all().await.unwrap();
        orchestrator.query_all().await.unwrap();

        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn cached_list_is_still_sorted_before_returning() {
        let cache = MemoryCache::fresh();
        let mut deep = flatten::flatten_tree(&job("deep", "ud")).remove(0);
        deep.level = 2;
        let shallow = flatten::flatten_tree(&job("shallow", "us")).remove(0);
        cache
            .set(&[deep, shallow], Duration::from_secs(300))
            .await
            .unwrap();

        let api = StubApi::with_jobs(Vec::new());
        let orchestrator =
            QueryOrchestrator::new(api.clone(), cache, Duration::from_secs(300));

        let records = orchestrator.query_all().await.unwrap();
        assert_eq!(records[0].name, "shallow");
        assert_eq!(records[1].name, "deep");
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn fetch_failure_propagates_unchanged() {
        let orchestrator = QueryOrchestrator::new(
            Arc::new(FailingApi),
            MemoryCache::fresh(),
            Duration::from_secs(300),
        );

        let err = orchestrator.query_all().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Status { .. })));
    }
}
