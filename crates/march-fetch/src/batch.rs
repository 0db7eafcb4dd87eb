//! Bounded-concurrency batch acquisition of route samples.
//!
//! Lookups run through `buffered`, so results come back in route order
//! with at most `max_concurrency` in flight. Each lookup has its own
//! timeout and retry budget; the whole batch has a deadline. Anything
//! unresolved becomes a hole for the profiler to fill.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use rand::Rng;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use march_core::types::{GeoPoint, RawSample};

use crate::sampler::{SampleError, TerrainSample, TerrainSampler};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub max_concurrency: usize,
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub request_timeout: Duration,
    pub batch_timeout: Duration,
    /// Base delay before the first retry; doubles on each further retry.
    pub retry_backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            max_retries: 2,
            request_timeout: Duration::from_secs(5),
            batch_timeout: Duration::from_secs(60),
            retry_backoff: Duration::from_millis(100),
        }
    }
}

/// Result of a batch fetch. Always one sample per requested point.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub samples: Vec<RawSample>,
    /// Indices of points whose lookup failed or never finished.
    pub failed: Vec<usize>,
    /// Lookup attempts made, retries included.
    pub attempts: u32,
    /// True when the batch deadline cut the fetch short.
    pub timed_out: bool,
}

impl FetchOutcome {
    /// Samples without a usable elevation, failed or not.
    pub fn hole_count(&self) -> usize {
        self.samples.iter().filter(|s| !s.has_valid_elevation()).count()
    }
}

/// Exponential backoff with up to 50% random jitter.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exponential = base.saturating_mul(1 << attempt.saturating_sub(1).min(8));
    let jitter_cap = (exponential.as_millis() as u64) / 2;
    let jitter = if jitter_cap > 0 {
        rand::thread_rng().gen_range(0..=jitter_cap)
    } else {
        0
    };
    exponential + Duration::from_millis(jitter)
}

async fn fetch_one<S: TerrainSampler>(
    sampler: &S,
    point: GeoPoint,
    config: &FetchConfig,
) -> (Result<TerrainSample, SampleError>, u32) {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let result = match timeout(config.request_timeout, sampler.sample(point)).await {
            Ok(result) => result,
            Err(_) => Err(SampleError::Timeout(config.request_timeout)),
        };

        match result {
            Err(e) if e.is_retryable() && attempt <= config.max_retries => {
                let delay = backoff_delay(config.retry_backoff, attempt);
                debug!(lat = point.lat, lng = point.lng, attempt, ?delay, error = %e, "retrying lookup");
                sleep(delay).await;
            }
            other => return (other, attempt),
        }
    }
}

/// Fetch terrain for every point, in order.
///
/// Never fails as a whole: failed or unfinished points come back as
/// holes and are listed in `failed`.
pub async fn fetch_samples<S: TerrainSampler>(sampler: &S, points: &[GeoPoint], config: &FetchConfig) -> FetchOutcome {
    let mut results: Vec<Option<(Result<TerrainSample, SampleError>, u32)>> = (0..points.len()).map(|_| None).collect();

    let mut lookups = stream::iter(points.iter().copied().enumerate())
        .map(|(i, point)| async move { (i, fetch_one(sampler, point, config).await) })
        .buffered(config.max_concurrency.max(1));

    let drain = async {
        while let Some((i, result)) = lookups.next().await {
            results[i] = Some(result);
        }
    };
    let timed_out = timeout(config.batch_timeout, drain).await.is_err();
    if timed_out {
        warn!(deadline = ?config.batch_timeout, "terrain fetch deadline reached; unresolved points become holes");
    }

    let mut failed = Vec::new();
    let mut attempts = 0;
    let samples = points
        .iter()
        .zip(results)
        .enumerate()
        .map(|(i, (point, result))| match result {
            Some((Ok(sample), tries)) => {
                attempts += tries;
                RawSample::new(point.lat, point.lng, sample.elevation, sample.vegetation)
            }
            Some((Err(e), tries)) => {
                attempts += tries;
                warn!(index = i, attempts = tries, error = %e, "terrain lookup failed");
                failed.push(i);
                RawSample::hole(*point)
            }
            None => {
                failed.push(i);
                RawSample::hole(*point)
            }
        })
        .collect();

    debug!(points = points.len(), failed = failed.len(), attempts, "terrain fetch complete");

    FetchOutcome {
        samples,
        failed,
        attempts,
        timed_out,
    }
}
