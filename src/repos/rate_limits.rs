//! Fixed window request counters, kept in process memory or in Redis
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use failure::ResultExt;
use r2d2::Pool;
use r2d2_redis::redis::{self, PipelineCommands};
use r2d2_redis::RedisConnectionManager;

use errors::Error;
use repos::types::RepoResult;

/// Stale windows are swept once the table grows past this
const MAX_MEMORY_KEYS: usize = 10_000;

pub type RedisPool = Pool<RedisConnectionManager>;

/// Client key -> (window index, hits in that window)
pub type RateLimitsStorage = Arc<Mutex<HashMap<String, (u64, u64)>>>;

pub fn new_rate_limits_storage() -> RateLimitsStorage {
    Arc::new(Mutex::new(HashMap::new()))
}

/// Where counters are kept
#[derive(Clone)]
pub enum RateLimitsBackend {
    Memory(RateLimitsStorage),
    Redis(RedisPool),
}

pub trait RateLimitsRepo {
    /// Registers one more request for `key` in the current window of `window_sec` seconds
    /// and returns the number of requests seen in that window so far
    fn hit(&self, key: &str, window_sec: u64) -> RepoResult<u64>;
}

fn current_window(window_sec: u64) -> RepoResult<u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before unix epoch")?;
    Ok(now.as_secs() / window_sec.max(1))
}

pub struct RateLimitsRepoMemory {
    pub storage: RateLimitsStorage,
}

impl RateLimitsRepoMemory {
    pub fn new(storage: RateLimitsStorage) -> Self {
        Self { storage }
    }

    pub fn hit_in_window(&self, key: &str, window: u64) -> RepoResult<u64> {
        let mut counters = self
            .storage
            .lock()
            .map_err(|_| format_err!("rate limit storage lock is poisoned").context(Error::Storage))?;

        if counters.len() > MAX_MEMORY_KEYS {
            counters.retain(|_, &mut (counter_window, _)| counter_window == window);
        }

        let counter = counters.entry(key.to_string()).or_insert((window, 0));
        if counter.0 != window {
            *counter = (window, 0);
        }
        counter.1 += 1;

        Ok(counter.1)
    }
}

impl RateLimitsRepo for RateLimitsRepoMemory {
    fn hit(&self, key: &str, window_sec: u64) -> RepoResult<u64> {
        let window = current_window(window_sec)?;
        self.hit_in_window(key, window)
    }
}

pub struct RateLimitsRepoRedis {
    pub pool: RedisPool,
}

impl RateLimitsRepoRedis {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

/// Counter key for `client` in `window`, a new window never sees an old counter
pub fn redis_key(client: &str, window: u64) -> String {
    format!("rate:{}:{}", client, window)
}

impl RateLimitsRepo for RateLimitsRepoRedis {
    fn hit(&self, key: &str, window_sec: u64) -> RepoResult<u64> {
        let window_sec = window_sec.max(1);
        let redis_key = redis_key(key, current_window(window_sec)?);
        let conn = self.pool.get().context(Error::Storage)?;

        let (count,): (u64,) = redis::pipe()
            .atomic()
            .incr(redis_key.as_str(), 1)
            .expire(redis_key.as_str(), (window_sec * 2) as usize)
            .ignore()
            .query(&*conn)
            .context(Error::Storage)?;
        debug!("Client {} request count: {}.", key, count);

        Ok(count)
    }
}
