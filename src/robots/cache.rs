//! Per-origin robots.txt cache
//!
//! Each origin's robots.txt is fetched at most once per day within a run.

use crate::robots::RobotsPolicy;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// A robots.txt policy and when it was fetched
#[derive(Debug, Clone)]
pub struct CachedRobots {
    pub policy: RobotsPolicy,
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    pub fn new(policy: RobotsPolicy) -> Self {
        Self {
            policy,
            fetched_at: Utc::now(),
        }
    }

    /// Robots.txt older than 24 hours is refetched
    pub fn is_stale(&self) -> bool {
        Utc::now() - self.fetched_at > Duration::hours(24)
    }
}

/// In-memory robots.txt policies keyed by origin (`scheme://host:port`)
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, CachedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh policy for `origin`, if one is cached
    pub fn get(&self, origin: &str) -> Option<&RobotsPolicy> {
        self.entries
            .get(origin)
            .filter(|cached| !cached.is_stale())
            .map(|cached| &cached.policy)
    }

    pub fn insert(&mut self, origin: &str, policy: RobotsPolicy) {
        self.entries
            .insert(origin.to_string(), CachedRobots::new(policy));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
