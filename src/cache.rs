use std::collections::HashMap;
use std::sync::Arc;

use meetings::Meeting;
use tokio::sync::RwLock;
use tokio::task;
use tokio::time::{sleep, Duration, Instant};

use crate::source::Source;

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

struct Entry {
    expires: Instant,
    meetings: Arc<Vec<Meeting>>,
}

/// Parsed meeting batches keyed by the source they came from.
pub struct MeetingCache {
    enabled: bool,
    inner: RwLock<HashMap<Source, Entry>>,
    ttl: Duration,
}

impl MeetingCache {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            enabled: config.enabled,
            ttl: config.ttl,
            inner: Default::default(),
        })
    }

    pub async fn insert(
        self: &Arc<Self>,
        source: Source,
        meetings: Vec<Meeting>,
    ) -> Arc<Vec<Meeting>> {
        let meetings = Arc::new(meetings);
        if !self.enabled {
            return meetings;
        }

        let expires = Instant::now() + self.ttl;
        self.inner.write().await.insert(
            source.clone(),
            Entry {
                expires,
                meetings: Arc::clone(&meetings),
            },
        );

        let cache = Arc::clone(self);
        task::spawn(async move {
            sleep(cache.ttl).await;
            let mut inner = cache.inner.write().await;
            // a newer insert owns the slot now
            if inner.get(&source).is_some_and(|entry| entry.expires <= expires) {
                inner.remove(&source);
            }
        });

        meetings
    }

    pub async fn get(&self, source: &Source) -> Option<Arc<Vec<Meeting>>> {
        if !self.enabled {
            return None;
        }

        self.inner
            .read()
            .await
            .get(source)
            .filter(|entry| entry.expires > Instant::now())
            .map(|entry| Arc::clone(&entry.meetings))
    }
}
