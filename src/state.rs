use std::sync::Arc;

use chrono_tz::Tz;
use meetings::Meeting;
use tokio::sync::watch;

use crate::cache::MeetingCache;
use crate::source::{FetchError, Source};

/// What a page view knows about the meetings at any moment.
#[derive(Debug, Clone)]
pub enum HomeState {
    Loading,
    Error(String),
    Loaded(Arc<Vec<Meeting>>),
}

impl HomeState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, HomeState::Loading)
    }
}

pub struct Loader {
    source: Source,
    timezone: Tz,
    cache: Arc<MeetingCache>,
}

impl Loader {
    pub fn new(source: Source, timezone: Tz, cache: Arc<MeetingCache>) -> Arc<Self> {
        Arc::new(Self {
            source,
            timezone,
            cache,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub async fn meetings(&self) -> Result<Arc<Vec<Meeting>>, FetchError> {
        if let Some(meetings) = self.cache.get(&self.source).await {
            return Ok(meetings);
        }

        let meetings = self.source.load(self.timezone).await?;
        Ok(self.cache.insert(self.source.clone(), meetings).await)
    }
}

/// Starts loading in the background. The receiver begins in
/// [`HomeState::Loading`] and sees exactly one transition afterwards.
pub fn load(loader: Arc<Loader>) -> watch::Receiver<HomeState> {
    let (tx, rx) = watch::channel(HomeState::Loading);

    tokio::spawn(async move {
        let state = match loader.meetings().await {
            Ok(meetings) => HomeState::Loaded(meetings),
            Err(err) => {
                log::warn!("Failed to load meetings from {}: {err}", loader.source);
                HomeState::Error(err.to_string())
            }
        };

        if tx.send(state).is_err() {
            log::debug!("Page view went away before meetings were loaded");
        }
    });

    rx
}

/// Waits for the load behind `rx` to finish.
pub async fn settle(mut rx: watch::Receiver<HomeState>) -> HomeState {
    match rx.wait_for(HomeState::is_settled).await {
        Ok(state) => state.clone(),
        Err(_) => HomeState::Error("meeting loader stopped unexpectedly".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::path::PathBuf;

    use tokio::time::Duration;

    use super::*;
    use crate::cache::Config;

    fn loader(source: Source) -> Arc<Loader> {
        let cache = MeetingCache::new(Config {
            enabled: false,
            ttl: Duration::from_secs(60),
        });
        Loader::new(source, chrono_tz::America::Chicago, cache)
    }

    #[tokio::test]
    async fn starts_loading_then_settles_once() {
        let path = env::temp_dir().join(format!(
            "meeting-board-state-{}.json",
            std::process::id()
        ));
        tokio::fs::write(
            &path,
            r#"{ "meetings": [{ "title": "Kickoff", "date": "2025-08-27T12:00:00" }] }"#,
        )
        .await
        .unwrap();

        let rx = load(loader(Source::File(path.clone())));
        assert!(matches!(*rx.borrow(), HomeState::Loading));

        let state = settle(rx).await;
        tokio::fs::remove_file(&path).await.unwrap();

        let HomeState::Loaded(meetings) = &state else {
            panic!("expected loaded meetings, got {state:?}");
        };
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].title, "Kickoff");
    }

    #[tokio::test]
    async fn fetch_failure_becomes_error_state() {
        let rx = load(loader(Source::File(PathBuf::from("/nonexistent/meetings.json"))));

        let state = settle(rx).await;

        let HomeState::Error(message) = &state else {
            panic!("expected an error, got {state:?}");
        };
        assert!(message.contains("/nonexistent/meetings.json"));
    }

    #[test]
    fn only_terminal_states_are_settled() {
        assert!(!HomeState::Loading.is_settled());
        assert!(HomeState::Error("boom".to_string()).is_settled());
        assert!(HomeState::Loaded(Arc::new(Vec::new())).is_settled());
    }
}
