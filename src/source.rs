use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;
use meetings::{parse_document, Meeting};
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use thiserror::Error;

static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Where the meetings document is published.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    Http(String),
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(StatusCode),
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] meetings::Error),
}

impl FromStr for Source {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Source::Http(s.to_string()))
        } else {
            Ok(Source::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Http(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Source {
    /// Retrieves the raw document. A non-success status is an error; nothing
    /// is retried.
    pub async fn fetch(&self) -> Result<String, FetchError> {
        match self {
            Source::Http(url) => {
                let response = CLIENT.get(url).send().await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status));
                }

                Ok(response.text().await?)
            }
            Source::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FetchError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    pub async fn load(&self, tz: Tz) -> Result<Vec<Meeting>, FetchError> {
        let json = self.fetch().await?;
        let meetings = parse_document(json, tz)?;
        log::debug!("Loaded {} meetings from {self}", meetings.len());
        Ok(meetings)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn urls_and_paths() {
        assert_eq!(
            "https://example.org/meetings.json".parse(),
            Ok(Source::Http("https://example.org/meetings.json".to_string()))
        );
        assert_eq!(
            "public/meetings.json".parse(),
            Ok(Source::File(PathBuf::from("public/meetings.json")))
        );
    }

    #[test]
    fn status_message() {
        let err = FetchError::Status(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[tokio::test]
    async fn loads_from_file() {
        let path = env::temp_dir().join(format!(
            "meeting-board-source-{}.json",
            std::process::id()
        ));
        tokio::fs::write(
            &path,
            r#"{ "meetings": [{ "title": "Kickoff", "date": "2025-08-27T12:00:00" }] }"#,
        )
        .await
        .unwrap();

        let meetings = Source::File(path.clone())
            .load(chrono_tz::America::Chicago)
            .await
            .unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].title, "Kickoff");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = Source::File(PathBuf::from("/nonexistent/meetings.json"));

        match source.fetch().await {
            Err(FetchError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/meetings.json"))
            }
            other => panic!("expected an io error, got {other:?}"),
        }
    }
}
