use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};

fn serialize_instant<S: Serializer>(
    instant: &DateTime<Tz>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&instant.to_rfc3339())
}

fn serialize_optional_instant<S: Serializer>(
    instant: &Option<DateTime<Tz>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match instant {
        Some(instant) => serialize_instant(instant, serializer),
        None => serializer.serialize_none(),
    }
}

/// The static document the club publishes, `{ "meetings": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingsDocument {
    #[serde(default)]
    pub meetings: Vec<MeetingRecord>,
}

/// One meeting exactly as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub title: String,
    pub date: String,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    pub link: String,
}

/// Position of a meeting in the batch it was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MeetingId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: MeetingId,
    pub title: String,
    #[serde(serialize_with = "serialize_instant")]
    pub date: DateTime<Tz>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_instant"
    )]
    pub end_date: Option<DateTime<Tz>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub buttons: Vec<Button>,
}

impl Meeting {
    /// A meeting is ongoing while `now` lies within `[date, end_date]`. Without
    /// an end it stays ongoing for the rest of the calendar day it started on.
    pub fn is_ongoing(&self, now: &DateTime<Tz>) -> bool {
        if self.date > *now {
            return false;
        }

        match &self.end_date {
            Some(end_date) => now <= end_date,
            None => same_day(&self.date, now),
        }
    }

    /// The same meeting with its instants expressed in `tz`.
    pub fn with_timezone(&self, tz: &Tz) -> Meeting {
        Meeting {
            date: self.date.with_timezone(tz),
            end_date: self.end_date.as_ref().map(|end_date| end_date.with_timezone(tz)),
            ..self.clone()
        }
    }
}

/// Compares calendar days in the time zone of `reference`.
pub(crate) fn same_day(instant: &DateTime<Tz>, reference: &DateTime<Tz>) -> bool {
    instant.with_timezone(&reference.timezone()).date_naive() == reference.date_naive()
}
