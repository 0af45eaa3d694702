use chrono::DateTime;
use chrono_tz::Tz;
use meetings::{
    classify, format_date, format_time, plain_text, Badge, Button, Classification, Feature,
    Meeting, MeetingId,
};
use serde::Serialize;

use crate::state::HomeState;

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HomeView {
    Loading,
    Error {
        message: String,
    },
    Loaded {
        feature: FeatureView,
        meetings: Vec<CardView>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Ongoing,
    Upcoming,
    None,
}

#[derive(Debug, Serialize)]
pub struct FeatureView {
    pub kind: FeatureKind,
    pub heading: String,
    pub meetings: Vec<CardView>,
}

#[derive(Debug, Serialize)]
pub struct CardView {
    pub id: MeetingId,
    pub title: String,
    pub starts_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub buttons: Vec<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
}

impl CardView {
    fn new(meeting: &Meeting, badge: Option<&'static str>) -> Self {
        Self {
            id: meeting.id,
            title: meeting.title.clone(),
            starts_at: meeting.date.to_rfc3339(),
            ends_at: meeting.end_date.as_ref().map(|end| end.to_rfc3339()),
            date: format_date(&meeting.date),
            time: format_time(&meeting.date),
            end_time: meeting.end_date.as_ref().map(format_time),
            location: meeting.location.clone(),
            speaker: meeting.speaker.clone(),
            description: meeting.description.clone(),
            description_text: meeting.description.as_ref().map(plain_text),
            schedule: meeting.schedule.clone(),
            thumbnail: meeting.thumbnail.clone(),
            buttons: meeting.buttons.clone(),
            badge,
        }
    }
}

impl From<&Classification> for FeatureView {
    fn from(classification: &Classification) -> Self {
        let feature = classification.feature();

        let kind = match feature {
            Feature::Ongoing(_) => FeatureKind::Ongoing,
            Feature::Upcoming { .. } => FeatureKind::Upcoming,
            Feature::NothingScheduled => FeatureKind::None,
        };

        Self {
            kind,
            heading: feature.heading(),
            meetings: feature
                .meetings()
                .into_iter()
                .map(|meeting| CardView::new(meeting, None))
                .collect(),
        }
    }
}

impl From<&Classification> for HomeView {
    fn from(classification: &Classification) -> Self {
        HomeView::Loaded {
            feature: classification.into(),
            meetings: classification
                .listing()
                .map(|(meeting, badge)| CardView::new(meeting, badge.map(Badge::label)))
                .collect(),
        }
    }
}

impl HomeView {
    /// Meetings are classified against `now` only once they are loaded.
    pub fn new(state: &HomeState, now: DateTime<Tz>) -> Self {
        match state {
            HomeState::Loading => HomeView::Loading,
            HomeState::Error(message) => HomeView::Error {
                message: message.clone(),
            },
            HomeState::Loaded(meetings) => (&classify(meetings, now)).into(),
        }
    }
}
