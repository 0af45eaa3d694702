use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{Error, Meeting, MeetingId, MeetingRecord, MeetingsDocument};

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a `{ "meetings": [...] }` document. Wall-clock times without an
/// offset are read in `tz`. One unreadable date rejects the whole batch.
pub fn parse_document<S: AsRef<str>>(json: S, tz: Tz) -> Result<Vec<Meeting>, Error> {
    let document: MeetingsDocument = serde_json::from_str(json.as_ref())?;

    document
        .meetings
        .into_iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record, tz))
        .collect()
}

fn parse_record(index: usize, record: MeetingRecord, tz: Tz) -> Result<Meeting, Error> {
    let invalid = |field: &'static str, value: &str| Error::InvalidDate {
        index,
        field,
        value: value.to_string(),
    };

    let date = parse_instant(&record.date, tz).ok_or_else(|| invalid("date", &record.date))?;

    let end_date = match &record.end_date {
        Some(raw) => Some(parse_instant(raw, tz).ok_or_else(|| invalid("endDate", raw))?),
        None => None,
    };

    Ok(Meeting {
        id: MeetingId(index),
        title: record.title,
        date,
        end_date,
        location: record.location,
        speaker: record.speaker,
        description: record.description,
        schedule: record.schedule,
        thumbnail: record.thumbnail,
        buttons: record.buttons,
    })
}

/// Reads an ISO-8601 instant. Offsets are honoured, bare date-times are local
/// to `tz` and bare dates are midnight UTC.
pub fn parse_instant(value: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&tz));
    }

    if let Some(naive) = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return localize(naive, tz);
    }

    let midnight = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;

    Some(Utc.from_utc_datetime(&midnight).with_timezone(&tz))
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        // skipped by a DST transition
        LocalResult::None => tz
            .from_local_datetime(&(naive + TimeDelta::try_hours(1)?))
            .earliest(),
    }
}
