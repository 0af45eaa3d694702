use chrono::DateTime;
use chrono_tz::Tz;

use crate::structs::same_day;
use crate::Meeting;

/// Display-relevant views of a meeting batch at one instant.
///
/// Selections are positions into the sorted list, so they always refer to
/// meetings of this batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    now: DateTime<Tz>,
    sorted: Vec<Meeting>,
    ongoing: Option<usize>,
    next: Option<usize>,
    second: Option<usize>,
}

/// Sorts `meetings` by start and picks the ongoing, next and second meeting
/// relative to `now`. Calendar days are reckoned in the zone of `now`, and the
/// sorted copies carry their instants in that zone.
pub fn classify(meetings: &[Meeting], now: DateTime<Tz>) -> Classification {
    let tz = now.timezone();
    let mut sorted = meetings
        .iter()
        .map(|meeting| meeting.with_timezone(&tz))
        .collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let ongoing = sorted.iter().position(|meeting| meeting.is_ongoing(&now));

    let next = sorted
        .iter()
        .enumerate()
        .find(|(idx, meeting)| Some(*idx) != ongoing && meeting.date >= now)
        .map(|(idx, _)| idx);

    let second = next.and_then(|next| {
        let next_day = &sorted[next].date;
        sorted
            .iter()
            .enumerate()
            .find(|(idx, meeting)| {
                *idx != next && same_day(&meeting.date, next_day) && meeting.date >= now
            })
            .map(|(idx, _)| idx)
    });

    Classification {
        now,
        sorted,
        ongoing,
        next,
        second,
    }
}

impl Classification {
    pub fn now(&self) -> &DateTime<Tz> {
        &self.now
    }

    pub fn sorted(&self) -> &[Meeting] {
        &self.sorted
    }

    pub fn ongoing(&self) -> Option<&Meeting> {
        self.ongoing.map(|idx| &self.sorted[idx])
    }

    pub fn next(&self) -> Option<&Meeting> {
        self.next.map(|idx| &self.sorted[idx])
    }

    pub fn second(&self) -> Option<&Meeting> {
        self.second.map(|idx| &self.sorted[idx])
    }
}
