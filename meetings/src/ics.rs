use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use ics::{
    escape_text,
    properties::{Description, DtEnd, DtStart, Location, Summary, URL},
};

use crate::format::plain_text;
use crate::Meeting;

#[must_use]
pub fn to_ics<'a>(name: &'a str, meetings: &'a [Meeting]) -> ics::ICalendar<'a> {
    let mut icalendar = ics::ICalendar::new("2.0", name);

    for meeting in meetings {
        icalendar.add_event(meeting.to_ics());
    }

    icalendar
}

fn stamp(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Utc)
        .format("%Y%m%dT%H%M%SZ")
        .to_string()
}

impl Meeting {
    #[must_use]
    pub fn to_ics(&self) -> ics::Event<'_> {
        let start = stamp(&self.date);
        let id = format!("{}_{}", start, self.title.replace(' ', "-"));

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));

        if let Some(end_date) = &self.end_date {
            ics_event.push(DtEnd::new(stamp(end_date)));
        }

        ics_event.push(Summary::new(escape_text(self.title.as_str())));

        if let Some(location) = &self.location {
            ics_event.push(Location::new(escape_text(location.as_str())));
        }

        let description = [
            self.speaker.as_ref().map(|speaker| format!("Speaker: {speaker}")),
            self.description.as_ref().map(plain_text),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

        if !description.is_empty() {
            ics_event.push(Description::new(escape_text(description)));
        }

        if let Some(button) = self.buttons.first() {
            ics_event.push(URL::new(button.link.as_str()));
        }

        ics_event
    }
}
