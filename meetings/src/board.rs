use crate::format::format_date;
use crate::{Classification, Meeting};

/// The block featured at the top of the home page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feature<'a> {
    Ongoing(&'a Meeting),
    Upcoming {
        next: &'a Meeting,
        second: Option<&'a Meeting>,
    },
    NothingScheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ongoing,
    Next,
    Previous,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Ongoing => "Ongoing Event",
            Badge::Next => "Next Event",
            Badge::Previous => "Previous Event",
        }
    }
}

impl Feature<'_> {
    pub fn heading(&self) -> String {
        match self {
            Feature::Ongoing(meeting) => format!("Ongoing Event: {}", format_date(&meeting.date)),
            Feature::Upcoming { next, second } => format!(
                "Next Event{}: {}",
                if second.is_some() { "s" } else { "" },
                format_date(&next.date)
            ),
            Feature::NothingScheduled => "No Upcoming Events".to_string(),
        }
    }

    pub fn meetings(&self) -> Vec<&Meeting> {
        match *self {
            Feature::Ongoing(meeting) => vec![meeting],
            Feature::Upcoming { next, second } => std::iter::once(next).chain(second).collect(),
            Feature::NothingScheduled => Vec::new(),
        }
    }
}

impl Classification {
    /// An ongoing meeting takes precedence over the upcoming ones.
    pub fn feature(&self) -> Feature<'_> {
        if let Some(ongoing) = self.ongoing() {
            return Feature::Ongoing(ongoing);
        }

        match self.next() {
            Some(next) => Feature::Upcoming {
                next,
                second: self.second(),
            },
            None => Feature::NothingScheduled,
        }
    }

    pub fn badge(&self, meeting: &Meeting) -> Option<Badge> {
        let is = |selected: Option<&Meeting>| selected.is_some_and(|other| other.id == meeting.id);

        if is(self.ongoing()) {
            return Some(Badge::Ongoing);
        }

        if is(self.next()) {
            return Some(Badge::Next);
        }

        let today = self.now().date_naive();
        let day = meeting.date.with_timezone(&self.now().timezone()).date_naive();

        (day < today).then_some(Badge::Previous)
    }

    /// Every meeting, latest first, with the badge its card carries.
    pub fn listing(&self) -> impl Iterator<Item = (&Meeting, Option<Badge>)> + '_ {
        self.sorted()
            .iter()
            .rev()
            .map(move |meeting| (meeting, self.badge(meeting)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone};
    use chrono_tz::{America::Chicago, Tz};

    use super::*;
    use crate::{classify, MeetingId};

    fn at(day: u32, hour: u32) -> DateTime<Tz> {
        Chicago.with_ymd_and_hms(2026, 4, day, hour, 0, 0).unwrap()
    }

    fn meeting(id: usize, date: DateTime<Tz>) -> Meeting {
        Meeting {
            id: MeetingId(id),
            title: format!("Meeting {id}"),
            date,
            end_date: None,
            location: None,
            speaker: None,
            description: None,
            schedule: None,
            thumbnail: None,
            buttons: Vec::new(),
        }
    }

    #[test]
    fn ongoing_is_featured_first() {
        let meetings = vec![meeting(0, at(2, 9)), meeting(1, at(3, 9))];
        let board = classify(&meetings, at(2, 10));

        let feature = board.feature();
        assert_eq!(feature, Feature::Ongoing(&board.sorted()[0]));
        assert_eq!(feature.heading(), "Ongoing Event: Thursday, April 2, 2026");
        assert_eq!(feature.meetings().len(), 1);
    }

    #[test]
    fn upcoming_pair_uses_plural_heading() {
        let meetings = vec![meeting(0, at(3, 9)), meeting(1, at(3, 14))];
        let board = classify(&meetings, at(2, 10));

        let feature = board.feature();
        assert_eq!(feature.heading(), "Next Events: Friday, April 3, 2026");

        let featured = feature.meetings();
        assert_eq!(featured.len(), 2);
        assert_eq!(featured[0].id, MeetingId(0));
        assert_eq!(featured[1].id, MeetingId(1));
    }

    #[test]
    fn single_upcoming_uses_singular_heading() {
        let meetings = vec![meeting(0, at(3, 9))];
        let board = classify(&meetings, at(2, 10));

        assert_eq!(board.feature().heading(), "Next Event: Friday, April 3, 2026");
    }

    #[test]
    fn nothing_scheduled() {
        let meetings = vec![meeting(0, at(1, 9))];
        let board = classify(&meetings, at(2, 10));

        assert_eq!(board.feature(), Feature::NothingScheduled);
        assert_eq!(board.feature().heading(), "No Upcoming Events");
        assert!(board.feature().meetings().is_empty());
    }

    #[test]
    fn listing_is_latest_first_with_badges() {
        let meetings = vec![
            meeting(0, at(1, 9)),
            meeting(1, at(2, 9)),
            meeting(2, at(2, 18)),
            meeting(3, at(9, 18)),
            meeting(4, at(16, 18)),
        ];
        let board = classify(&meetings, at(2, 10));

        let listing = board
            .listing()
            .map(|(meeting, badge)| (meeting.id.0, badge))
            .collect::<Vec<_>>();

        assert_eq!(
            listing,
            vec![
                (4, None),
                (3, None),
                (2, Some(Badge::Next)),
                (1, Some(Badge::Ongoing)),
                (0, Some(Badge::Previous)),
            ]
        );
    }

    #[test]
    fn earlier_today_is_not_previous() {
        // over, but still today, so only the calendar day is compared
        let mut finished = meeting(0, at(2, 8));
        finished.end_date = Some(at(2, 9));
        let board = classify(&[finished], at(2, 10));

        assert_eq!(board.badge(&board.sorted()[0]), None);
    }

    #[test]
    fn labels() {
        assert_eq!(Badge::Ongoing.label(), "Ongoing Event");
        assert_eq!(Badge::Next.label(), "Next Event");
        assert_eq!(Badge::Previous.label(), "Previous Event");
    }
}
