use chrono::{DateTime, TimeZone};
use scraper::{ElementRef, Html};

// Elements whose boundaries separate words when rendered.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "pre", "section", "table", "td",
    "th", "tr", "ul",
];

/// Long calendar date, e.g. `Thursday, April 2, 2026`.
pub fn format_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format("%A, %B %-d, %Y").to_string()
}

/// Twelve-hour clock time, e.g. `6:00 PM`.
pub fn format_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format("%-I:%M %p").to_string()
}

/// Text content of a markup fragment with runs of whitespace collapsed.
pub fn plain_text<S: AsRef<str>>(markup: S) -> String {
    let fragment = Html::parse_fragment(markup.as_ref());

    let mut text = String::new();
    collect_text(fragment.root_element(), &mut text);

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let block = BLOCK_ELEMENTS.contains(&child.value().name());
            if block {
                out.push(' ');
            }
            collect_text(child, out);
            if block {
                out.push(' ');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::America::Chicago;

    use super::*;

    #[test]
    fn long_date() {
        let instant = Chicago.with_ymd_and_hms(2026, 4, 2, 18, 0, 0).unwrap();
        assert_eq!(format_date(&instant), "Thursday, April 2, 2026");
    }

    #[test]
    fn clock_time() {
        let evening = Chicago.with_ymd_and_hms(2026, 4, 2, 18, 5, 0).unwrap();
        assert_eq!(format_time(&evening), "6:05 PM");

        let morning = Chicago.with_ymd_and_hms(2026, 4, 2, 0, 30, 0).unwrap();
        assert_eq!(format_time(&morning), "12:30 AM");
    }

    #[test]
    fn markup_is_reduced_to_text() {
        let markup = "<p>Bring a <strong>laptop</strong>!</p>\n<ul><li>Pizza</li><li>CTF</li></ul>";
        assert_eq!(plain_text(markup), "Bring a laptop! Pizza CTF");
    }

    #[test]
    fn block_boundaries_separate_words() {
        assert_eq!(
            plain_text("<p>Meet the officers.</p><p>Grab pizza.</p>"),
            "Meet the officers. Grab pizza."
        );
        assert_eq!(plain_text("Line one<br>Line two"), "Line one Line two");
        assert_eq!(
            plain_text("<ul><li>5:30 PM Pizza</li><li>6:00 PM Challenges</li></ul>"),
            "5:30 PM Pizza 6:00 PM Challenges"
        );
        assert_eq!(plain_text("<em>CTF</em>s"), "CTFs");
    }

    #[test]
    fn plain_strings_pass_through() {
        assert_eq!(plain_text("  Free   pizza  "), "Free pizza");
    }
}
