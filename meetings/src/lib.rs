mod board;
mod classify;
mod error;
mod format;
mod parser;
mod structs;

#[cfg(feature = "ics")]
mod ics;

pub use board::{Badge, Feature};
pub use classify::{classify, Classification};
pub use error::Error;
pub use format::{format_date, format_time, plain_text};
pub use parser::{parse_document, parse_instant};
pub use structs::{Button, Meeting, MeetingId, MeetingRecord, MeetingsDocument};

#[cfg(feature = "ics")]
pub use crate::ics::to_ics;
