use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::process;

use chrono_tz::Tz;
use getopts::{Matches, Options};
use tokio::time::Duration;

use crate::source::Source;

#[derive(Debug)]
pub struct Args {
    pub address: SocketAddr,
    pub source: Source,
    pub timezone: Tz,
    pub calendar_name: String,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "s",
        "source",
        "URL or file path of the meetings document [Default: meetings.json]",
        "SOURCE",
    );
    opts.optopt(
        "z",
        "timezone",
        "IANA time zone the meeting times are written in [Default: UTC]",
        "TIMEZONE",
    );
    opts.optopt(
        "n",
        "name",
        concat!(
            "Name of the published calendar [Default: ",
            env!("CARGO_PKG_NAME"),
            "]"
        ),
        "NAME",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Enable caching of loaded meetings [Default: false]",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Time-to-live for cached meetings [Default: 300]",
        "SECONDS",
    );
    opts
}

/// Parses the command line, printing usage or errors and exiting where the
/// process cannot continue.
pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    match from_matches(&matches) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    }
}

fn invalid(option: &str, err: impl Display) -> String {
    format!("Provided value for option '{option}' is invalid: {err}")
}

fn from_matches(matches: &Matches) -> Result<Args, String> {
    let address = matches
        .opt_get_default("address", SocketAddr::from(([127, 0, 0, 1], 8080)))
        .map_err(|err| invalid("address", err))?;

    let source = matches
        .opt_get_default("source", Source::File("meetings.json".into()))
        .map_err(|err| invalid("source", err))?;

    let timezone = matches
        .opt_get_default("timezone", chrono_tz::UTC)
        .map_err(|err| invalid("timezone", err))?;

    let calendar_name = matches
        .opt_str("name")
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let enable_cache = matches.opt_present("enable-cache");

    let cache_ttl = matches
        .opt_get_default("cache-ttl", 300)
        .map(Duration::from_secs)
        .map_err(|err| invalid("cache-ttl", err))?;

    Ok(Args {
        address,
        source,
        timezone,
        calendar_name,
        enable_cache,
        cache_ttl,
    })
}
