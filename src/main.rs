use std::env;
use std::io;
use std::sync::Arc;

use env_logger::Env;
use tokio::net::TcpListener;
use tokio::signal;

use meeting_board::cache::{self, MeetingCache};
use meeting_board::cli;
use meeting_board::server::{router, AppState};
use meeting_board::state::Loader;

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = cli::parse(env::args().skip(1).collect());

    let cache = MeetingCache::new(cache::Config {
        enabled: args.enable_cache,
        ttl: args.cache_ttl,
    });

    let state = Arc::new(AppState {
        loader: Loader::new(args.source.clone(), args.timezone, cache),
        calendar_name: args.calendar_name,
    });

    let listener = TcpListener::bind(args.address).await?;
    log::info!(
        "Serving meetings from {} ({}) at http://{}",
        args.source,
        args.timezone,
        args.address
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(err) = signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {err}");
            }
        })
        .await
}
