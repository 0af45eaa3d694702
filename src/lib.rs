pub mod cache;
pub mod cli;
pub mod server;
pub mod source;
pub mod state;
pub mod view;
