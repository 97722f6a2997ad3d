pub mod bypass;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod greeting;
pub mod handlers;
pub mod page;
pub mod server;
