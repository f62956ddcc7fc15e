pub mod advanced;
pub mod apis;
pub mod arguments;
pub mod cache;
pub mod config;
pub mod constants;
pub mod errors; // Structured error handling
pub mod leaders;
pub mod logger;
pub mod players;
pub mod scoreboard;
pub mod teams;
pub mod webserver;
