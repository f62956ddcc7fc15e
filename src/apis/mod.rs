pub mod client;
pub mod statsapi;
