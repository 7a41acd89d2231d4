pub mod album;
pub mod app;
pub mod config;
pub mod provider;
pub mod shared;
pub mod tracks;
pub mod tui;
pub mod wizard;
