pub mod album_args;
pub mod cli;
pub mod command_handlers;
pub mod command_support;
