pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod events;
