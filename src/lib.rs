//! Fire-and-forget disk capacity event provider: samples the target volume
//! on a fixed interval and publishes the reading as a named event to a host
//! status bar.

pub mod cli;
pub mod config;
pub mod event;
pub mod notify;
pub mod poll;
pub mod volume;
