//! VFS Shell Library
//!
//! A terminal file browser and shell for a mountable virtual filesystem,
//! built on the Elm pattern: one [`model::Model`], one update step
//! ([`handlers::update`]) and detached [`messages::Task`]s that report back
//! with exactly one [`messages::Msg`] each.
//!
//! Exposes modules for the binary and for testing.

mod app;
pub mod config;
pub mod handlers;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;
pub mod ui;
pub mod vfs;
