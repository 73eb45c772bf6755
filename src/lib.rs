//! Jenkins Launcher — job search for keystroke launchers.

pub mod cache;
pub mod config;
pub mod error;
pub mod flatten;
pub mod icon;
pub mod jenkins;
pub mod launcher;
pub mod query;
pub mod tokens;
