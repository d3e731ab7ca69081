//! Startup configuration assembly so CLI flags and saved prefs resolve consistently.

mod cli;
mod theme;

pub(crate) use cli::{DubConfig, DEFAULT_SERVER};
pub(crate) use theme::materialize;
