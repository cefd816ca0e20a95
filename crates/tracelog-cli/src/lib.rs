//! Terminal front end for the trace log dashboard.

pub mod commands;
pub mod logging;
pub mod summary;
