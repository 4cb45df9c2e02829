//! Terminal front end for the `termfolio` command core: environment
//! configuration, logging set-up, facade selection and a stdin REPL.

pub mod app;
pub mod config;
pub mod logging;
pub mod render;
pub mod sources;
