//! Terminal front end for uchess
//!
//! - `cli`: command line flags and config resolution
//! - `app`: the host loop feeding committed input to the session
//! - `render`: plain-text board and status view
//! - `logging`: file logging shared by `uchess` and `uciproxy`

pub mod app;
pub mod cli;
pub mod logging;
pub mod render;
