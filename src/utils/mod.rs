//! Utility modules for Arrow handling, file IO and logging.

pub mod arrow;
pub mod io;
pub mod logging;
