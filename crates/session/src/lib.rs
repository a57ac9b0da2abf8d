//! # session
//!
//! State behind one interactive review: the raw upload, its parsed and
//! scored samples, the selected date range and the current threshold and
//! encoding. Every change goes through [`Session::handle`], which recomputes
//! exactly what the change invalidates.

mod config;
mod error;
mod session;

pub use config::*;
pub use error::*;
pub use session::*;
