//! UI module for the TUI.

mod detect;
mod footer;
mod header;
mod layout;

pub use layout::draw_ui;
