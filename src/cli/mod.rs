//! Terminal output formatting
//!
//! Renders the chat conversation as colored terminal output.

pub mod display;

pub use display::ChatDisplay;
