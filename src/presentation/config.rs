//! UI configuration
//!
//! Key bindings for the terminal host.

pub mod keybindings;

pub use keybindings::KeyBindings;
