pub mod handler;

pub use handler::{handle_input, Command};
