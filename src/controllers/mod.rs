pub mod osc;

pub use osc::{apply_commands, OscCommand, OscController, OscSender};
