pub mod config_load;
pub mod config_types;

pub use config_load::{Config, LoadError};
pub use config_types::{AssetConfig, OscConfig, WindowConfig};
