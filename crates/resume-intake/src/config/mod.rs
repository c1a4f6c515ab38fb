pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_from_str, MAX_CHANNEL_CAPACITY};
pub use schema::{AnalysisConfig, Config, EventsConfig, PresentationConfig};
