mod load;
mod types;
mod vocabulary;

pub use load::{get_data_dir, load_default, load_from_path};
pub use types::{ApiConfig, AppConfig, DumpConfig, LoggingConfig, PeriodConfig};
pub use vocabulary::{default_channels, default_products, default_tour_types};
