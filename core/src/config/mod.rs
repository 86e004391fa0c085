mod load;
mod types;

pub use load::{
    apply_env_overrides, get_data_dir, load_default, load_from_path, API_KEY_ENV, BASE_URL_ENV,
    CONFIG_ENV, LOG_LEVEL_ENV,
};
pub use types::{ApiConfig, AppConfig, LoggingConfig, PollConfig};
