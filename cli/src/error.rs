use browseract_core::api::AdapterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    Input(String),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    // 0: success
    // 11: config error
    // 20: transport / IO error
    // 30: validation or bad input
    // 40: malformed API response
    // 50: internal/uncategorized
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Input(_) => 30,
            CliError::Adapter(e) => match e {
                AdapterError::Transport(_) => 20,
                AdapterError::Validation(_) => 30,
                AdapterError::Api { .. } => 40,
            },
            CliError::Io(_) => 20,
            CliError::Anyhow(_) => 50,
        }
    }
}
