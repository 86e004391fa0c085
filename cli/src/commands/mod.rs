pub mod cli;
pub mod options;
pub mod run;

use serde_json::Value;

use crate::error::CliError;

pub(crate) fn print_json(value: &Value, pretty: bool) -> Result<(), CliError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| CliError::Anyhow(e.into()))?;
    println!("{}", out);
    Ok(())
}
