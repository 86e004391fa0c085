use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "browseract", version, about = "Run BrowserAct agents and workflows")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file; defaults to ~/.browseract/config.toml, then ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides api.api_key and BROWSERACT_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InputsArgs {
    #[arg(long)]
    pub workflow_id: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunAgentArgs {
    #[arg(long)]
    pub agent_id: String,

    /// Natural-language description of what the agent should do.
    #[arg(long)]
    pub task: String,

    /// Seconds to wait before stopping the task.
    #[arg(long)]
    pub timeout: Option<f64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunWorkflowArgs {
    #[arg(long)]
    pub workflow_id: String,

    /// Field value as FIELD_ID=VALUE, e.g. input-url=https://example.com or
    /// account-github=me. Can be specified multiple times.
    #[arg(long = "field", action = clap::ArgAction::Append)]
    pub fields: Vec<String>,

    #[arg(long)]
    pub timeout: Option<f64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ExecuteArgs {
    /// JSON file holding an array of items, each an object of node parameters.
    #[arg(long)]
    pub items: PathBuf,

    /// Record failing items as {"error": ...} and keep going.
    #[arg(long, default_value_t = false)]
    pub continue_on_fail: bool,

    /// Timeout in seconds for items that do not set their own.
    #[arg(long)]
    pub timeout: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List agents available to the API key.
    Agents,
    /// List workflows available to the API key.
    Workflows,
    /// Show the fields a workflow run needs.
    Inputs(InputsArgs),
    RunAgent(RunAgentArgs),
    RunWorkflow(RunWorkflowArgs),
    /// Run every item of an items file in order.
    Execute(ExecuteArgs),
}
