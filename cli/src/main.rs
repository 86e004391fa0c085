use clap::Parser;
mod commands;
mod error;

use browseract_core::api as core_api;
use commands::cli::{self, Commands};
use error::CliError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<(), CliError> {
    let args = cli::Args::parse();
    let cfg = load_config(&args)?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    let node = browseract_plugins::factory::build_node(&cfg)
        .map_err(|e| CliError::Config(e.to_string()))?;
    tracing::debug!(
        target: "browseract.cli",
        base_url = %cfg.api.base_url,
        poll_delay_ms = cfg.poll.delay_ms,
        poll_cap = cfg.poll.max_attempts
    );

    let pretty = args.pretty;
    match args.command {
        Commands::Agents => commands::options::handle_agents(&node, pretty).await,
        Commands::Workflows => commands::options::handle_workflows(&node, pretty).await,
        Commands::Inputs(a) => commands::options::handle_inputs(&node, a, pretty).await,
        Commands::RunAgent(a) => commands::run::handle_run_agent(&node, a, pretty).await,
        Commands::RunWorkflow(a) => commands::run::handle_run_workflow(&node, a, pretty).await,
        Commands::Execute(a) => commands::run::handle_execute(node, a, pretty).await,
    }
}

fn load_config(args: &cli::Args) -> Result<core_api::AppConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => {
            let mut cfg = core_api::load_from_path(path)
                .map_err(|e| CliError::Config(e.to_string()))?;
            browseract_core::config::apply_env_overrides(&mut cfg, |name| {
                std::env::var(name).ok()
            });
            cfg
        }
        None => core_api::load_default().map_err(|e| CliError::Config(e.to_string()))?,
    };
    if let Some(key) = args.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        cfg.api.api_key = key.clone();
    }
    if let Some(url) = args.base_url.as_ref().filter(|u| !u.trim().is_empty()) {
        cfg.api.base_url = url.clone();
    }
    Ok(cfg)
}

/// A bare level applies to the `browseract.*` targets only; reqwest and hyper
/// stay at warn so polling does not flood the console. Full directive strings
/// pass through untouched.
fn default_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return "warn,browseract=info".to_string();
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("warn,browseract={level}")
}

fn init_tracing(logging: &core_api::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(default_directives(&logging.level)).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("browseract"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("browseract.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
