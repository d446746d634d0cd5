use anyhow::Result;
use clap::Parser;
use tracing::info;

use demofx::cli::Args;
use demofx::config::Config;
use demofx::display;

fn main() -> Result<()> {
    // Initialize logging; stdout belongs to the terminal UI
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive("demofx=info".parse()?))
        .init();

    let args = Args::parse();

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Explicit path must load; the default path falls back to defaults
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    info!("Starting demofx with {}", config.effect.kind.name());

    display::terminal::run(config)
}
