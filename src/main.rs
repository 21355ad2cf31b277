use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Runtime;
use tsne_expression_plot::{Cli, build_chart_payload};

fn main() -> Result<()> {
    // A. Init Logging (stderr, so stdout stays clean for the payload)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Fetch and prepare
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let payload = rt.block_on(build_chart_payload(&args))?;

    // D. Emit
    let json = serde_json::to_string_pretty(&payload).context("Failed to serialize chart payload")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("✅ Chart payload written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
