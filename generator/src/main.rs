use std::{env, path::Path};

use anyhow::Context as _;
use gen_basic::{Config, build};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();

    let name = program_name(&args);
    if args.len() > 2 {
        anyhow::bail!(help(name));
    }
    let config_path = args.get(1).map(Path::new);

    let config = Config::discover(config_path).context("failed to load config")?;
    log::info!(
        "generate {} -> {}",
        config.source_dir.display(),
        config.output_dir.display()
    );

    let report = build(&config)?;

    if !report.skipped.is_empty() {
        log::warn!("{} file(s) skipped", report.skipped.len());
    }
    log::info!("{} page(s) generated", report.generated.len());

    Ok(())
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("gen-basic", String::as_str)
}

fn help(name: &str) -> String {
    format!("Usage: {} [config.yaml]", name)
}
