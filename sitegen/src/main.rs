use std::env;

use anyhow::Context as _;
use envconfig::Envconfig;
use sitegen::{Config, Invocation, Pipeline, USAGE};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    tracing_setup();

    // A bad invocation is not treated as a failure; scripts calling this
    // rely on the zero exit status.
    let Some(invocation) = Invocation::from_args(env::args().skip(1)) else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = Config::init_from_env().context("failed to get the config")?;

    let outcomes = Pipeline::new(&config, &invocation).run();

    let failed = outcomes.iter().filter(|o| !o.success()).count();
    if failed > 0 {
        tracing::warn!("{} of {} stages did not succeed", failed, outcomes.len());
    }

    Ok(())
}

fn tracing_setup() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .inspect_err(|err| {
            tracing::warn!(
                error = ?err,
                "failed to read env RUST_LOG, fallback to default value"
            );
        })
        .unwrap_or_else(|_| "info".into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
