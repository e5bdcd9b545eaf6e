use anyhow::Result;

use tengyur_lint::config::Config;
use tengyur_lint::driver;

fn main() -> Result<()> {
    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;

    // RUST_LOG wins over --log-level when both are set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let summary = driver::run(&config)?;
    log::info!(
        "checked {} volumes ({} lines), skipped {}, report written to {}",
        summary.volumes,
        summary.lines,
        summary.skipped,
        config.output.display()
    );
    Ok(())
}
