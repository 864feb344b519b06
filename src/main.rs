use boxmaker::cli::run_from_env;
use boxmaker::init_logging;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    run_from_env()
}
