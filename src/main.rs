use anyhow::Result;
use clap::Parser;

use flatdb::cli::CliArgs;
use flatdb::config::FlatDbConfig;

fn main() -> Result<()> {
    flatdb::tracing::init();

    let args = CliArgs::parse();
    let mut config = FlatDbConfig::load();
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    tracing::debug!(command = ?args.command, data_dir = %config.data_dir().display(), "Running");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    flatdb::commands::run(args.command, &config, &mut out)
}
