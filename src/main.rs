use anyhow::Result;
use clap::Parser;
use teller::cli::Cli;
use teller::logging::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run()
}
