use anyhow::Result;
use clap::Parser;
use fintrack::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    fintrack::init_tracing(cli.verbose);
    cli.run()
}
