use anyhow::Result;
use clap::Parser;

use snipfix::cli::args::CliArgs;
use snipfix::cli::driver;

fn main() -> Result<()> {
    // Installs a subscriber only when SNIPFIX_LOG or RUST_LOG is set.
    snipfix::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;
    println!("{}", output.rendered);
    std::process::exit(output.exit_code);
}
