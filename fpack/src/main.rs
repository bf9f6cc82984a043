use std::env;

use fpack::cli;

fn main() -> anyhow::Result<()> {
    let commands = cli::parse(env::args_os().skip(1));
    cli::logger_config(&commands).init()?;
    cli::run_all(commands)
}
