//! Argument scanning for the `fpack` binary.
//!
//! Arguments are read left to right and each flag grabs a fixed number of
//! operands, so several commands can be given in one invocation. Anything
//! unrecognised is reported and skipped, including a flag that is short of
//! operands: a trailing `-up` prints `Unknown argument: -up`.
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;

use crate::logger::LoggerConfig;

pub const USAGE: &str = "\
Help: Use -p <name1> <name2> <pack_name> to pack two files
Help: Use -up <name> to unpack a file
Help: Use -l <name> to list the entries of a file
Help: Use -v or -q for more or less output
Help: A flag without all of its operands is an unknown argument";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Pack {
        sources: Vec<PathBuf>,
        destination: PathBuf,
    },
    Unpack {
        archive: PathBuf,
    },
    List {
        archive: PathBuf,
    },
    Verbose,
    Quiet,
    /// Unrecognised, or a flag given without all of its operands
    Unknown(String),
}

pub fn parse(args: impl IntoIterator<Item = OsString>) -> Vec<Command> {
    let args: Vec<OsString> = args.into_iter().collect();
    let mut commands = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].to_string_lossy().into_owned();
        let operands = match arg.as_str() {
            "-p" => 3,
            "-up" | "-l" => 1,
            _ => 0,
        };
        if i + operands >= args.len() {
            commands.push(Command::Unknown(arg));
            i += 1;
            continue;
        }
        let operand = |n: usize| PathBuf::from(&args[i + n]);

        let command = match arg.as_str() {
            "-h" | "--help" => Command::Help,
            "-v" => Command::Verbose,
            "-q" => Command::Quiet,
            "-p" => Command::Pack {
                sources: vec![operand(1), operand(2)],
                destination: operand(3),
            },
            "-up" => Command::Unpack {
                archive: operand(1),
            },
            "-l" => Command::List {
                archive: operand(1),
            },
            _ => Command::Unknown(arg),
        };
        commands.push(command);
        i += 1 + operands;
    }

    commands
}

/// Log level picked by the last `-v` or `-q`
pub fn logger_config(commands: &[Command]) -> LoggerConfig {
    let mut config = LoggerConfig::default();
    for command in commands {
        match command {
            Command::Verbose => config.level = log::LevelFilter::Debug,
            Command::Quiet => config.level = log::LevelFilter::Warn,
            _ => {}
        }
    }
    config
}

/// Run `commands` in order, stopping at the first one that fails
pub fn run_all(commands: impl IntoIterator<Item = Command>) -> anyhow::Result<()> {
    for command in commands {
        run(command)?;
    }
    Ok(())
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Help => println!("{}", USAGE),
        Command::Pack {
            sources,
            destination,
        } => {
            let report = crate::pack(&sources, &destination)
                .with_context(|| format!("Failed to pack {}", destination.display()))?;
            log::info!(
                "Packed {} of {} files into {}",
                report.entries.len(),
                sources.len(),
                destination.display()
            );
        }
        Command::Unpack { archive } => {
            let report = crate::unpack(&archive)
                .with_context(|| format!("Failed to unpack {}", archive.display()))?;
            log::info!(
                "Unpacked {} files from {}, skipped {}",
                report.entries.len(),
                archive.display(),
                report.skipped.len()
            );
        }
        Command::List { archive } => {
            let headers = crate::list(&archive)
                .with_context(|| format!("Failed to list {}", archive.display()))?;
            for header in headers {
                println!("{}", header);
            }
        }
        Command::Verbose | Command::Quiet => {}
        Command::Unknown(arg) => println!("Unknown argument: {}", arg),
    }
    Ok(())
}
