use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};

use ante::env::EnvConfig;
use ante::output::{message, print_registers, MsgColor};
use ante::{RunEnvironment, USAGE};

/// Ante is an esoteric programming language where all you've got is a deck of cards.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// `.ante` file to run. Exactly one is expected.
    paths: Vec<PathBuf>,
    /// Report progress on stderr
    #[arg(short, long)]
    verbose: bool,
    /// Print every instruction to stderr before it runs
    #[arg(short, long)]
    trace: bool,
    /// Dump the registers to stderr once the program finishes
    #[arg(short, long)]
    registers: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .terminal_links(false)
                .build(),
        )
    }))?;

    let [path] = args.paths.as_slice() else {
        println!("{USAGE}");
        return Ok(());
    };
    run(path, &args)
}

fn run(path: &Path, args: &Args) -> Result<()> {
    if args.verbose {
        file_message(MsgColor::Green, "Reading", path);
    }
    let src = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("can't read {}", path.display()))?;

    let out = BufWriter::new(io::stdout().lock());
    let mut program = RunEnvironment::from_source(&src, out);
    let trace = args.trace || EnvConfig::from_env().trace;
    program.set_trace(trace);

    if args.verbose {
        message(MsgColor::Green, "Running", &format!("{} cards", program.program().len()));
        if trace {
            message(MsgColor::Cyan, "Tracing", "line:pc instruction");
        }
    }
    program.run()?;

    if args.registers {
        print_registers(&program.state().reg);
    }
    if args.verbose {
        file_message(MsgColor::Green, "Completed", path);
    }
    Ok(())
}

fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}
