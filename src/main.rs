use std::fs;
use std::process::{ExitCode, Termination};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use colorforth::runtime::block;
use colorforth::runtime::config::Config;
use colorforth::runtime::error;
use colorforth::runtime::interpreter::Interpreter;

/// An interpreter and compiler for a dialect of colorForth.
#[derive(Parser, Debug)]
#[command(name = "colorforth", version, about)]
struct Cli {
    /// Path to a block file: a sequence of 256-cell (1024-byte) blocks.
    block_file: String,

    /// Which block to run first.
    #[arg(long, default_value_t = 0)]
    block: usize,

    /// Override the code heap's capacity, in instructions.
    #[arg(long)]
    heap_cells: Option<usize>,

    /// Raise the log level; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "colorforth=warn",
        1 => "colorforth=info",
        2 => "colorforth=debug",
        _ => "colorforth=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

fn run(cli: &Cli) -> error::Result<()> {
    let bytes = fs::read(&cli.block_file)?;
    let cells = block::decode_block_file(&bytes)?;
    info!(blocks = cells.len() / block::BLOCK_CELLS, path = %cli.block_file, "loaded block file");

    let mut config = Config::default();
    if let Some(heap_cells) = cli.heap_cells {
        config.heap_cells = heap_cells;
    }

    let mut interpreter = Interpreter::new(&config);
    interpreter.set_blocks(cells);
    block::run_block(&mut interpreter, cli.block)?;

    println!("{}", interpreter.dot_s());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => error.report(),
    }
}
