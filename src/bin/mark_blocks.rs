use std::path::PathBuf;

use anyhow::Context;
use block_marker::{MarkConfig, Method, DEFAULT_BLOCK_SIZE};
use clap::Parser;

/// Marks every block in a file.
#[derive(Parser)]
#[command(about)]
struct Args {
    /// the name of the file to mark
    #[arg(value_name = "FILENAME")]
    filename: PathBuf,

    /// the block size
    #[arg(short = 'b', value_name = "SIZE", default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u64,

    #[arg(long, value_enum, default_value_t = Method::Seek)]
    method: Method,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = MarkConfig::new(args.filename)
        .with_block_size(args.block_size)
        .with_method(args.method);
    block_marker::mark(&config).with_context(|| format!("marking {:?}", config.path))?;

    Ok(())
}
