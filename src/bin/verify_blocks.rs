use std::path::PathBuf;

use anyhow::{bail, Context};
use block_marker::DEFAULT_BLOCK_SIZE;
use clap::Parser;

/// Checks that every block in a file starts with its offset marker.
#[derive(Parser)]
#[command(about)]
struct Args {
    #[arg(value_name = "FILENAME")]
    filename: PathBuf,

    #[arg(short = 'b', value_name = "SIZE", default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let report = block_marker::verify(&args.filename, args.block_size)
        .with_context(|| format!("verifying {:?}", args.filename))?;

    for m in &report.mismatches {
        match m.found {
            Some(found) => println!("{:#010x}: marker reads {:#010x}", m.offset, found),
            None => println!("{:#010x}: no marker", m.offset),
        }
    }
    println!(
        "file {:?} has {} bytes --> {} blocks, {} bad",
        args.filename,
        report.file_len,
        report.blocks,
        report.mismatches.len()
    );

    if !report.is_ok() {
        bail!("{} of {} blocks are not marked", report.mismatches.len(), report.blocks);
    }
    Ok(())
}
