use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use log::info;
use rand::{rngs::SmallRng, Rng, SeedableRng};

#[derive(Parser)]
struct Args {
    #[arg(long)]
    output: PathBuf,

    /// size of the fixture in bytes
    #[arg(long)]
    size: u64,

    #[arg(long, value_enum, default_value_t = Fill::Zero)]
    fill: Fill,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Copy, Clone, ValueEnum)]
enum Fill {
    Zero,
    Random,
}

const CHUNK: usize = 64 * 1024;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut prng = SmallRng::seed_from_u64(args.seed);
    let mut fout = BufWriter::new(File::create(&args.output)?);
    let mut buf = vec![0u8; CHUNK];
    let mut remaining = args.size;
    while remaining > 0 {
        let n = remaining.min(CHUNK as u64) as usize;
        if let Fill::Random = args.fill {
            prng.fill(&mut buf[..n]);
        }
        fout.write_all(&buf[..n])?;
        remaining -= n as u64;
    }
    fout.flush()?;

    info!("wrote {} bytes to {:?}", args.size, args.output);
    Ok(())
}
