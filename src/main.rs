use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use huffproc::bitio::{BitInput, BitOutput};
use huffproc::config::CompressionConfig;
use huffproc::{CompressionStats, Compressor};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "huffproc", version)]
#[command(about = "Compress and decompress files with tree-header Huffman coding.", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file overriding the default configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress INPUT into OUTPUT
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress INPUT into OUTPUT
    Decompress { input: PathBuf, output: PathBuf },
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set up the logger")
}

fn load_config(path: Option<&Path>) -> Result<CompressionConfig> {
    let Some(path) = path else {
        return Ok(CompressionConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    CompressionConfig::from_json(&json)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn open(input: &Path, output: &Path) -> Result<(BitInput<BufReader<File>>, BitOutput<BufWriter<File>>)> {
    let reader = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let writer =
        File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    Ok((
        BitInput::new(BufReader::new(reader)),
        BitOutput::new(BufWriter::new(writer)),
    ))
}

fn report(action: &str, stats: &CompressionStats) {
    tracing::info!(
        original_bytes = stats.original_bytes,
        compressed_bits = stats.compressed_bits,
        header_bits = stats.header_bits,
        symbols = stats.distinct_symbols,
        ratio = %format!("{:.3}", stats.ratio()),
        "{action}"
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let compressor = Compressor::new(load_config(cli.config.as_deref())?);

    match cli.command {
        Commands::Compress { input, output } => {
            let (mut src, mut dst) = open(&input, &output)?;
            let stats = compressor
                .compress(&mut src, &mut dst)
                .with_context(|| format!("failed to compress {}", input.display()))?;
            report("compressed", &stats);
        }
        Commands::Decompress { input, output } => {
            let (mut src, mut dst) = open(&input, &output)?;
            let stats = compressor
                .decompress(&mut src, &mut dst)
                .with_context(|| format!("failed to decompress {}", input.display()))?;
            report("decompressed", &stats);
        }
    }
    Ok(())
}
