use clap::{Subcommand, ValueEnum};
use pmd_px::{CompressionLevel, PxFormat};

pub mod batch;
pub mod compress;
pub mod decompress;

#[derive(Subcommand)]
pub enum PxCommands {
    /// Decompress a single file
    Decompress(decompress::DecompressArgs),
    /// Compress a single file
    Compress(compress::CompressArgs),
    /// Compress or decompress every file under a directory
    Batch(batch::BatchArgs),
}

impl PxCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            PxCommands::Decompress(args) => args.handle(),
            PxCommands::Compress(args) => args.handle(),
            PxCommands::Batch(args) => args.handle(),
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Pkdpx,
    At4px,
}

impl From<Format> for PxFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pkdpx => PxFormat::Pkdpx,
            Format::At4px => PxFormat::At4px,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Store,
    Fast,
    #[default]
    Best,
}

impl From<Level> for CompressionLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Store => CompressionLevel::Store,
            Level::Fast => CompressionLevel::Fast,
            Level::Best => CompressionLevel::Best,
        }
    }
}
