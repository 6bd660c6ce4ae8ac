use clap::Args;
use miette::Result;
use pmd_px::PxOptions;
use pmd_sir0::Sir0Options;
use std::path::PathBuf;
use tracing::info;

use crate::commands::px::{Format, Level};
use crate::commands::{read_input, write_output};

/// Settings shared by every command that compresses
#[derive(Args, Debug, Clone, Copy)]
pub struct CompressionArgs {
    /// Container to produce
    #[arg(long, value_enum, default_value_t = Format::Pkdpx)]
    pub format: Format,

    /// Effort spent looking for repeats
    #[arg(long, value_enum, default_value_t = Level::Best)]
    pub level: Level,

    /// Never emit pattern commands
    #[arg(long, default_value_t = false)]
    pub no_patterns: bool,

    /// Wrap the container in SIR0
    #[arg(long, default_value_t = false)]
    pub sir0: bool,
}

impl CompressionArgs {
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let options = PxOptions::builder()
            .level(self.level.into())
            .patterns(!self.no_patterns)
            .build();

        Ok(if self.sir0 {
            pmd_px::compress_sir0(data, self.format.into(), options, Sir0Options::default())?
        } else {
            pmd_px::compress(data, self.format.into(), options)?
        })
    }
}

#[derive(Args)]
pub struct CompressArgs {
    /// A file to compress
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Where to write the container
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    #[command(flatten)]
    compression: CompressionArgs,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl CompressArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let compressed = self.compression.compress(&data)?;

        info!(
            "writing {} ({} -> {} bytes)",
            self.output.display(),
            data.len(),
            compressed.len()
        );
        write_output(&self.output, &compressed, self.overwrite)
    }
}
