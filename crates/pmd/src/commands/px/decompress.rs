use clap::Args;
use miette::Result;
use pmd_px::PxContainer;
use std::path::PathBuf;
use tracing::info;

use crate::commands::{read_input, write_output};

#[derive(Args)]
pub struct DecompressArgs {
    /// A PKDPX or AT4PX file, SIR0 wrapped or not
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Where to write the decompressed data
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecompressArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let container = PxContainer::read(&data)?;
        let decompressed = container.decompress()?;

        info!(
            "writing {} ({}, {} -> {} bytes)",
            self.output.display(),
            container.format,
            data.len(),
            decompressed.len()
        );
        write_output(&self.output, &decompressed, self.overwrite)
    }
}
