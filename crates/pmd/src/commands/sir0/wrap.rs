use clap::Args;
use miette::Result;
use pmd_sir0::Sir0Options;
use std::path::PathBuf;
use tracing::info;

use crate::commands::{parse_offset, read_input, write_output};

#[derive(Args)]
pub struct WrapArgs {
    /// A payload with payload-relative pointers
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Where to write the container
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Offset of a pointer inside the payload, can be repeated
    #[arg(short, long = "pointer", value_name = "OFFSET", value_parser = parse_offset)]
    pointers: Vec<u32>,

    /// Offset of the subheader inside the payload
    #[arg(short, long, value_name = "OFFSET", value_parser = parse_offset)]
    subheader: Option<u32>,

    /// Alignment of the payload start
    #[arg(long, value_name = "BYTES", default_value_t = 64)]
    payload_alignment: usize,

    /// Alignment of the end of the file
    #[arg(long, value_name = "BYTES", default_value_t = 32)]
    alignment: usize,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl WrapArgs {
    pub fn handle(&self) -> Result<()> {
        let payload = read_input(&self.file)?;
        let options = Sir0Options::builder()
            .payload_alignment(self.payload_alignment)
            .alignment(self.alignment)
            .build();

        let wrapped = pmd_sir0::wrap(
            payload,
            self.pointers.iter().copied(),
            self.subheader,
            options,
        )?;

        info!("writing {}", self.output.display());
        write_output(&self.output, &wrapped, self.overwrite)
    }
}
