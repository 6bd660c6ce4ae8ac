use clap::Args;
use itertools::Itertools;
use miette::Result;
use pmd_sir0::Sir0;
use std::path::PathBuf;
use tracing::info;

use crate::commands::{read_input, write_output};

#[derive(Args)]
pub struct UnwrapArgs {
    /// An input SIR0 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Where to write the payload
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl UnwrapArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let sir0 = Sir0::read(&data)?;

        if let Some(subheader) = sir0.subheader {
            info!("subheader at {subheader:#x}");
        }
        info!(
            "{} pointers: {}",
            sir0.pointer_list.len(),
            sir0.pointer_list.iter().map(|p| format!("{p:#x}")).join(" ")
        );

        info!("writing {}", self.output.display());
        write_output(&self.output, &sir0.payload, self.overwrite)
    }
}
