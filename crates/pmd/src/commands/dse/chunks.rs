use clap::Args;
use miette::Result;
use owo_colors::{OwoColorize, Stream::Stdout};
use pmd_dse::DseFile;
use std::path::PathBuf;

use crate::commands::read_input;

#[derive(Args)]
pub struct ChunksArgs {
    /// An input DSE file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ChunksArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let file = DseFile::read(&data)?;

        println!(
            "{} \"{}\" version {:#x}, {} bytes",
            file.kind.if_supports_color(Stdout, |t| t.bold()),
            file.header.name(),
            file.header.version,
            file.header.file_length
        );
        for chunk in &file.chunks {
            println!(
                "{:>8x}  {}  {:>8x}  {:#010x} {:#010x}",
                chunk.offset,
                chunk.tag_str().if_supports_color(Stdout, |t| t.green()),
                chunk.length,
                chunk.param1,
                chunk.param2
            );
        }
        Ok(())
    }
}
