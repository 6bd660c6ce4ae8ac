use clap::Subcommand;

pub mod chunks;

#[derive(Subcommand)]
pub enum DseCommands {
    /// List the chunks of a SWDL, SMDL or SEDL file
    Chunks(chunks::ChunksArgs),
}

impl DseCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            DseCommands::Chunks(args) => args.handle(),
        }
    }
}
