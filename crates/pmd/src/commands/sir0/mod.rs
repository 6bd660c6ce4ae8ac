use clap::Subcommand;

pub mod unwrap;
pub mod wrap;

#[derive(Subcommand)]
pub enum Sir0Commands {
    /// Extract the payload of a SIR0 container
    Unwrap(unwrap::UnwrapArgs),
    /// Wrap a payload in a SIR0 container
    Wrap(wrap::WrapArgs),
}

impl Sir0Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Sir0Commands::Unwrap(args) => args.handle(),
            Sir0Commands::Wrap(args) => args.handle(),
        }
    }
}
