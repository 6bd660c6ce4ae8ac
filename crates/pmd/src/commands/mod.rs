use std::{fs::File, io::Write, path::Path};

use miette::{Context, IntoDiagnostic, Result};

pub mod dse;
pub mod identify;
pub mod px;
pub mod sir0;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle PKDPX and AT4PX compressed files
    Px {
        #[command(subcommand)]
        command: px::PxCommands,
    },

    /// Handle SIR0 containers
    Sir0 {
        #[command(subcommand)]
        command: sir0::Sir0Commands,
    },

    /// Handle DSE audio files
    Dse {
        #[command(subcommand)]
        command: dse::DseCommands,
    },

    /// Report what kind of content files hold
    Identify(identify::IdentifyArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Px { command } => command.handle(),
            Commands::Sir0 { command } => command.handle(),
            Commands::Dse { command } => command.handle(),
            Commands::Identify(args) => args.handle(),
        }
    }
}

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .into_diagnostic()
        .context(format!("reading {}", path.display()))
}

pub(crate) fn write_output(path: &Path, data: &[u8], overwrite: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .context(format!("creating {}", parent.display()))?;
    }

    let mut out = if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))?
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))?
    };

    out.write_all(data)
        .into_diagnostic()
        .context(format!("writing {}", path.display()))
}

/// Parse a decimal or `0x` prefixed hexadecimal offset
pub(crate) fn parse_offset(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid offset {value:?}: {e}"))
}

#[cfg(test)]
mod test {
    use crate::commands::parse_offset;

    #[test]
    fn offsets() {
        assert_eq!(parse_offset("16"), Ok(16));
        assert_eq!(parse_offset("0x10"), Ok(16));
        assert_eq!(parse_offset("0XfF"), Ok(255));
        assert!(parse_offset("0x").is_err());
        assert!(parse_offset("-1").is_err());
    }
}
