use clap::Args;
use miette::{miette, Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use pmd_px::PxContainer;

use crate::commands::px::compress::CompressionArgs;
use crate::commands::{read_input, write_output};

#[derive(Args)]
pub struct BatchArgs {
    /// A directory to read files from
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A directory to write results to, the input layout is kept
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// Compress every file
    #[arg(long, conflicts_with = "decompress", required_unless_present = "decompress")]
    compress: bool,

    /// Decompress every PX file, other files are skipped
    #[arg(long)]
    decompress: bool,

    #[command(flatten)]
    compression: CompressionArgs,

    /// Allow overwriting the targets
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

enum Outcome {
    Written,
    Skipped,
}

impl BatchArgs {
    pub fn handle(&self) -> Result<()> {
        let files: Vec<PathBuf> = WalkDir::new(&self.directory)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .map(|e| e.into_path())
            .collect();

        if files.is_empty() {
            return Err(miette!("directory is empty"));
        }

        let results: Vec<(&PathBuf, Result<Outcome>)> = files
            .par_iter()
            .map(|path| (path, self.process(path)))
            .collect();

        let mut written = 0;
        let mut skipped = 0;
        let mut failed = 0;
        for (path, result) in results {
            match result {
                Ok(Outcome::Written) => written += 1,
                Ok(Outcome::Skipped) => skipped += 1,
                Err(e) => {
                    error!("{}: {e:?}", path.display());
                    failed += 1;
                }
            }
        }

        info!("{written} written, {skipped} skipped, {failed} failed");
        if failed > 0 {
            return Err(miette!("{failed} of {} files failed", files.len()));
        }
        Ok(())
    }

    fn process(&self, path: &Path) -> Result<Outcome> {
        let relative = path
            .strip_prefix(&self.directory)
            .map_err(|_| miette!("{} is outside {}", path.display(), self.directory.display()))?;
        let target = self.output.join(relative);
        let data = read_input(path)?;

        let out = if self.decompress {
            let container = match PxContainer::read(&data) {
                Ok(container) => container,
                Err(e) if e.is_bad_magic() => {
                    warn!("skipping {}, not a PX container", path.display());
                    return Ok(Outcome::Skipped);
                }
                Err(e) => return Err(e.into()),
            };
            container.decompress()?
        } else {
            self.compression
                .compress(&data)
                .context(format!("compressing {}", path.display()))?
        };

        info!("writing {}", target.display());
        write_output(&target, &out, self.overwrite)?;
        Ok(Outcome::Written)
    }
}
