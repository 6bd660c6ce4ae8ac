use clap::Args;
use miette::{miette, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use pmd_content::{Classifier, ContentBlock};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::commands::read_input;

#[derive(Args)]
pub struct IdentifyArgs {
    /// Files or directories to look at
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Fail if any file is not recognised
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl IdentifyArgs {
    pub fn handle(&self) -> Result<()> {
        let files: Vec<PathBuf> = self
            .paths
            .iter()
            .flat_map(|path| {
                WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| !e.file_type().is_dir())
                    .map(|e| e.into_path())
            })
            .collect();

        let classifier = Classifier::with_default_rules();
        let results: Vec<Result<Option<ContentBlock>>> = files
            .par_iter()
            .map(|path| identify(&classifier, path))
            .collect();

        let mut unknown = 0;
        let mut failed = 0;
        for (path, result) in files.iter().zip(results) {
            match result {
                Ok(Some(block)) => println!(
                    "{}: {} ({} bytes)",
                    path.display(),
                    block
                        .content_type
                        .if_supports_color(Stdout, |t| t.green()),
                    block.len()
                ),
                Ok(None) => {
                    unknown += 1;
                    println!(
                        "{}: {}",
                        path.display(),
                        "unknown".if_supports_color(Stdout, |t| t.red())
                    );
                }
                Err(e) => {
                    failed += 1;
                    warn!("{}: {e:?}", path.display());
                }
            }
        }

        if failed > 0 {
            return Err(miette!("{failed} of {} files could not be read", files.len()));
        }
        if self.strict && unknown > 0 {
            return Err(miette!("{unknown} files were not recognised"));
        }
        Ok(())
    }
}

fn identify(classifier: &Classifier, path: &Path) -> Result<Option<ContentBlock>> {
    let data = read_input(path)?;
    let extension = path.extension().and_then(|e| e.to_str());
    classify(classifier, &data, extension)
}

/// `None` when no rule recognises the data. A recognised but damaged file is an error.
fn classify(
    classifier: &Classifier,
    data: &[u8],
    extension: Option<&str>,
) -> Result<Option<ContentBlock>> {
    match classifier.classify(data, extension) {
        Ok(block) => Ok(Some(block)),
        Err(pmd_content::Error::NoMatch { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
