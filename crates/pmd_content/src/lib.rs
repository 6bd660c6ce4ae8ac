//! Content type detection for the files found in *Pokémon Mystery Dungeon*.
//!
//! Game files rarely have meaningful extensions, so their type is found from their contents.
//! A [`Classifier`] holds an ordered list of [`Rule`]s. Each rule first probes the magic numbers
//! of the data, then confirms the format by parsing its headers with the matching library:
//!
//! | Rule          | Recognises                                  | Library      |
//! |---------------|---------------------------------------------|--------------|
//! | `Pkdpx`       | PKDPX containers, plain or SIR0 wrapped     | `pmd_px`     |
//! | `At4px`       | AT4PX containers, plain or SIR0 wrapped     | `pmd_px`     |
//! | `Sir0`        | Any other SIR0 container                    | `pmd_sir0`   |
//! | `Dse(kind)`   | SWDL, SMDL and SEDL audio files             | `pmd_dse`    |
//! | `Magic {..}`  | A caller-defined magic number               |              |
//!
//! ```
//! # fn doit() -> pmd_content::Result<()>
//! # {
//! use pmd_content::{Classifier, ContentType};
//! use pmd_px::{compress, PxFormat, PxOptions};
//!
//! let classifier = Classifier::with_default_rules();
//!
//! let data = compress(b"Spinda's Cafe", PxFormat::At4px, PxOptions::default())?;
//! let block = classifier.classify(&data, None)?;
//! assert_eq!(block.content_type, ContentType::At4px);
//! assert_eq!(block.end, data.len());
//! # Ok(())
//! # }
//! # doit().unwrap();
//! ```

pub mod classifier;
pub mod error;
pub mod rule;
pub mod types;

pub use classifier::Classifier;
pub use error::{Error, Result};
pub use rule::Rule;
pub use types::{ContentBlock, ContentType, RuleId};
