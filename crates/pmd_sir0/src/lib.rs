//! This library handles reading from and creating **SIR0** containers used by *Pokémon Mystery Dungeon*.
//!
//! # SIR0 Container Format Documentation
//!
//! SIR0 is the relocatable container the game wraps most of its data structures in. The payload
//! stores pointers to other parts of itself as absolute file offsets, and the container lists where
//! all of those pointers are so the loader can rebase them once the file is in memory.
//!
//! ## File Structure
//!
//! A SIR0 file consists of a header, the payload, the pointer list and padding.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: 0x53495230 ("SIR0")                               |
//! | 0x0004         | Payload Offset         | 4 bytes: Absolute offset where the payload starts          |
//! | 0x0008         | Pointer List Offset    | 4 bytes: Absolute offset of the pointer list               |
//! | 0x000C         | Subheader Offset       | 4 bytes: Absolute offset of the payload's subheader, or 0  |
//!
//! ### Payload
//!
//! The payload runs from the payload offset up to the pointer list. Every pointer inside it is a
//! little-endian `u32` holding an absolute file offset. The gap between the header and the payload
//! is filled with `0xAA`.
//!
//! ### Pointer List
//!
//! The pointer list stores the absolute offset of every pointer in the file, in ascending order,
//! as the difference to the previous one. Each difference is encoded in 7-bit groups, most
//! significant group first, with the high bit set on all bytes but the last. A single `0x00`
//! terminates the list. The list always starts with the header's own pointer fields at `0x04`
//! and `0x08`, followed by `0x0C` if the subheader field is in use.
//!
//! The file is padded with `0xAA` after the list.
//!
//! ## Usage
//!
//! ```
//! # fn doit() -> pmd_sir0::error::Result<()>
//! # {
//! use pmd_sir0::{wrap, Sir0, Sir0Options};
//!
//! let payload = vec![0x00; 16];
//! let container = wrap(payload.clone(), [4], None, Sir0Options::default())?;
//!
//! let sir0 = Sir0::read(&container)?;
//! assert_eq!(sir0.pointer_list, vec![4]);
//! assert_eq!(sir0.payload, payload);
//! # Ok(())
//! # }
//! # doit().unwrap();
//! ```

pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use error::{Error, Result};
pub use read::{unwrap, Sir0};
pub use types::{is_sir0, Sir0Header, Sir0Options, HEADER_LEN, MAGIC, PADDING_BYTE};
pub use write::{wrap, Sir0Writer};
