//! Base types describing classified content.

use std::fmt;

use pmd_dse::DseKind;

/// What a piece of data was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// A SIR0 container holding anything but a PX container
    Sir0,
    /// A PKDPX container
    Pkdpx,
    /// An AT4PX container
    At4px,
    /// A PKDPX container wrapped in SIR0
    Sir0Pkdpx,
    /// An AT4PX container wrapped in SIR0
    Sir0At4px,
    /// A DSE audio file
    Dse(DseKind),
    /// A format recognised by a caller-defined signature
    Other(&'static str),
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Sir0 => f.write_str("SIR0"),
            ContentType::Pkdpx => f.write_str("PKDPX"),
            ContentType::At4px => f.write_str("AT4PX"),
            ContentType::Sir0Pkdpx => f.write_str("SIR0 wrapped PKDPX"),
            ContentType::Sir0At4px => f.write_str("SIR0 wrapped AT4PX"),
            ContentType::Dse(kind) => write!(f, "{kind}"),
            ContentType::Other(name) => f.write_str(name),
        }
    }
}

/// Identifies a rule inside the classifier it was registered with
///
/// Ids are handed out in registration order, starting from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub(crate) usize);

impl RuleId {
    /// Position of the rule in registration order
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A recognised region of data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBlock {
    /// Offset of the first byte of the content
    pub start: usize,

    /// Offset one past the last byte of the content
    pub end: usize,

    /// The rule that recognised the content, `None` when a rule was run on its own
    pub matched_rule: Option<RuleId>,

    /// What the content is
    pub content_type: ContentType,
}

impl ContentBlock {
    /// Number of bytes of the content
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the content is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
