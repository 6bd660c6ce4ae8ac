//! The rule registry.

use tracing::{debug, instrument, trace};

use pmd_dse::DseKind;

use crate::error::{Error, Result};
use crate::rule::Rule;
use crate::types::{ContentBlock, RuleId};

/// An ordered set of recognition rules
///
/// Rules are tried in the order they were registered and the first one that recognises the
/// data wins. A classifier is only read while classifying, so one instance can be shared
/// between threads.
///
/// ```
/// # fn doit() -> pmd_content::Result<()>
/// # {
/// use pmd_content::{Classifier, ContentType, Rule};
///
/// let mut classifier = Classifier::with_default_rules();
/// let wte = classifier.register(Rule::magic(ContentType::Other("WTE"), *b"WTE", 0x10));
///
/// let mut data = vec![0x00; 0x20];
/// data[0x10..0x13].copy_from_slice(b"WTE");
///
/// let block = classifier.classify(&data, Some("wte"))?;
/// assert_eq!(block.matched_rule, Some(wte));
/// assert_eq!(block.content_type, ContentType::Other("WTE"));
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Create a classifier with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier knowing every format of this workspace.
    ///
    /// PX containers are registered before SIR0 so that wrapped containers are reported as
    /// such.
    pub fn with_default_rules() -> Self {
        let mut classifier = Self::new();
        for rule in [
            Rule::Pkdpx,
            Rule::At4px,
            Rule::Sir0,
            Rule::Dse(DseKind::Swdl),
            Rule::Dse(DseKind::Smdl),
            Rule::Dse(DseKind::Sedl),
        ] {
            classifier.register(rule);
        }
        classifier
    }

    /// Add a rule after every rule registered so far
    pub fn register(&mut self, rule: Rule) -> RuleId {
        let id = RuleId(self.rules.len());
        debug!(%id, ?rule, "registered rule");
        self.rules.push(rule);
        id
    }

    /// Look up a registered rule
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    /// Registered rules, in registration order
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules.iter().enumerate().map(|(i, rule)| (RuleId(i), rule))
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find what `data` is.
    ///
    /// A rule that probes positive but whose analysis finds a different format is skipped.
    /// Any other analysis failure is returned as is.
    #[instrument(skip(self, data), fields(len = data.len()), err)]
    pub fn classify(&self, data: &[u8], extension: Option<&str>) -> Result<ContentBlock> {
        for (id, rule) in self.rules() {
            if !rule.is_match(data, extension) {
                continue;
            }

            match rule.analyse(data) {
                Ok(block) => {
                    debug!(%id, content_type = %block.content_type, "classified");
                    return Ok(ContentBlock {
                        matched_rule: Some(id),
                        ..block
                    });
                }
                Err(error) if error.is_bad_magic() => {
                    trace!(%id, %error, "rule probed positive but did not match");
                }
                Err(error) => return Err(error),
            }
        }

        Err(Error::NoMatch {
            extension: extension.map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::classifier::Classifier;
    use crate::error::{Error, Result};
    use crate::rule::Rule;
    use crate::types::ContentType;

    fn is_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable() {
        is_send_sync::<Classifier>();
    }

    #[traced_test]
    #[test]
    fn first_registered_wins() -> Result<()> {
        let mut classifier = Classifier::new();
        let a = classifier.register(Rule::magic(ContentType::Other("A"), *b"MAGIC", 0));
        let b = classifier.register(Rule::magic(ContentType::Other("B"), *b"MAG", 0));
        assert_ne!(a, b);

        for _ in 0..10 {
            let block = classifier.classify(b"MAGIC and more", None)?;
            assert_eq!(block.matched_rule, Some(a));
            assert_eq!(block.content_type, ContentType::Other("A"));
        }

        let block = classifier.classify(b"MAGNET", None)?;
        assert_eq!(block.matched_rule, Some(b));

        Ok(())
    }

    #[traced_test]
    #[test]
    fn later_rules_are_tried() -> Result<()> {
        let mut classifier = Classifier::new();
        classifier.register(Rule::Pkdpx);
        let fallback = classifier.register(Rule::magic(ContentType::Other("sir0"), *b"SIR0", 0));

        // SIR0 wrapping something that is not PKDPX
        let data = pmd_sir0::wrap(
            b"PKDPY".to_vec(),
            [],
            None,
            pmd_sir0::Sir0Options::default(),
        )?;
        let block = classifier.classify(&data, None)?;
        assert_eq!(block.matched_rule, Some(fallback));

        Ok(())
    }

    #[test]
    fn other_errors_are_returned() {
        let classifier = Classifier::with_default_rules();

        // PKDPX header claiming more data than there is
        let mut data = b"PKDPX".to_vec();
        data.extend_from_slice(&[0xFF, 0x00]);
        data.extend_from_slice(&[0x00; 13]);

        let error = classifier.classify(&data, None).unwrap_err();
        assert!(!error.is_bad_magic());
        assert!(matches!(error, Error::Px(_)));
    }

    #[test]
    fn no_match() {
        let classifier = Classifier::with_default_rules();

        let error = classifier.classify(b"nothing to see", Some("bin")).unwrap_err();
        assert!(matches!(
            error,
            Error::NoMatch { extension: Some(ref e) } if e == "bin"
        ));
        assert!(Classifier::new().classify(b"", None).is_err());
    }

    #[test]
    fn registry_lookup() {
        let classifier = Classifier::with_default_rules();
        assert_eq!(classifier.len(), 6);

        let (id, rule) = classifier.rules().nth(2).unwrap();
        assert_eq!(id.index(), 2);
        assert_eq!(rule, &Rule::Sir0);
        assert_eq!(classifier.rule(id), Some(&Rule::Sir0));
    }
}
