use miette::Result;
use pmd_content::{Classifier, ContentType, Rule};
use pmd_dse::DseKind;
use pmd_px::{compress, compress_sir0, PxFormat, PxOptions};
use pmd_sir0::{wrap, Sir0Options};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use tracing::info;
use tracing_test::traced_test;

fn dse(magic: &[u8; 4], header_len: usize) -> Vec<u8> {
    let mut out = vec![0u8; header_len];
    out[..4].copy_from_slice(magic);

    let mut eoc = b"eoc ".to_vec();
    eoc.extend_from_slice(&[0x00; 12]);
    out.extend(eoc);

    let len = out.len() as u32;
    out[8..12].copy_from_slice(&len.to_le_bytes());
    out
}

fn samples() -> Result<Vec<(&'static str, Vec<u8>, ContentType)>> {
    let text = b"Wigglytuff's Guild is recruiting, Wigglytuff's Guild is recruiting".to_vec();

    Ok(vec![
        (
            "pkdpx",
            compress(&text, PxFormat::Pkdpx, PxOptions::default())?,
            ContentType::Pkdpx,
        ),
        (
            "at4px",
            compress(&text, PxFormat::At4px, PxOptions::default())?,
            ContentType::At4px,
        ),
        (
            "sir0 pkdpx",
            compress_sir0(
                &text,
                PxFormat::Pkdpx,
                PxOptions::default(),
                Sir0Options::default(),
            )?,
            ContentType::Sir0Pkdpx,
        ),
        (
            "sir0 at4px",
            compress_sir0(
                &text,
                PxFormat::At4px,
                PxOptions::default(),
                Sir0Options::default(),
            )?,
            ContentType::Sir0At4px,
        ),
        (
            "sir0",
            wrap(text.clone(), [], None, Sir0Options::default())?,
            ContentType::Sir0,
        ),
        ("swdl", dse(b"swdl", 0x50), ContentType::Dse(DseKind::Swdl)),
        ("smdl", dse(b"smdl", 0x40), ContentType::Dse(DseKind::Smdl)),
        ("sedl", dse(b"sedl", 0x40), ContentType::Dse(DseKind::Sedl)),
    ])
}

#[traced_test]
#[test]
fn default_rules() -> Result<()> {
    let classifier = Classifier::with_default_rules();

    for (name, data, expected) in samples()? {
        let block = classifier.classify(&data, None)?;
        info!(name, %block.content_type, "classified");
        assert_eq!(block.content_type, expected, "{name}");
        assert!(block.end <= data.len(), "{name}");
        assert!(block.matched_rule.is_some(), "{name}");
    }

    Ok(())
}

#[traced_test]
#[test]
fn sir0_registered_first_hides_wrapped_px() -> Result<()> {
    let mut classifier = Classifier::new();
    classifier.register(Rule::Sir0);
    classifier.register(Rule::Pkdpx);

    let data = compress_sir0(
        b"hidden hidden hidden",
        PxFormat::Pkdpx,
        PxOptions::default(),
        Sir0Options::default(),
    )?;

    let block = classifier.classify(&data, None)?;
    assert_eq!(block.content_type, ContentType::Sir0);

    Ok(())
}

#[test]
fn shared_between_threads() -> Result<()> {
    let classifier = Arc::new(Classifier::with_default_rules());
    let samples = Arc::new(samples()?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let classifier = Arc::clone(&classifier);
            let samples = Arc::clone(&samples);
            thread::spawn(move || {
                samples
                    .iter()
                    .map(|(_, data, _)| classifier.classify(data, None).map(|b| b.content_type))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().expect("classifier thread panicked");
        for (result, (name, _, expected)) in results.into_iter().zip(samples.iter()) {
            assert_eq!(result?, *expected, "{name}");
        }
    }

    Ok(())
}
