use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input() -> Vec<u8> {
    // Sprite-like data: short runs of a few palette indices, with repeated rows
    let row: Vec<u8> = (0..64u32)
        .map(|i| ((i * 7 + i / 5) % 5) as u8 * 0x11)
        .collect();
    (0..512u32)
        .flat_map(|r| {
            let mut line = row.clone();
            line.rotate_left((r % 13) as usize);
            line
        })
        .collect()
}

pub mod compress {
    use divan::Bencher;
    use pmd_px::{compress, CompressionLevel, PxFormat, PxOptions};

    #[divan::bench(args = [CompressionLevel::Fast, CompressionLevel::Best])]
    fn pkdpx(bencher: Bencher, level: CompressionLevel) {
        let options = PxOptions::builder().level(level).build();
        bencher.with_inputs(super::get_input).bench_refs(|data| {
            divan::black_box(compress(data, PxFormat::Pkdpx, options).unwrap());
        });
    }
}

pub mod decompress {
    use divan::Bencher;
    use pmd_px::{compress, decompress, PxFormat, PxOptions};

    #[divan::bench]
    fn pkdpx(bencher: Bencher) {
        bencher
            .with_inputs(|| {
                compress(&super::get_input(), PxFormat::Pkdpx, PxOptions::default()).unwrap()
            })
            .bench_refs(|container| {
                divan::black_box(decompress(container).unwrap());
            });
    }
}
