//! Benchmarks grayscale conversion across worker counts.
use brunch::Bench;

use graysplit_canvas::{Executor, Luma, Split};
use graysplit_texel::{Bgr, LayoutError, PixelBuffer};

struct Grayscale {
    workers: usize,
    split: Split,
    sz: usize,
}

impl Grayscale {
    fn name(&self) -> String {
        format!(
            "grayscale({} workers, {:?}, {})",
            self.workers, self.split, self.sz
        )
    }

    fn prepare(self) -> Result<impl FnMut(), LayoutError> {
        let source = PixelBuffer::from_fn(self.sz, self.sz, |x, y| {
            Bgr::new(x as u8, y as u8, 0x80)
        })?;
        let executor = Executor::new(self.workers).with_split(self.split);
        let mut image = source.clone();

        Ok(move || {
            image.as_mut_slice().copy_from_slice(source.as_slice());
            executor.grayscale(&mut image, Luma::default()).unwrap()
        })
    }
}

fn main() {
    let tests = [1, 2, 4, 8, 16].map(|workers| Grayscale {
        workers,
        split: Split::Pixels,
        sz: 1024,
    });

    let rows = [2, 8].map(|workers| Grayscale {
        workers,
        split: Split::Rows,
        sz: 1024,
    });

    let mut benches = brunch::Benches::default();
    benches.extend(tests.into_iter().chain(rows).map(|grayscale| {
        Bench::new(format!("canvas::workers::main::{}", grayscale.name()))
            .run(grayscale.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}
