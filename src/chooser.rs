use rand::seq::SliceRandom;
use rand::Rng;

/// Source of every random decision the engine makes.
///
/// Production code wraps an `rand` generator in [`RngChooser`]; tests can
/// script exact picks instead.
pub trait Chooser {
    /// Uniform index in `0..len`. `len` is never 0.
    fn index(&mut self, len: usize) -> usize;

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        Some(&items[self.index(items.len())])
    }
}

#[derive(Debug)]
pub struct RngChooser<R>(pub R);

impl<R: Rng> Chooser for RngChooser<R> {
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0);
        self.0.gen_range(0..len)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }
}
