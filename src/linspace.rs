use std::iter::FusedIterator;

/// `count` evenly spaced points over `[min, max]`, endpoints included.
pub(crate) struct Linspace {
    min: f64,
    step: f64,
    next: usize,
    count: usize,
}

impl Linspace {
    pub(crate) fn new(min: f64, max: f64, count: usize) -> Self {
        let step = match count {
            0 | 1 => 0.,
            _ => (max - min) / (count - 1) as f64,
        };

        Self {
            min,
            step,
            next: 0,
            count,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        let i = self.next;

        if i >= self.count {
            return None;
        }

        self.next += 1;

        // min + step * i rather than accumulating, as numpy.linspace does
        Some(self.min + self.step * i as f64)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;

        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Linspace {}

impl FusedIterator for Linspace {}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 1., 5).collect();

    assert_eq!(points, vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(2., 3., 1).collect::<Vec<_>>(), vec![2.]);
    assert_eq!(Linspace::new(2., 3., 0).len(), 0);
}
