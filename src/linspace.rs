/// `n` evenly spaced samples over `[min, max]`, both ends included
pub(crate) struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub(crate) fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 { (max - min) / (n - 1) as f64 } else { 0. };

        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }

    /// Samples `min + i * step` for `i in 0..n`, the way numpy.arange lays out its points
    pub(crate) fn with_step(min: f64, step: f64, n: usize) -> Self {
        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let points: Vec<_> = Linspace::new(0., 40000., 3).collect();
    assert_eq!(points, vec![0., 20000., 40000.]);

    let single: Vec<_> = Linspace::new(5., 10., 1).collect();
    assert_eq!(single, vec![5.]);

    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}

#[test]
fn test_linspace_with_step() {
    let points: Vec<_> = Linspace::with_step(-10., 1., 26).collect();
    assert_eq!(points.len(), 26);
    assert_eq!(points[0], -10.);
    assert_eq!(points[25], 15.);
}
