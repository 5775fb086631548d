use num::Float;

/// Similar to numpy.interp for a single point: linear interpolation through
/// `coords` (sorted by x), holding the end values outside of them.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x <= x_first {
        return y_first;
    }
    if x >= x_last {
        return y_last;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x1 <= x && x <= x2 {
            // Vertical edge
            if x2 == x1 {
                return y2;
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    // Only NaN falls through
    F::zero()
}

#[test]
fn test_interp() {
    let xs = [(1., 3.), (2., 2.), (3., 0.)];

    let got: Vec<f64> = [0., 1., 1.5, 2.72, 3.24].iter().map(|x| interp(*x, &xs)).collect();
    assert_eq!(got, vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let xs = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    let got: Vec<f64> = [2.5, -1., 7.5].iter().map(|x| interp(*x, &xs)).collect();
    assert_eq!(got, vec![4., 0., 2.]);
}

#[test]
fn test_interp_edge_cases() {
    assert_eq!(interp(0.5f64, &[]), 0.);
    assert_eq!(interp(f64::NAN, &[(0., 0.), (1., 1.)]), 0.);
    // A step at x = 1 takes the upper value
    assert_eq!(interp(1f64, &[(0., 0.), (1., 0.), (1., 1.), (2., 1.)]), 0.);
    assert_eq!(interp(1.5f64, &[(0., 0.), (1., 0.), (1., 1.), (2., 1.)]), 1.);
}
