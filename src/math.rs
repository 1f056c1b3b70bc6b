use num::Float;

/// Similar to numpy.interp for a single abscissa: linear interpolation between
/// `coords`, clamped to the first/last ordinate outside their range.
///
/// `coords` must be non-empty and sorted by x.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let mut iter = coords.iter().copied().enumerate().peekable();

    while let Some((i, (x1, y1))) = iter.next() {
        // Base cases
        if i == 0 && x < x1 {
            return y1;
        }
        let Some(&(_, (x2, y2))) = iter.peek() else {
            return y1;
        };

        if x1 <= x && x <= x2 {
            if x2 == x1 {
                return y2;
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    F::zero()
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
    let out: Vec<f64> = [0., 1., 1.5, 2.72, 3.24].iter().map(|&x| interp(x, &coords)).collect();

    assert_eq!(out, vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
    let out: Vec<f64> = [2.5, -1., 7.5].iter().map(|&x| interp(x, &coords)).collect();

    assert_eq!(out, vec![4., 0., 2.]);
}

#[test]
fn test_interp_vertical_step() {
    let coords = [(0., 0.), (1., 0.), (1., 1.), (2., 1.)];

    assert_eq!(interp(0.5, &coords), 0.);
    assert_eq!(interp(1.5, &coords), 1.);
    assert_eq!(interp(1., &coords), 0.);
}
