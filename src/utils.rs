/// Returns `n` evenly spaced values over the closed interval [`start`, `end`].
///
/// The last value is exactly `end` so that a full turn closes on itself.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Sign of `x` as -1, 0 or 1.
///
/// Unlike [`f64::signum`], zero maps to zero.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::TAU;

    #[test]
    fn linspace_closes_full_turn() {
        let values = linspace(0.0, TAU, 61);
        assert_eq!(values.len(), 61);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[60], TAU);
        assert_relative_eq!(values[15], TAU / 4.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(10, 10)]
    fn linspace_len(#[case] n: usize, #[case] len: usize) {
        assert_eq!(linspace(-1.0, 1.0, n).len(), len);
    }

    #[rstest]
    #[case(2.5, 1.0)]
    #[case(-0.1, -1.0)]
    #[case(0.0, 0.0)]
    fn sign_of(#[case] x: f64, #[case] expected: f64) {
        assert_eq!(sign(x), expected);
    }
}
