/// Scalar-or-series operand for the broadcasting operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Scalar(f64),
    Series(Vec<f64>),
}

impl Numeric {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Numeric::Scalar(v) => Some(*v),
            Numeric::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Numeric::Scalar(_) => None,
            Numeric::Series(v) => Some(v),
        }
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Numeric::Scalar(v)
    }
}

impl From<Vec<f64>> for Numeric {
    fn from(v: Vec<f64>) -> Self {
        Numeric::Series(v)
    }
}

impl From<&[f64]> for Numeric {
    fn from(v: &[f64]) -> Self {
        Numeric::Series(v.to_vec())
    }
}

/// Broadcasting combinator.
///
/// - scalar ∘ scalar → scalar
/// - scalar ∘ series (either side) → the scalar is broadcast
/// - series ∘ series → elementwise, truncated to the shorter input
fn zip_with(a: &Numeric, b: &Numeric, op: impl Fn(f64, f64) -> f64) -> Numeric {
    match (a, b) {
        (Numeric::Scalar(x), Numeric::Scalar(y)) => Numeric::Scalar(op(*x, *y)),
        (Numeric::Scalar(x), Numeric::Series(v)) => {
            Numeric::Series(v.iter().map(|&e| op(*x, e)).collect())
        }
        (Numeric::Series(v), Numeric::Scalar(y)) => {
            Numeric::Series(v.iter().map(|&e| op(e, *y)).collect())
        }
        (Numeric::Series(u), Numeric::Series(v)) => {
            Numeric::Series(u.iter().zip(v.iter()).map(|(&x, &y)| op(x, y)).collect())
        }
    }
}

pub fn add(a: &Numeric, b: &Numeric) -> Numeric {
    zip_with(a, b, |x, y| x + y)
}

pub fn subtract(a: &Numeric, b: &Numeric) -> Numeric {
    zip_with(a, b, |x, y| x - y)
}

pub fn multiply(a: &Numeric, b: &Numeric) -> Numeric {
    zip_with(a, b, |x, y| x * y)
}

pub fn div(a: &Numeric, b: &Numeric) -> Numeric {
    zip_with(a, b, |x, y| x / y)
}

/// Broadcasting remainder.
///
/// With `mathematical == false` this is the native remainder (negative for
/// negative dividends); with `mathematical == true` it is the non-negative
/// mathematical modulo, `((x % m) + m) % m`.
pub fn modulo(a: &Numeric, b: &Numeric, mathematical: bool) -> Numeric {
    if mathematical {
        zip_with(a, b, |x, m| ((x % m) + m) % m)
    } else {
        zip_with(a, b, |x, m| x % m)
    }
}

/// Elementwise absolute value.
pub fn abs(a: &Numeric) -> Numeric {
    match a {
        Numeric::Scalar(v) => Numeric::Scalar(v.abs()),
        Numeric::Series(v) => Numeric::Series(v.iter().map(|e| e.abs()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Numeric, abs, add, div, modulo, multiply, subtract};

    fn series(n: &Numeric) -> &[f64] {
        n.as_series().expect("series result")
    }

    #[test]
    fn scalar_with_scalar_stays_scalar() {
        let r = add(&1.5.into(), &2.0.into());
        assert_eq!(r, Numeric::Scalar(3.5));
    }

    #[test]
    fn scalar_broadcasts_over_series_on_either_side() {
        let r = add(&2.0.into(), &vec![1.0, 10.0].into());
        assert_eq!(series(&r), &[3.0, 12.0]);

        let r = subtract(&vec![1.0, 10.0].into(), &2.0.into());
        assert_eq!(series(&r), &[-1.0, 8.0]);
    }

    #[test]
    fn series_pairs_truncate_to_shorter_input() {
        let r = multiply(&vec![1.0, 2.0, 3.0].into(), &vec![10.0, 20.0].into());
        assert_eq!(series(&r), &[10.0, 40.0]);
    }

    #[test]
    fn div_broadcasts() {
        let r = div(&vec![2.0, 4.0].into(), &2.0.into());
        assert_eq!(series(&r), &[1.0, 2.0]);
    }

    #[test]
    fn native_remainder_keeps_dividend_sign() {
        let r = modulo(&(-7.0).into(), &3.0.into(), false);
        assert_eq!(r, Numeric::Scalar(-1.0));
    }

    #[test]
    fn mathematical_modulo_is_non_negative_for_positive_divisors() {
        let r = modulo(&vec![-7.0, -1.0, 8.0].into(), &3.0.into(), true);
        assert_eq!(series(&r), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn abs_is_elementwise() {
        assert_eq!(abs(&(-2.5).into()), Numeric::Scalar(2.5));
        let r = abs(&vec![-1.0, 2.0, -0.5].into());
        assert_eq!(series(&r), &[1.0, 2.0, 0.5]);
    }
}
