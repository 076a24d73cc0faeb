//! Integer arithmetic helpers for fraction-free elimination.

use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Greatest common divisor by the Euclidean algorithm.
///
/// Works for any signed integer type (`i64`, `BigInt`, ...). The result is
/// never negative and `gcd(x, 0) == |x|`.
///
/// ```
/// use gram_engine::arith::gcd;
///
/// assert_eq!(gcd(&12i64, &-18), 6);
/// assert_eq!(gcd(&-7i64, &0), 7);
/// ```
pub fn gcd<T>(x: &T, y: &T) -> T
where
    T: Integer + Signed + Clone,
{
    let mut a = x.abs();
    let mut b = y.abs();
    while !b.is_zero() {
        let r = a.mod_floor(&b);
        a = b;
        b = r;
    }
    a
}

/// GCD of every entry in `values`, starting from `init`.
///
/// Returns zero only if `init` and every value are zero.
pub fn gcd_all<'a, T>(init: T, values: impl IntoIterator<Item = &'a T>) -> T
where
    T: Integer + Signed + Clone + 'a,
{
    let mut acc = init.abs();
    for v in values {
        if acc.is_one() {
            break;
        }
        acc = gcd(&acc, v);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_gcd_basic() {
        assert_eq!(gcd(&48i64, &18), 6);
        assert_eq!(gcd(&18i64, &48), 6);
        assert_eq!(gcd(&17i64, &5), 1);
    }

    #[test]
    fn test_gcd_signs() {
        assert_eq!(gcd(&-48i64, &18), 6);
        assert_eq!(gcd(&48i64, &-18), 6);
        assert_eq!(gcd(&-48i64, &-18), 6);
    }

    #[test]
    fn test_gcd_zero() {
        assert_eq!(gcd(&-9i64, &0), 9);
        assert_eq!(gcd(&0i64, &9), 9);
        assert_eq!(gcd(&0i64, &0), 0);
    }

    #[test]
    fn test_gcd_bigint() {
        let a: BigInt = "123456789012345678901234567890".parse().unwrap();
        let b = &a * BigInt::from(7) * BigInt::from(-3);
        assert_eq!(gcd(&a, &b), a);
    }

    #[test]
    fn test_gcd_all() {
        let row = [12i64, -18, 30];
        assert_eq!(gcd_all(0, row.iter()), 6);
        assert_eq!(gcd_all(4, row.iter()), 2);
        assert_eq!(gcd_all(0, [0i64, 0].iter()), 0);
    }
}
