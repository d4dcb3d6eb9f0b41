//! Big-number value types.
//!
//! Arbitrary-precision integers come straight from `num-bigint`. This module
//! adds the two composite shapes the reader produces on top of them: reduced
//! rational numbers and arbitrary-precision decimals.

use num_bigint::{BigInt, Sign};

/// A rational number in lowest terms with a positive denominator.
///
/// Construction goes through [`Ratio::reduce`], which normalizes the sign,
/// divides out the gcd, and collapses integral results.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ratio {
    numerator: BigInt,
    denominator: BigInt,
}

/// Outcome of reducing a numerator/denominator pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reduced {
    /// The denominator divided out completely.
    Int(BigInt),
    /// A proper ratio in lowest terms.
    Ratio(Ratio),
}

impl Ratio {
    /// Reduce `numerator / denominator` to lowest terms.
    ///
    /// The denominator must be nonzero; zero-denominator literals are
    /// rejected by the number parser before this point.
    ///
    /// # Examples
    ///
    /// ```
    /// use edn_util::num::{Ratio, Reduced};
    /// use num_bigint::BigInt;
    ///
    /// let r = Ratio::reduce(BigInt::from(6), BigInt::from(9));
    /// match r {
    ///     Reduced::Ratio(r) => {
    ///         assert_eq!(r.numerator(), &BigInt::from(2));
    ///         assert_eq!(r.denominator(), &BigInt::from(3));
    ///     }
    ///     Reduced::Int(_) => unreachable!(),
    /// }
    ///
    /// assert_eq!(
    ///     Ratio::reduce(BigInt::from(4), BigInt::from(2)),
    ///     Reduced::Int(BigInt::from(2))
    /// );
    /// ```
    pub fn reduce(numerator: BigInt, denominator: BigInt) -> Reduced {
        debug_assert!(denominator.sign() != Sign::NoSign);

        let (num, den) = if denominator.sign() == Sign::Minus {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };

        let g = gcd(num.clone(), den.clone());
        let num = num / &g;
        let den = den / &g;

        if den == BigInt::from(1) {
            Reduced::Int(num)
        } else {
            Reduced::Ratio(Ratio {
                numerator: num,
                denominator: den,
            })
        }
    }

    /// The numerator. Carries the sign of the ratio.
    #[inline]
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// The denominator. Always positive and greater than one.
    #[inline]
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }
}

fn gcd(mut a: BigInt, mut b: BigInt) -> BigInt {
    if a.sign() == Sign::Minus {
        a = -a;
    }
    while b.sign() != Sign::NoSign {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// An arbitrary-precision decimal: an unscaled integer and a base-10 scale.
///
/// The value is `unscaled * 10^(-scale)`. Produced by `M`-suffixed number
/// literals. Two decimals are equal only when both parts match, so `1.0M`
/// and `1.00M` are distinct values, mirroring scale-preserving decimal
/// arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigDecimal {
    unscaled: BigInt,
    scale: i64,
}

impl BigDecimal {
    /// Create a decimal from its parts.
    #[inline]
    pub fn new(unscaled: BigInt, scale: i64) -> Self {
        Self { unscaled, scale }
    }

    /// Parse decimal text of the shape `[+-]digits[.digits][(e|E)[+-]digits]`
    /// (the float grammar, minus any `M` suffix).
    ///
    /// # Examples
    ///
    /// ```
    /// use edn_util::num::BigDecimal;
    /// use num_bigint::BigInt;
    ///
    /// let d = BigDecimal::parse("12.345e-2").unwrap();
    /// assert_eq!(d.unscaled(), &BigInt::from(12345));
    /// assert_eq!(d.scale(), 5);
    /// ```
    pub fn parse(text: &str) -> Option<BigDecimal> {
        let (mantissa, exp) = match text.find(['e', 'E']) {
            Some(i) => (&text[..i], text[i + 1..].parse::<i64>().ok()?),
            None => (text, 0i64),
        };

        let (int_part, frac_part) = match mantissa.find('.') {
            Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
            None => (mantissa, ""),
        };

        let digits = format!("{}{}", int_part, frac_part);
        let unscaled: BigInt = digits.parse().ok()?;
        let scale = frac_part.len() as i64 - exp;

        Some(BigDecimal { unscaled, scale })
    }

    /// The unscaled integer part.
    #[inline]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// The base-10 scale; the value is `unscaled * 10^(-scale)`.
    #[inline]
    pub fn scale(&self) -> i64 {
        self.scale
    }
}
