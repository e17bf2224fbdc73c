//! Exactness-aware cache keys.
//!
//! A key is a structural fingerprint of a call's arguments. Every part carries its
//! representation class, and decimals carry their exact `(mantissa, scale)`, so values
//! that compare equal numerically still produce distinct keys when their type or
//! precision differs:
//!
//! - `2_i64`, `2.0_f64`, `dec!(2)` and `"2"` are four different keys
//! - `dec!(2.00)` and `dec!(2.0000)` are two different keys
//!
//! Hashing only selects a bucket; lookups always confirm with full `Eq`.

use fxspace_shared::Numeric;
use rust_decimal::Decimal;

/// One component of a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    /// `()` and other zero-information arguments.
    Unit,
    /// Boolean.
    Bool(bool),
    /// Any integer type.
    Int(i128),
    /// Binary float, by bit pattern.
    Float(u64),
    /// Exact decimal with its stored scale.
    Decimal {
        /// Signed mantissa.
        mantissa: i128,
        /// Number of fractional digits.
        scale: u32,
    },
    /// Text.
    Text(String),
    /// Absent optional argument.
    Absent,
    /// Ordered sequence (slices, vectors, tuples).
    Seq(Vec<KeyPart>),
    /// Domain value identified by its type name.
    Tagged(&'static str, Vec<KeyPart>),
}

impl KeyPart {
    /// Builds the part for an exact decimal.
    #[must_use]
    pub fn decimal(value: Decimal) -> Self {
        Self::Decimal {
            mantissa: value.mantissa(),
            scale: value.scale(),
        }
    }
}

/// Cache key for one call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(KeyPart);

impl CacheKey {
    /// Derives the key for a call's arguments.
    pub fn new<A: CacheKeyed + ?Sized>(args: &A) -> Self {
        Self(args.key_part())
    }

    /// Returns the root part.
    #[must_use]
    pub const fn part(&self) -> &KeyPart {
        &self.0
    }
}

/// Types that can take part in a cache key.
pub trait CacheKeyed {
    /// Returns the structural fingerprint of `self`.
    fn key_part(&self) -> KeyPart;
}

impl<T: CacheKeyed + ?Sized> CacheKeyed for &T {
    fn key_part(&self) -> KeyPart {
        (**self).key_part()
    }
}

impl CacheKeyed for () {
    fn key_part(&self) -> KeyPart {
        KeyPart::Unit
    }
}

impl CacheKeyed for bool {
    fn key_part(&self) -> KeyPart {
        KeyPart::Bool(*self)
    }
}

macro_rules! keyed_int {
    ($($ty:ty),*) => {
        $(
            impl CacheKeyed for $ty {
                fn key_part(&self) -> KeyPart {
                    KeyPart::Int(i128::from(*self))
                }
            }
        )*
    };
}

keyed_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl CacheKeyed for usize {
    fn key_part(&self) -> KeyPart {
        KeyPart::Int(i128::try_from(*self).unwrap_or(i128::MAX))
    }
}

impl CacheKeyed for isize {
    fn key_part(&self) -> KeyPart {
        KeyPart::Int(i128::try_from(*self).unwrap_or(i128::MAX))
    }
}

impl CacheKeyed for f32 {
    fn key_part(&self) -> KeyPart {
        KeyPart::Float(f64::from(*self).to_bits())
    }
}

impl CacheKeyed for f64 {
    fn key_part(&self) -> KeyPart {
        KeyPart::Float(self.to_bits())
    }
}

impl CacheKeyed for Decimal {
    fn key_part(&self) -> KeyPart {
        KeyPart::decimal(*self)
    }
}

impl CacheKeyed for str {
    fn key_part(&self) -> KeyPart {
        KeyPart::Text(self.to_string())
    }
}

impl CacheKeyed for String {
    fn key_part(&self) -> KeyPart {
        KeyPart::Text(self.clone())
    }
}

impl CacheKeyed for Numeric {
    fn key_part(&self) -> KeyPart {
        match self {
            Self::Int(value) => value.key_part(),
            Self::Float(value) => value.key_part(),
            Self::Decimal(value) => value.key_part(),
            Self::Text(value) => value.key_part(),
        }
    }
}

impl<T: CacheKeyed> CacheKeyed for Option<T> {
    fn key_part(&self) -> KeyPart {
        self.as_ref().map_or(KeyPart::Absent, CacheKeyed::key_part)
    }
}

impl<T: CacheKeyed> CacheKeyed for [T] {
    fn key_part(&self) -> KeyPart {
        KeyPart::Seq(self.iter().map(CacheKeyed::key_part).collect())
    }
}

impl<T: CacheKeyed> CacheKeyed for Vec<T> {
    fn key_part(&self) -> KeyPart {
        self.as_slice().key_part()
    }
}

macro_rules! keyed_tuple {
    ($($name:ident),+) => {
        impl<$($name: CacheKeyed),+> CacheKeyed for ($($name,)+) {
            #[allow(non_snake_case)]
            fn key_part(&self) -> KeyPart {
                let ($($name,)+) = self;
                KeyPart::Seq(vec![$($name.key_part()),+])
            }
        }
    };
}

keyed_tuple!(A);
keyed_tuple!(A, B);
keyed_tuple!(A, B, C);
keyed_tuple!(A, B, C, D);
keyed_tuple!(A, B, C, D, E);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_representation_classes_are_distinct() {
        let keys = [
            CacheKey::new(&2_i64),
            CacheKey::new(&2.0_f64),
            CacheKey::new(&dec!(2)),
            CacheKey::new("2"),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_decimal_precision_is_distinct() {
        assert_eq!(dec!(2.00), dec!(2.0000));
        assert_ne!(CacheKey::new(&dec!(2.00)), CacheKey::new(&dec!(2.0000)));
        assert_eq!(CacheKey::new(&dec!(2.00)), CacheKey::new(&dec!(2.00)));
    }

    #[test]
    fn test_integer_widths_share_a_class() {
        assert_eq!(CacheKey::new(&2_i32), CacheKey::new(&2_u64));
    }

    #[test]
    fn test_numeric_matches_its_representation() {
        assert_eq!(
            CacheKey::new(&Numeric::from(dec!(1.5))),
            CacheKey::new(&dec!(1.5))
        );
        assert_ne!(
            CacheKey::new(&Numeric::from(2)),
            CacheKey::new(&Numeric::from(dec!(2)))
        );
    }

    #[test]
    fn test_argument_order_matters() {
        assert_ne!(CacheKey::new(&(1, 2)), CacheKey::new(&(2, 1)));
    }

    #[test]
    fn test_option_and_sequences() {
        assert_ne!(CacheKey::new(&Some(0_u8)), CacheKey::new(&None::<u8>));
        assert_eq!(
            CacheKey::new(&vec![1_i64, 2]),
            CacheKey::new(&[1_i64, 2][..])
        );
    }
}
