//! Shared shape of the `u128` quantity newtypes.

/// Declares a `u128` newtype with zero/max constants, checked arithmetic,
/// 256-bit widening and narrowing, and `Display`.
///
/// `$overflow` is the context carried by [`AmmError::Overflow`] when a
/// 256-bit value does not narrow back.
///
/// [`AmmError::Overflow`]: crate::error::AmmError::Overflow
macro_rules! u128_quantity {
    ($(#[$meta:meta])* $name:ident, $overflow:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(u128);

        impl $name {
            /// Zero.
            pub const ZERO: Self = Self(0);

            /// Largest representable value.
            pub const MAX: Self = Self(u128::MAX);

            /// Wraps a raw value.
            #[must_use]
            pub const fn new(value: u128) -> Self {
                Self(value)
            }

            /// The raw value.
            #[must_use]
            pub const fn get(&self) -> u128 {
                self.0
            }

            /// `true` for zero.
            #[must_use]
            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }

            /// `None` on overflow.
            #[must_use]
            pub const fn checked_add(&self, other: &Self) -> Option<Self> {
                match self.0.checked_add(other.0) {
                    Some(v) => Some(Self(v)),
                    None => None,
                }
            }

            /// `None` on underflow.
            #[must_use]
            pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
                match self.0.checked_sub(other.0) {
                    Some(v) => Some(Self(v)),
                    None => None,
                }
            }

            /// Widens for curve math.
            #[must_use]
            pub fn to_u256(&self) -> primitive_types::U256 {
                primitive_types::U256::from(self.0)
            }

            /// Narrows a 256-bit result.
            ///
            /// # Errors
            ///
            /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow)
            /// if `value` does not fit in `u128`.
            pub fn try_from_u256(
                value: primitive_types::U256,
            ) -> Result<Self, crate::error::AmmError> {
                u128::try_from(value)
                    .map(Self)
                    .map_err(|_| crate::error::AmmError::Overflow($overflow))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use u128_quantity;
