//! Raster element trait for generic cell values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a raster cell.
///
/// Image intensities, absolute differences and binary masks are all `u8`.
pub trait RasterElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Convert self to f64, NaN when the value is not representable
    fn as_f64(self) -> f64 {
        NumCast::from(self).unwrap_or(f64::NAN)
    }

    /// Whether the cell counts as set in a binary mask
    fn is_set(self) -> bool {
        self != Self::zero()
    }
}

impl RasterElement for u8 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64() {
        assert_eq!(200u8.as_f64(), 200.0);
        assert_eq!(0u8.as_f64(), 0.0);
    }

    #[test]
    fn test_is_set() {
        assert!(255u8.is_set());
        assert!(!0u8.is_set());
        assert!(1u8.is_set());
    }
}
