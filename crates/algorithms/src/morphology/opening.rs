//! Morphological opening (erosion followed by dilation)
//!
//! Removes specks and thin spurs narrower than the structuring element.

use rowguard_core::{Algorithm, Error, Raster, Result};

use super::dilate::dilate;
use super::element::StructuringElement;
use super::erode::erode;

/// Parameters for morphological opening
#[derive(Debug, Clone, Default)]
pub struct OpeningParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Opening algorithm
#[derive(Debug, Clone, Default)]
pub struct Opening;

impl Algorithm for Opening {
    type Input = Raster<u8>;
    type Output = Raster<u8>;
    type Params = OpeningParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Opening"
    }

    fn description(&self) -> &'static str {
        "Binary opening (erosion then dilation) to remove small specks"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        opening(&input, &params.element)
    }
}

/// Perform binary opening on a mask
///
/// # Arguments
/// * `mask` - Binary mask (non-zero = foreground)
/// * `element` - Structuring element defining the neighborhood shape
pub fn opening(mask: &Raster<u8>, element: &StructuringElement) -> Result<Raster<u8>> {
    let eroded = erode(mask, element)?;
    dilate(&eroded, element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::MASK_ON;

    #[test]
    fn test_opening_removes_speck() {
        let mut mask: Raster<u8> = Raster::new(20, 20);
        mask.fill_rect(4, 4, 6, 6, MASK_ON);
        mask.set(16, 16, MASK_ON).unwrap();

        let result = opening(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result.get(16, 16).unwrap(), 0);
        assert_eq!(result.count_set(), 36);
    }

    #[test]
    fn test_opening_removes_thin_line() {
        let mut mask: Raster<u8> = Raster::new(10, 10);
        mask.fill_rect(0, 5, 10, 1, MASK_ON);
        let result = opening(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result.count_set(), 0);
    }

    #[test]
    fn test_side_one_is_identity() {
        let mut mask: Raster<u8> = Raster::new(6, 6);
        mask.set(1, 4, MASK_ON).unwrap();
        mask.set(5, 0, MASK_ON).unwrap();
        let element = StructuringElement::square(1);
        assert_eq!(opening(&mask, &element).unwrap(), mask);
        assert_eq!(crate::morphology::closing(&mask, &element).unwrap(), mask);
    }

    #[test]
    fn test_opening_algorithm_trait() {
        let mask: Raster<u8> = Raster::filled(5, 5, MASK_ON);
        let params = OpeningParams {
            element: StructuringElement::square(0),
        };
        assert!(Opening.execute(mask, params).is_err());
    }
}
