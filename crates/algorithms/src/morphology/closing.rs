//! Morphological closing (dilation followed by erosion)
//!
//! Bridges small gaps and fills pinholes in the change mask while keeping
//! the outline of larger regions.

use rowguard_core::{Algorithm, Error, Raster, Result};

use super::dilate::dilate;
use super::element::StructuringElement;
use super::erode::erode;

/// Parameters for morphological closing
#[derive(Debug, Clone, Default)]
pub struct ClosingParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Closing algorithm
#[derive(Debug, Clone, Default)]
pub struct Closing;

impl Algorithm for Closing {
    type Input = Raster<u8>;
    type Output = Raster<u8>;
    type Params = ClosingParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Closing"
    }

    fn description(&self) -> &'static str {
        "Binary closing (dilation then erosion) to fill small gaps"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        closing(&input, &params.element)
    }
}

/// Perform binary closing on a mask
///
/// # Arguments
/// * `mask` - Binary mask (non-zero = foreground)
/// * `element` - Structuring element defining the neighborhood shape
pub fn closing(mask: &Raster<u8>, element: &StructuringElement) -> Result<Raster<u8>> {
    let dilated = dilate(mask, element)?;
    erode(&dilated, element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::MASK_ON;

    #[test]
    fn test_closing_bridges_gap() {
        let mut mask: Raster<u8> = Raster::new(9, 14);
        mask.fill_rect(2, 2, 5, 5, MASK_ON);
        mask.fill_rect(8, 2, 4, 5, MASK_ON);
        // single-column gap at x = 7

        let result = closing(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result.get(4, 7).unwrap(), MASK_ON);
        assert_eq!(result.count_set(), 50);
    }

    #[test]
    fn test_closing_preserves_rectangle() {
        let mut mask: Raster<u8> = Raster::new(20, 20);
        mask.fill_rect(5, 5, 8, 6, MASK_ON);
        let result = closing(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result, mask);
    }

    #[test]
    fn test_closing_algorithm_trait() {
        let mut mask: Raster<u8> = Raster::new(7, 7);
        mask.fill_rect(1, 1, 5, 5, MASK_ON);
        mask.set(3, 3, 0).unwrap();

        let algo = Closing;
        assert_eq!(algo.name(), "Closing");
        let result = algo.execute_default(mask).unwrap();
        assert_eq!(result.get(3, 3).unwrap(), MASK_ON);
    }
}
