//! Binary dilation
//!
//! A pixel becomes set where the reflected structuring element, placed at
//! that pixel, hits any set pixel. Grows foreground regions and bridges
//! gaps narrower than the element.

use crate::maybe_rayon::*;
use rowguard_core::{Raster, Result};

use super::element::{shifted, StructuringElement};
use super::MASK_ON;

/// Perform binary dilation on a mask
///
/// The element is reflected through its anchor, making dilation the exact
/// dual of [`erode`](super::erode) for even sides too. Element cells
/// outside the raster contribute nothing.
///
/// # Arguments
/// * `mask` - Binary mask (non-zero = foreground)
/// * `element` - Structuring element defining the neighborhood shape
pub fn dilate(mask: &Raster<u8>, element: &StructuringElement) -> Result<Raster<u8>> {
    element.validate()?;

    let (rows, cols) = mask.shape();
    let reflected: Vec<(isize, isize)> = element
        .offsets()
        .into_iter()
        .map(|(dr, dc)| (-dr, -dc))
        .collect();
    let data = mask.data();

    let output: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0u8; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let hit = reflected.iter().any(|&offset| {
                    shifted(row, col, offset, rows, cols).is_some_and(|pos| data[pos] != 0)
                });
                if hit {
                    *out = MASK_ON;
                }
            }
            row_data
        })
        .collect();

    Raster::from_vec(output, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilate_grows_pixel() {
        let mut mask: Raster<u8> = Raster::new(7, 7);
        mask.set(3, 3, MASK_ON).unwrap();

        let result = dilate(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result.count_set(), 9);
        assert_eq!(result.get(2, 4).unwrap(), MASK_ON);
        assert_eq!(result.get(1, 3).unwrap(), 0);
    }

    #[test]
    fn test_dilate_clips_at_border() {
        let mut mask: Raster<u8> = Raster::new(5, 5);
        mask.set(0, 0, MASK_ON).unwrap();
        let result = dilate(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result.count_set(), 4);
    }

    #[test]
    fn test_dilate_even_side_is_reflected() {
        let mut mask: Raster<u8> = Raster::new(6, 6);
        mask.set(2, 2, MASK_ON).unwrap();
        let result = dilate(&mask, &StructuringElement::square(2)).unwrap();
        // anchor at 1: the element spans offsets -1..=0
        assert_eq!(result.count_set(), 4);
        assert_eq!(result.get(1, 1).unwrap(), MASK_ON);
        assert_eq!(result.get(3, 3).unwrap(), 0);
    }

    #[test]
    fn test_dilate_empty_mask() {
        let mask: Raster<u8> = Raster::new(4, 4);
        let result = dilate(&mask, &StructuringElement::square(5)).unwrap();
        assert_eq!(result.count_set(), 0);
    }
}
