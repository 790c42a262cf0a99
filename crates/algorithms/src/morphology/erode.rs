//! Binary erosion
//!
//! A pixel stays set only where the whole structuring element, placed at
//! that pixel, covers set pixels. Shrinks foreground regions and removes
//! features thinner than the element.

use crate::maybe_rayon::*;
use rowguard_core::{Raster, Result};

use super::element::{shifted, StructuringElement};
use super::MASK_ON;

/// Perform binary erosion on a mask
///
/// Element cells that fall outside the raster are ignored, so regions
/// touching the border are not eroded from that side.
///
/// # Arguments
/// * `mask` - Binary mask (non-zero = foreground)
/// * `element` - Structuring element defining the neighborhood shape
pub fn erode(mask: &Raster<u8>, element: &StructuringElement) -> Result<Raster<u8>> {
    element.validate()?;

    let (rows, cols) = mask.shape();
    let offsets = element.offsets();
    let data = mask.data();

    let output: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0u8; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let covered = offsets.iter().all(|&offset| {
                    match shifted(row, col, offset, rows, cols) {
                        Some(pos) => data[pos] != 0,
                        None => true,
                    }
                });
                if covered {
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
    fn test_erode_shrinks_square() {
        let mut mask: Raster<u8> = Raster::new(9, 9);
        mask.fill_rect(2, 2, 5, 5, MASK_ON);

        let result = erode(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result.count_set(), 9);
        assert_eq!(result.get(3, 3).unwrap(), MASK_ON);
        assert_eq!(result.get(2, 2).unwrap(), 0);
    }

    #[test]
    fn test_erode_removes_single_pixel() {
        let mut mask: Raster<u8> = Raster::new(5, 5);
        mask.set(2, 2, MASK_ON).unwrap();
        let result = erode(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result.count_set(), 0);
    }

    #[test]
    fn test_erode_ignores_outside_cells() {
        let mask = Raster::filled(4, 4, MASK_ON);
        let result = erode(&mask, &StructuringElement::square(3)).unwrap();
        assert_eq!(result.count_set(), 16);
    }

    #[test]
    fn test_erode_rejects_zero_side() {
        let mask: Raster<u8> = Raster::new(3, 3);
        assert!(erode(&mask, &StructuringElement::square(0)).is_err());
    }
}
