//! Structuring element for binary mask morphology
//!
//! RowGuard cleans masks with a square element of side `k`. The anchor sits
//! at `k / 2`, so for an even side the element extends one cell further
//! towards the bottom-right than towards the top-left.

use rowguard_core::{Error, Result};

/// Square structuring element of a given side length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    side: usize,
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::square(3)
    }
}

impl StructuringElement {
    /// Square element covering `side x side` cells
    pub fn square(side: usize) -> Self {
        Self { side }
    }

    /// Side length in cells
    pub fn side(&self) -> usize {
        self.side
    }

    /// Validate the structuring element, returning an error for invalid configurations
    pub fn validate(&self) -> Result<()> {
        if self.side == 0 {
            return Err(Error::InvalidParameter {
                name: "morphology_kernel_size",
                value: "0".to_string(),
                reason: "structuring element side must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Compute (dr, dc) offsets relative to the anchor for all cells
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let side = self.side as isize;
        let before = side / 2;
        let range = -before..side - before;
        range
            .clone()
            .flat_map(|dr| range.clone().map(move |dc| (dr, dc)))
            .collect()
    }
}

/// Position of `(row + dr, col + dc)` if it falls inside a `rows x cols` grid
#[inline]
pub(super) fn shifted(
    row: usize,
    col: usize,
    (dr, dc): (isize, isize),
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    (r < rows && c < cols).then_some((r, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_offsets() {
        let offsets = StructuringElement::square(3).offsets();
        assert_eq!(offsets.len(), 9);
        assert!(offsets.contains(&(0, 0)));
        assert!(offsets.contains(&(-1, -1)));
        assert!(offsets.contains(&(1, 1)));
    }

    #[test]
    fn test_even_side_anchor() {
        let offsets = StructuringElement::square(4).offsets();
        assert_eq!(offsets.len(), 16);
        // anchor at 2: two cells before, one after
        assert!(offsets.contains(&(-2, -2)));
        assert!(offsets.contains(&(1, 1)));
        assert!(!offsets.contains(&(2, 2)));
    }

    #[test]
    fn test_side_one_is_anchor_only() {
        assert_eq!(StructuringElement::square(1).offsets(), vec![(0, 0)]);
    }

    #[test]
    fn test_validate_zero_side() {
        assert!(StructuringElement::square(0).validate().is_err());
        assert!(StructuringElement::square(1).validate().is_ok());
    }

    #[test]
    fn test_shifted_bounds() {
        assert_eq!(shifted(0, 0, (-1, 0), 5, 5), None);
        assert_eq!(shifted(4, 4, (0, 1), 5, 5), None);
        assert_eq!(shifted(2, 2, (1, -1), 5, 5), Some((3, 1)));
    }

    #[test]
    fn test_default() {
        assert_eq!(StructuringElement::default().side(), 3);
    }
}
