//! Connected change regions with holes filled
//!
//! Only the outer boundary of each component matters: background pixels
//! that cannot reach the image border through 4-connected background are
//! holes and count as part of the component around them. The filled mask
//! is then labelled with 8-connectivity.

use ndarray::Array2;
use rowguard_core::Raster;
use serde::Serialize;

/// Axis-aligned pixel rectangle `[x, x + width) x [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BoundingBox {
    /// Geometric centre in pixel coordinates
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// One filled foreground component
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub bounding_box: BoundingBox,
    /// Pixel count, including filled holes
    pub area: u64,
    /// `(x, y)` first-moment centroid
    pub centroid: (f64, f64),
}

/// Running first moments and extent of a component
#[derive(Debug)]
struct Moments {
    m00: f64,
    m10: f64,
    m01: f64,
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl Moments {
    fn at(x: usize, y: usize) -> Self {
        Self {
            m00: 0.0,
            m10: 0.0,
            m01: 0.0,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn add(&mut self, x: usize, y: usize) {
        self.m00 += 1.0;
        self.m10 += x as f64;
        self.m01 += y as f64;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn into_component(self) -> Component {
        let bounding_box = BoundingBox {
            x: self.min_x,
            y: self.min_y,
            width: self.max_x - self.min_x + 1,
            height: self.max_y - self.min_y + 1,
        };
        let centroid = if self.m00 > 0.0 {
            (self.m10 / self.m00, self.m01 / self.m00)
        } else {
            bounding_box.center()
        };
        Component {
            bounding_box,
            area: self.m00 as u64,
            centroid,
        }
    }
}

const FOUR: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const EIGHT: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Extract the hole-filled components of a binary mask.
///
/// Components come back in raster-scan order of their top-most, then
/// left-most, pixel.
pub fn external_components(mask: &Raster<u8>) -> Vec<Component> {
    let (rows, cols) = mask.shape();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let filled = fill_holes(mask.data());

    let mut visited = Array2::from_elem((rows, cols), false);
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            if !filled[(row, col)] || visited[(row, col)] {
                continue;
            }
            visited[(row, col)] = true;
            stack.push((row, col));
            let mut moments = Moments::at(col, row);

            while let Some((r, c)) = stack.pop() {
                moments.add(c, r);
                for next in neighbours(r, c, &EIGHT, rows, cols) {
                    if filled[next] && !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }
            components.push(moments.into_component());
        }
    }

    components
}

/// Foreground plus every background pixel not 4-connected to the border
fn fill_holes(mask: &Array2<u8>) -> Array2<bool> {
    let (rows, cols) = mask.dim();
    let mut outside = Array2::from_elem((rows, cols), false);
    let mut stack = Vec::new();

    let border = (0..cols)
        .flat_map(|c| [(0, c), (rows - 1, c)])
        .chain((0..rows).flat_map(|r| [(r, 0), (r, cols - 1)]));
    for pos in border {
        if mask[pos] == 0 && !outside[pos] {
            outside[pos] = true;
            stack.push(pos);
        }
    }

    while let Some((r, c)) = stack.pop() {
        for next in neighbours(r, c, &FOUR, rows, cols) {
            if mask[next] == 0 && !outside[next] {
                outside[next] = true;
                stack.push(next);
            }
        }
    }

    outside.mapv(|o| !o)
}

fn neighbours<'a>(
    row: usize,
    col: usize,
    offsets: &'a [(isize, isize)],
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    offsets.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < rows && c < cols).then_some((r, c))
    })
}
