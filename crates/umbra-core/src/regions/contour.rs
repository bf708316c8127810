//! Outer borders, chain compression and polygon geometry.
//!
//! Borders come from `imageproc`'s Suzuki-Abe tracer over 8-connected
//! foreground components. Only outer borders without a parent are kept, so
//! components sitting inside the holes of another one are skipped.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};

use super::mask::{BinaryMask, FOREGROUND};
use super::{Region, Span};

/// Integer pixel-center coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Trace the outer border of every outermost component of `mask`.
pub(crate) fn external_regions(mask: &BinaryMask) -> Vec<Region> {
    find_contours::<i32>(&padded_image(mask))
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|contour| {
            let chain: Vec<Point> = contour
                .points
                .iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            let spans = fill_spans(&chain);
            let boundary = compress_chain(&chain);
            let area = polygon_area(&boundary);
            Region {
                boundary,
                area,
                spans,
            }
        })
        .collect()
}

/// Copy `mask` into a gray image with one background pixel on every side.
///
/// The tracer treats the outermost frame as background, so components
/// touching the frame need the margin to be traced at all.
fn padded_image(mask: &BinaryMask) -> GrayImage {
    let mut image = GrayImage::new(mask.width + 2, mask.height + 2);
    for (idx, &v) in mask.data.iter().enumerate() {
        if v == FOREGROUND {
            let x = idx as u32 % mask.width + 1;
            let y = idx as u32 / mask.width + 1;
            image.put_pixel(x, y, Luma([FOREGROUND]));
        }
    }
    image
}

/// Drop points whose incoming and outgoing steps are identical, leaving the
/// vertices of horizontal, vertical and diagonal runs.
pub(crate) fn compress_chain(chain: &[Point]) -> Vec<Point> {
    let n = chain.len();
    if n < 3 {
        return chain.to_vec();
    }

    (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let cur = chain[i];
            let next = chain[(i + 1) % n];
            (cur.x - prev.x, cur.y - prev.y) != (next.x - cur.x, next.y - cur.y)
        })
        .map(|i| chain[i])
        .collect()
}

/// Unsigned shoelace area of a closed polygon
pub fn polygon_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let twice_area: i64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
        })
        .sum();

    twice_area.abs() as f64 / 2.0
}

/// Rasterize the area enclosed by a border chain, border included.
///
/// The chain's bounding box is padded by one cell and flooded 4-connected
/// from a corner; border pixels stop the flood. Whatever the flood does not
/// reach is inside the outline, holes included.
pub(crate) fn fill_spans(chain: &[Point]) -> Vec<Span> {
    const FREE: u8 = 0;
    const WALL: u8 = 1;
    const OUTSIDE: u8 = 2;

    let Some(first) = chain.first() else {
        return Vec::new();
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in chain {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let w = (max_x - min_x + 3) as usize;
    let h = (max_y - min_y + 3) as usize;
    let mut cells = vec![FREE; w * h];
    for p in chain {
        cells[(p.y - min_y + 1) as usize * w + (p.x - min_x + 1) as usize] = WALL;
    }

    cells[0] = OUTSIDE;
    let mut stack = vec![0usize];
    while let Some(idx) = stack.pop() {
        let (cx, cy) = (idx % w, idx / w);
        let mut visit = |n: usize| {
            if cells[n] == FREE {
                cells[n] = OUTSIDE;
                stack.push(n);
            }
        };
        if cx > 0 {
            visit(idx - 1);
        }
        if cx + 1 < w {
            visit(idx + 1);
        }
        if cy > 0 {
            visit(idx - w);
        }
        if cy + 1 < h {
            visit(idx + w);
        }
    }

    let mut spans = Vec::new();
    for row in 1..h - 1 {
        let y = (min_y + row as i32 - 1) as u32;
        let line = &cells[row * w..(row + 1) * w];
        let mut col = 1;
        while col < w - 1 {
            if line[col] == OUTSIDE {
                col += 1;
                continue;
            }
            let start = col;
            while col < w - 1 && line[col] != OUTSIDE {
                col += 1;
            }
            spans.push(Span {
                y,
                x_start: (min_x + start as i32 - 1) as u32,
                x_end: (min_x + col as i32 - 2) as u32,
            });
        }
    }

    spans
}
