//! Clipping of lines, bands and markers to a panel's fixed axis ranges.
//!
//! Panels use fixed ranges, so some data can fall outside them. Anything
//! outside is cut away before it reaches plotters, which would otherwise
//! pin it to the axis edge.

use std::ops::Range;

/// A point in data coordinates.
pub type Point = (f64, f64);

/// Inclusive data-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Debug, Clone, Copy)]
enum Boundary {
    MinX(f64),
    MaxX(f64),
    MinY(f64),
    MaxY(f64),
}

impl Boundary {
    fn inside(self, (x, y): Point) -> bool {
        match self {
            Boundary::MinX(bound) => x >= bound,
            Boundary::MaxX(bound) => x <= bound,
            Boundary::MinY(bound) => y >= bound,
            Boundary::MaxY(bound) => y <= bound,
        }
    }

    /// Where the segment `a -> b` crosses this boundary. One end must be
    /// inside and the other outside.
    fn intersect(self, a: Point, b: Point) -> Point {
        match self {
            Boundary::MinX(x) | Boundary::MaxX(x) => {
                let t = (x - a.0) / (b.0 - a.0);
                (x, a.1 + t * (b.1 - a.1))
            }
            Boundary::MinY(y) | Boundary::MaxY(y) => {
                let t = (y - a.1) / (b.1 - a.1);
                (a.0 + t * (b.0 - a.0), y)
            }
        }
    }
}

impl ClipRect {
    pub fn new(x: &Range<f64>, y: &Range<f64>) -> Self {
        Self {
            x_min: x.start,
            x_max: x.end,
            y_min: y.start,
            y_max: y.end,
        }
    }

    pub fn contains(&self, (x, y): Point) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    fn boundaries(&self) -> [Boundary; 4] {
        [
            Boundary::MinX(self.x_min),
            Boundary::MaxX(self.x_max),
            Boundary::MinY(self.y_min),
            Boundary::MaxY(self.y_max),
        ]
    }

    /// Visible part of the segment `a -> b` (Liang-Barsky), or `None`.
    ///
    /// Endpoints that are already inside are returned unchanged.
    pub fn clip_segment(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;

        for (p, q) in [
            (-dx, a.0 - self.x_min),
            (dx, self.x_max - a.0),
            (-dy, a.1 - self.y_min),
            (dy, self.y_max - a.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        let at = |t: f64| (a.0 + t * dx, a.1 + t * dy);
        let start = if t0 == 0.0 { a } else { at(t0) };
        let end = if t1 == 1.0 { b } else { at(t1) };
        Some((start, end))
    }

    /// Split a polyline into the runs that stay visible.
    ///
    /// Every returned run has at least two points.
    pub fn clip_polyline(&self, points: &[Point]) -> Vec<Vec<Point>> {
        let mut runs = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for pair in points.windows(2) {
            match self.clip_segment(pair[0], pair[1]) {
                Some((start, end)) => {
                    if current.last() != Some(&start) {
                        flush_run(&mut runs, &mut current);
                        current.push(start);
                    }
                    current.push(end);
                }
                None => flush_run(&mut runs, &mut current),
            }
        }
        flush_run(&mut runs, &mut current);
        runs
    }

    /// Clip a closed polygon (Sutherland-Hodgman). Empty when nothing is
    /// visible.
    pub fn clip_polygon(&self, points: &[Point]) -> Vec<Point> {
        let mut output = points.to_vec();

        for boundary in self.boundaries() {
            let input = std::mem::take(&mut output);
            let Some(&last) = input.last() else {
                break;
            };

            let mut prev = last;
            for &cur in &input {
                match (boundary.inside(prev), boundary.inside(cur)) {
                    (true, true) => output.push(cur),
                    (true, false) => output.push(boundary.intersect(prev, cur)),
                    (false, true) => {
                        output.push(boundary.intersect(prev, cur));
                        output.push(cur);
                    }
                    (false, false) => {}
                }
                prev = cur;
            }
        }

        output
    }
}

fn flush_run(runs: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    let run = std::mem::take(current);
    if run.len() >= 2 {
        runs.push(run);
    }
}
