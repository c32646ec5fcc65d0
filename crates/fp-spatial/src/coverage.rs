//! Boustrophedon coverage paths.
//!
//! A field is split into horizontal rows `row_spacing` apart (at least one).
//! Completion fractions map onto rows: fraction `f` lies in row
//! `floor(f * rows)`, a fraction of the way along it.  Even rows run
//! left → right and odd rows right → left, so consecutive rows join at the
//! same side without a long repositioning jump.
//!
//! Each row contributes its entry and exit point.  Work that starts or stops
//! inside a row is cut at the proportional x offset, so a visit resumes
//! exactly where the previous one stopped.

use fp_core::{Field, Point};

/// Number of rows used to cover `field`.
pub fn total_rows(field: &Field, row_spacing: f64) -> usize {
    ((field.height / row_spacing).ceil() as usize).max(1)
}

/// Row index of a point produced by [`coverage_path`] for `field`.
pub fn row_index(field: &Field, row_spacing: f64, p: Point) -> usize {
    let rows = total_rows(field, row_spacing);
    let row_height = field.height / rows as f64;
    let row = ((p.y - field.y) / row_height).floor().max(0.0) as usize;
    row.min(rows - 1)
}

/// Coverage points for the work between `start_fraction` and
/// `start_fraction + work_fraction` (clamped to `[0, 1]`).
///
/// The result is never empty: a zero-length request yields the single point
/// where work would resume.
pub fn coverage_path(field: &Field, start_fraction: f64, work_fraction: f64, row_spacing: f64) -> Vec<Point> {
    let rows = total_rows(field, row_spacing);
    let rows_f = rows as f64;
    let row_height = field.height / rows_f;

    let start = start_fraction.clamp(0.0, 1.0);
    let end = (start + work_fraction.max(0.0)).clamp(start, 1.0);

    let start_pos = start * rows_f;
    let end_pos = end * rows_f;
    let first_row = (start_pos.floor() as usize).min(rows - 1);
    let last_row = (end_pos.ceil() as usize).clamp(first_row + 1, rows);

    let mut points = Vec::with_capacity((last_row - first_row) * 2);
    for row in first_row..last_row {
        let lo = if row == first_row { (start_pos - row as f64).clamp(0.0, 1.0) } else { 0.0 };
        let hi = if row + 1 == last_row { (end_pos - row as f64).clamp(lo, 1.0) } else { 1.0 };
        let y = field.y + (row as f64 + 0.5) * row_height;

        let along = |t: f64| {
            if row % 2 == 0 {
                field.x + t * field.width
            } else {
                field.max_x() - t * field.width
            }
        };

        points.push(Point::new(along(lo), y));
        if hi > lo {
            points.push(Point::new(along(hi), y));
        }
    }
    points
}
