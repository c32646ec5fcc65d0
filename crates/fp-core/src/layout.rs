//! Synthetic field layouts.
//!
//! Used by front ends that need a request without hand-drawn fields, and as
//! the fallback when a custom layout fails validation.

use crate::{CoreError, CoreResult, Field, FieldId, LayoutRng};

/// Lay `count` equally sized fields out on a near-square grid, row-major,
/// with `gap` metres of road between neighbours.  Ids run from 1.
pub fn grid_layout(count: usize, width: f64, height: f64, gap: f64) -> Vec<Field> {
    if count == 0 {
        return Vec::new();
    }
    let cols = (count as f64).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            Field::new(
                FieldId(i as u32 + 1),
                col as f64 * (width + gap),
                row as f64 * (height + gap),
                width,
                height,
            )
        })
        .collect()
}

/// Parameters for [`random_layout`].
#[derive(Copy, Clone, Debug)]
pub struct RandomLayout {
    /// Fields are placed inside `[0, extent] × [0, extent]`.
    pub extent: f64,
    pub min_size: f64,
    pub max_size: f64,
    /// Minimum clearance between any two fields.
    pub gap: f64,
    /// Placement attempts per field before giving up.
    pub max_attempts: u32,
}

impl Default for RandomLayout {
    fn default() -> Self {
        Self {
            extent:       400.0,
            min_size:     40.0,
            max_size:     100.0,
            gap:          20.0,
            max_attempts: 200,
        }
    }
}

/// Place `count` non-overlapping fields with integer coordinates by
/// rejection sampling.
pub fn random_layout(count: usize, params: RandomLayout, rng: &mut LayoutRng) -> CoreResult<Vec<Field>> {
    if params.min_size <= 0.0 || params.max_size < params.min_size {
        return Err(CoreError::Layout(format!(
            "invalid size range {}..={}",
            params.min_size, params.max_size
        )));
    }
    if params.extent < params.max_size {
        return Err(CoreError::Layout(format!(
            "extent {} is smaller than max field size {}",
            params.extent, params.max_size
        )));
    }

    let mut fields: Vec<Field> = Vec::with_capacity(count);
    for i in 0..count {
        let id = FieldId(i as u32 + 1);
        let mut placed = false;
        for _ in 0..params.max_attempts {
            let width  = rng.gen_range(params.min_size..=params.max_size).round();
            let height = rng.gen_range(params.min_size..=params.max_size).round();
            let x = rng.gen_range(0.0..=(params.extent - width)).round();
            let y = rng.gen_range(0.0..=(params.extent - height)).round();
            let candidate = Field::new(id, x, y, width, height);
            if fields.iter().all(|f| !f.overlaps(&candidate, params.gap)) {
                fields.push(candidate);
                placed = true;
                break;
            }
        }
        if !placed {
            return Err(CoreError::Layout(format!(
                "could not place field {} of {count} after {} attempts",
                i + 1,
                params.max_attempts
            )));
        }
    }
    Ok(fields)
}
