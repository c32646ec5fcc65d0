//! Synthetic request generation.

use anyhow::Result;
use clap::ValueEnum;

use fp_core::{Field, LayoutRng, Point, RandomLayout, grid_layout, random_layout};
use fp_sim::{Parameters, ScheduleRequest};

/// Grid layout field size and spacing.
const GRID_FIELD: (f64, f64, f64) = (80.0, 60.0, 20.0);
/// Distance of the base station below the layout.
const BASE_OFFSET: f64 = 20.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutKind {
    Random,
    Grid,
}

pub struct GenerateArgs {
    pub fields:          usize,
    pub machines:        u32,
    pub layout:          LayoutKind,
    pub seed:            u64,
    pub capacity:        f64,
    pub supply_duration: f64,
}

/// A request with a generated layout and the base station centred just
/// below it.
pub fn build_request(args: &GenerateArgs) -> Result<ScheduleRequest> {
    let fields = match args.layout {
        LayoutKind::Grid => {
            let (w, h, gap) = GRID_FIELD;
            grid_layout(args.fields, w, h, gap)
        }
        LayoutKind::Random => {
            let mut rng = LayoutRng::new(args.seed);
            random_layout(args.fields, RandomLayout::default(), &mut rng)?
        }
    };

    let request = ScheduleRequest {
        machine_count: args.machines,
        base_station:  base_below(&fields),
        fields,
        parameters:    Parameters { machine_capacity: args.capacity, supply_duration: args.supply_duration },
    };
    request.validate()?;
    Ok(request)
}

fn base_below(fields: &[Field]) -> Point {
    if fields.is_empty() {
        return Point::default();
    }
    let min_x = fields.iter().map(|f| f.x).fold(f64::INFINITY, f64::min);
    let max_x = fields.iter().map(|f| f.max_x()).fold(f64::NEG_INFINITY, f64::max);
    let min_y = fields.iter().map(|f| f.y).fold(f64::INFINITY, f64::min);
    Point::new((min_x + max_x) * 0.5, min_y - BASE_OFFSET).snapped()
}
