//! Unit tests for fp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, FieldId, MachineId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = MachineId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(MachineId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(MachineId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(FieldId(7).to_string(), "FieldId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Bounds, Field, FieldId, Point, inside_any, segment_clear};

    fn field() -> Field {
        Field::new(FieldId(1), 0.0, 0.0, 100.0, 80.0)
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance_sq(Point::new(4.0, 5.0)), 25.0);
    }

    #[test]
    fn boundary_is_outside() {
        let f = field();
        assert!(f.contains_strict(Point::new(50.0, 40.0)));
        assert!(!f.contains_strict(Point::new(0.0, 40.0)));
        assert!(!f.contains_strict(Point::new(100.0, 80.0)));
        assert!(!f.contains_strict(Point::new(50.0, 80.0)));
        assert!(!f.contains_strict(Point::new(-1.0, 40.0)));
    }

    #[test]
    fn nearest_corner_first_minimum_wins() {
        let f = field();
        assert_eq!(f.nearest_corner(Point::new(-5.0, -5.0)), Point::new(0.0, 0.0));
        assert_eq!(f.nearest_corner(Point::new(120.0, 90.0)), Point::new(100.0, 80.0));
        // Centre is equidistant from all four corners.
        assert_eq!(f.nearest_corner(f.center()), Point::new(0.0, 0.0));
    }

    #[test]
    fn segment_through_interior_is_blocked() {
        let fields = [field()];
        assert!(!segment_clear(Point::new(-10.0, 40.0), Point::new(110.0, 40.0), &fields, 10));
        // Along the boundary edge is fine.
        assert!(segment_clear(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &fields, 10));
        // Entirely outside.
        assert!(segment_clear(Point::new(-10.0, -10.0), Point::new(110.0, -10.0), &fields, 10));
    }

    #[test]
    fn inside_any_checks_every_field() {
        let fields = [field(), Field::new(FieldId(2), 200.0, 0.0, 10.0, 10.0)];
        assert!(inside_any(Point::new(205.0, 5.0), &fields));
        assert!(!inside_any(Point::new(150.0, 5.0), &fields));
    }

    #[test]
    fn snapping_rounds_half_away_from_zero() {
        assert_eq!(Point::new(2.5, -2.5).snapped(), Point::new(3.0, -3.0));
        assert_eq!(Point::new(49.4, 40.6).snapped(), Point::new(49.0, 41.0));
    }

    #[test]
    fn bounds_include_extra_point() {
        let b = Bounds::around(&[field()], Point::new(-30.0, 10.0)).unwrap().padded(20.0);
        assert_eq!(b.min, Point::new(-50.0, -20.0));
        assert_eq!(b.max, Point::new(120.0, 100.0));
        assert!(Bounds::around(&[], Point::default()).is_none());
    }

    #[test]
    fn validate_rejects_degenerate_fields() {
        assert!(field().validate().is_ok());
        assert!(Field::new(FieldId(3), 0.0, 0.0, 0.0, 10.0).validate().is_err());
        assert!(Field::new(FieldId(3), 0.0, 0.0, 10.0, -1.0).validate().is_err());
        assert!(Field::new(FieldId(3), f64::NAN, 0.0, 10.0, 10.0).validate().is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_display() {
        assert_eq!(Tick(10).to_string(), "T10");
        assert_eq!(Tick::ZERO, Tick::default());
    }

    #[test]
    fn clock_expires_at_horizon() {
        let mut clock = SimClock::new(60, 180);
        for _ in 0..3 {
            assert!(!clock.expired());
            clock.advance();
        }
        assert!(clock.expired());
        assert_eq!(clock.elapsed_secs(), 180);
    }

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new(60, 8 * 3600);
        for _ in 0..61 {
            clock.advance();
        }
        assert_eq!(clock.to_string(), "T61 (01:01)");
    }
}

#[cfg(test)]
mod config {
    use crate::PlannerConfig;

    #[test]
    fn default_is_valid() {
        let c = PlannerConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.connect_radius(), 15.0);
        assert_eq!(c.horizon_secs, 28_800);
    }

    #[test]
    fn rejects_zero_spacing() {
        let c = PlannerConfig { grid_spacing: 0.0, ..PlannerConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_tick() {
        let c = PlannerConfig { tick_secs: 0, ..PlannerConfig::default() };
        assert!(c.validate().is_err());
    }
}

#[cfg(test)]
mod layout {
    use crate::{LayoutRng, RandomLayout, grid_layout, random_layout};

    #[test]
    fn grid_layout_is_square_ish() {
        let fields = grid_layout(5, 50.0, 40.0, 20.0);
        assert_eq!(fields.len(), 5);
        // 3 columns: field 4 starts the second row.
        assert_eq!((fields[3].x, fields[3].y), (0.0, 60.0));
        assert_eq!((fields[2].x, fields[2].y), (140.0, 0.0));
        assert_eq!(fields[0].id.0, 1);
        assert!(grid_layout(0, 50.0, 40.0, 20.0).is_empty());
    }

    #[test]
    fn random_layout_is_reproducible_and_disjoint() {
        let a = random_layout(6, RandomLayout::default(), &mut LayoutRng::new(7)).unwrap();
        let b = random_layout(6, RandomLayout::default(), &mut LayoutRng::new(7)).unwrap();
        assert_eq!(a, b);
        for (i, f) in a.iter().enumerate() {
            assert!(f.validate().is_ok());
            for g in &a[i + 1..] {
                assert!(!f.overlaps(g, 0.0), "{f:?} overlaps {g:?}");
            }
        }
    }

    #[test]
    fn random_layout_reports_overcrowding() {
        let params = RandomLayout { extent: 100.0, min_size: 90.0, max_size: 90.0, max_attempts: 5, ..RandomLayout::default() };
        assert!(random_layout(3, params, &mut LayoutRng::new(1)).is_err());
    }
}
