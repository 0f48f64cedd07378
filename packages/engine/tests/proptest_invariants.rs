//! Property-based invariants for the spark lifecycle and the field.
//!
//! 1. Opacity stays in [0, 1] for any timings and age.
//! 2. Opacity is zero at birth and at full fade-out.
//! 3. Advancing never makes a spark younger.
//! 4. A frame never advances more than `max_step`.
//! 5. The population never exceeds the target and fills a large grid.
//! 6. Occupancy agrees with the live sparks, across resizes.

use ambient_sparks::{Cell, Spark, SparkFieldCore, Viewport};
use proptest::prelude::*;

fn spark_strategy() -> impl Strategy<Value = Spark> {
    (0.05f32..1.0, 0.0f32..1.0, 0.05f32..3.0, 0.5f32..2.0)
        .prop_map(|(fade_in, hold, fade_out, scale)| {
            Spark::new(Cell::new(0, 0), 0, fade_in, hold, fade_out, scale)
        })
}

fn frame_gaps() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![
            8 => 1.0f64..40.0,
            1 => 40.0f64..5_000.0,
            1 => -100.0f64..0.0,
        ],
        1..80,
    )
}

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (0.0f64..2_000.0, 0.0f64..1_400.0, 1.0f64..3.0)
        .prop_map(|(w, h, dpr)| Viewport::new(w, h, dpr))
}

fn distinct_cells(field: &SparkFieldCore) -> usize {
    let mut cells: Vec<Cell> = field.sparks().iter().map(|s| s.cell).collect();
    cells.sort_by_key(|c| (c.y, c.x));
    cells.dedup();
    cells.len()
}

proptest! {
    #[test]
    fn alpha_is_bounded(spark in spark_strategy(), age in -1.0f32..10.0) {
        let alpha = spark.alpha_at(age);
        prop_assert!((0.0..=1.0).contains(&alpha), "alpha {} at age {}", alpha, age);
    }

    #[test]
    fn alpha_is_zero_at_both_ends(spark in spark_strategy()) {
        prop_assert_eq!(spark.alpha_at(0.0), 0.0);
        prop_assert_eq!(spark.alpha_at(spark.total_duration), 0.0);
    }

    #[test]
    fn advance_never_decreases_age(mut spark in spark_strategy(), steps in prop::collection::vec(-1.0f32..1.0, 0..20)) {
        for dt in steps {
            let before = spark.age;
            spark.advance(dt);
            prop_assert!(spark.age >= before);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn frames_respect_step_clamp_and_population(seed in any::<u32>(), gaps in frame_gaps()) {
        let mut field = SparkFieldCore::new(seed);
        field.initialize(Viewport::new(1024.0, 768.0, 1.0));
        let mut now = 1_000.0;
        field.step(now);
        for gap in gaps {
            now += gap;
            let dt = field.step(now);
            prop_assert!((0.0..=0.05).contains(&dt), "dt {} for gap {}", dt, gap);
            prop_assert_eq!(field.active_count(), 28);
            prop_assert_eq!(distinct_cells(&field), 28);
            prop_assert_eq!(field.occupancy().occupied_cells(), 28);
            for spark in field.sparks() {
                prop_assert!(spark.age <= spark.total_duration + 0.12);
            }
        }
    }

    #[test]
    fn resizes_keep_occupancy_consistent(seed in any::<u32>(), viewports in prop::collection::vec(viewport_strategy(), 1..8)) {
        let mut field = SparkFieldCore::new(seed);
        field.initialize(Viewport::new(1024.0, 768.0, 1.0));
        let mut now = 0.0;
        for viewport in viewports {
            field.resize(viewport);
            field.step(now);
            now += 16.0;

            let grid = field.grid();
            prop_assert!(field.active_count() <= 28);
            if grid.is_empty() {
                prop_assert_eq!(field.active_count(), 0);
            } else {
                prop_assert_eq!(field.active_count(), 28);
            }
            for spark in field.sparks() {
                prop_assert!(grid.contains(spark.cell));
                prop_assert!(field.is_occupied(spark.cell));
            }
            prop_assert_eq!(field.occupancy().occupied_cells(), distinct_cells(&field));
        }
    }
}
