//! End-to-end lifecycle scenarios driven with synthetic frame timestamps.

use ambient_sparks::{Cell, GridDims, Spark, SparkConfig, SparkFieldCore, Viewport};

const FRAME_MS: f64 = 20.0;

fn reference_spark() -> Spark {
    Spark::new(Cell::new(10, 10), 2, 0.3, 0.3, 1.5, 1.2)
}

fn is_reference(spark: &Spark) -> bool {
    spark.fade_in == 0.3 && spark.hold == 0.3 && spark.fade_out == 1.5
}

#[test]
fn desktop_viewport_starts_with_full_population() {
    let mut field = SparkFieldCore::new(1);
    field.initialize(Viewport::new(1024.0, 768.0, 1.0));

    assert_eq!(field.grid(), GridDims::new(64, 48));
    assert_eq!(field.active_count(), 28);
    let mut cells: Vec<Cell> = field.sparks().iter().map(|s| s.cell).collect();
    cells.sort_by_key(|c| (c.y, c.x));
    cells.dedup();
    assert_eq!(cells.len(), 28);
}

#[test]
fn spark_fades_in_holds_and_fades_out() {
    let spark = reference_spark();
    assert!((spark.alpha_at(0.3) - 1.0).abs() < 1e-4);
    for age in [0.35, 0.45, 0.55] {
        assert_eq!(spark.alpha_at(age), 1.0);
    }
    assert!((spark.alpha_at(0.6) - 1.0).abs() < 1e-4);
    assert!(spark.alpha_at(2.1) < 1e-4);
}

#[test]
fn spark_is_removed_shortly_after_fading_out() {
    let config = SparkConfig {
        target_population: 1,
        ..SparkConfig::default()
    };
    let mut field = SparkFieldCore::with_config(config, 5).unwrap();
    field.initialize(Viewport::new(1024.0, 768.0, 1.0));
    field.clear();
    assert!(field.insert_spark(reference_spark()));

    let mut now = 0.0;
    field.step(now);
    let mut last_seen_age = 0.0;
    for _ in 0..150 {
        now += FRAME_MS;
        field.step(now);
        match field.sparks().iter().find(|s| is_reference(s)) {
            Some(spark) => {
                assert!(spark.age <= 2.22 + 1e-3, "still alive at {}", spark.age);
                last_seen_age = spark.age;
            }
            None => break,
        }
    }

    assert!(field.sparks().iter().all(|s| !is_reference(s)));
    assert!(last_seen_age > 2.1, "removed too early at {last_seen_age}");
    // Replacement keeps the population
    assert_eq!(field.active_count(), 1);
}

#[test]
fn stalled_frame_advances_at_most_max_step() {
    let mut field = SparkFieldCore::new(11);
    field.initialize(Viewport::new(1024.0, 768.0, 1.0));
    field.step(1_000.0);
    field.step(1_016.0);
    let before: Vec<f32> = field.sparks().iter().map(|s| s.age).collect();

    let dt = field.step(3_016.0);

    assert_eq!(dt, 0.05);
    let after: Vec<f32> = field.sparks().iter().map(|s| s.age).collect();
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(*b, *a + 0.05);
    }
}

#[test]
fn orientation_change_keeps_field_consistent() {
    let mut field = SparkFieldCore::new(12);
    field.initialize(Viewport::new(1024.0, 768.0, 2.0));
    let mut now = 0.0;
    for viewport in [
        Viewport::new(768.0, 1024.0, 2.0),
        Viewport::new(375.0, 667.0, 3.0),
        Viewport::new(1024.0, 768.0, 2.0),
    ] {
        field.resize(viewport);
        for _ in 0..10 {
            field.step(now);
            now += 16.0;
        }
        let grid = field.grid();
        assert!(field.sparks().iter().all(|s| grid.contains(s.cell)));
        assert_eq!(field.active_count(), 28);
    }
}
