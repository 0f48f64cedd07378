use crate::render::GlowKey;

use super::spawn;
use super::{PerfTimer, SparkDraw, SparkFieldCore};

/// Seconds to advance for a frame at `now_ms`.
///
/// The first frame after creation advances nothing; backwards or
/// non-finite timestamps advance nothing; a long stall (background tab)
/// advances at most `max_step`.
pub(super) fn frame_delta(last_ms: Option<f64>, now_ms: f64, max_step: f32) -> f32 {
    let Some(last_ms) = last_ms else {
        return 0.0;
    };
    if !now_ms.is_finite() {
        return 0.0;
    }
    (((now_ms - last_ms) / 1000.0) as f32).clamp(0.0, max_step)
}

pub(super) fn step(field: &mut SparkFieldCore, now_ms: f64) -> f32 {
    let timer = field.perf_enabled.then(PerfTimer::start);

    let dt = frame_delta(field.last_timestamp, now_ms, field.config.max_step);
    if now_ms.is_finite() {
        field.last_timestamp = Some(now_ms);
    }
    field.frame += 1;

    let cell_size = field.config.cell_size as f32;
    let size_multiplier = field.config.size_multiplier(field.viewport.width);
    let growth = field.config.glow_growth;
    let linger = field.config.linger;
    let threshold = field.config.alpha_threshold;

    let SparkFieldCore {
        sparks,
        occupancy,
        draws,
        ..
    } = field;
    draws.clear();

    let mut expired = 0u32;
    sparks.retain_mut(|spark| {
        spark.advance(dt);
        if spark.is_expired(linger) {
            occupancy.release(spark.cell);
            expired += 1;
            return false;
        }
        let alpha = spark.alpha();
        if alpha > threshold {
            let (center_x, center_y) = spark.center(cell_size);
            draws.push(SparkDraw {
                key: GlowKey::new(spark.color, spark.scale_bucket()),
                center_x,
                center_y,
                size: cell_size * spark.scale * size_multiplier * (1.0 + growth * alpha),
                alpha,
            });
        }
        true
    });

    let (spawned, collisions) = spawn::top_up(field);

    if let Some(timer) = timer {
        let stats = &mut field.perf_stats;
        stats.step_ms = timer.elapsed_ms();
        stats.step_seconds = dt;
        stats.active_sparks = field.sparks.len() as u32;
        stats.drawn = field.draws.len() as u32;
        stats.expired = expired;
        stats.spawned = spawned;
        stats.placement_collisions = collisions;
        stats.occupied_cells = field.occupancy.occupied_cells() as u32;
    }

    dt
}
