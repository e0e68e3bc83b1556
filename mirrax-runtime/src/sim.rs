use rand::Rng;

use crate::core::{
    HardwareComponent, LOAD_MAX, LOAD_MIN, TEMPERATURE_MAX, TEMPERATURE_MIN,
};

/// Maximum temperature change per tick in degrees celsius.
const TEMPERATURE_DELTA: f64 = 1.0;
/// Maximum load change per tick in percent.
const LOAD_DELTA: f64 = 2.5;

/// Advance the telemetry one tick.
///
/// Temperature and load take an independent uniform step and are clamped
/// to their bounds, a bounded random walk without mean reversion. All
/// other fields carry over unchanged, as do the component count and
/// ordering. The input snapshot is left untouched, the result is a fresh
/// snapshot.
pub fn advance<R: Rng>(previous: &[HardwareComponent], rng: &mut R) -> Vec<HardwareComponent> {
    previous
        .iter()
        .map(|component| {
            let mut next = component.clone();

            next.temperature = (component.temperature
                + rng.gen_range(-TEMPERATURE_DELTA..=TEMPERATURE_DELTA))
            .clamp(TEMPERATURE_MIN, TEMPERATURE_MAX);
            next.load = (component.load + rng.gen_range(-LOAD_DELTA..=LOAD_DELTA))
                .clamp(LOAD_MIN, LOAD_MAX);

            next
        })
        .collect()
}
