//! Fleet generation (spec §4.7): guarantees at least `min_per_class` of each
//! class when `min_per_class * CLASS_COUNT <= plane_count`, degrading
//! gracefully (but staying unbiased beyond the constraint) otherwise.

use crate::aircraft::Aircraft;
use crate::classes::{CLASS_COUNT, CLASSES};
use crate::rng::RngService;

/// Chooses a class id for each of `plane_count` aircraft.
pub fn choose_classes(plane_count: usize, min_per_class: usize, rng: &mut RngService) -> Vec<usize> {
    let mut needed = [min_per_class; CLASS_COUNT];
    let mut still_needed = min_per_class * CLASS_COUNT;
    let mut chosen = Vec::with_capacity(plane_count);

    for _ in 0..plane_count {
        let mut c = rng.uniform_class(CLASS_COUNT);
        if still_needed > 0 {
            let mut rotations = 0;
            while needed[c] == 0 && rotations < CLASS_COUNT {
                c = (c + 1) % CLASS_COUNT;
                rotations += 1;
            }
        }
        if needed[c] > 0 {
            needed[c] -= 1;
            still_needed -= 1;
        }
        chosen.push(c);
    }
    chosen
}

/// Materializes `plane_count` aircraft, tail numbers assigned from a
/// per-call counter starting at 0 — never a process-wide global.
pub fn generate_fleet(plane_count: usize, min_per_class: usize, rng: &mut RngService) -> Vec<Aircraft> {
    choose_classes(plane_count, min_per_class, rng)
        .into_iter()
        .enumerate()
        .map(|(tail, class_id)| Aircraft::new(class_id, CLASSES[class_id], tail as u64, rng))
        .collect()
}
