use crate::particles::{apply_friction, execute_rule, perform_movement, Particle, RuleSet};
use crate::spatial::{Region, SpatialIndex};

/// Computes generation N+1 of the particle in `slot` from generation N.
///
/// Only `generation` is read, so the result does not depend on which worker computes it or
/// in what order slots are visited.
///
/// 1. start from a copy of the old particle;
/// 2. for every rule whose source color matches, visit the candidates the index returns
///    for the square of half-side `far_cutoff` around the particle, skip itself and any
///    candidate of the wrong target color, and accumulate the rule's force;
/// 3. apply friction, integrate position with edge reflection, and zero any non-finite
///    component.
pub fn update_particle(generation: &SpatialIndex, rules: &RuleSet, friction: f32, slot: usize) -> Particle {
    let particles = generation.particles();
    let mut particle = particles[slot];

    for rule in rules.rules_from(particle.color) {
        let region = Region::around(particle.position, rule.far_cutoff);
        for range in generation.ranges_intersecting(&region) {
            for other_slot in range {
                if other_slot == slot {
                    continue;
                }
                let other = &particles[other_slot];
                if rule.applies_to(&particle, other) {
                    execute_rule(rule, &mut particle, other);
                }
            }
        }
    }

    particle.velocity = apply_friction(particle.velocity, friction);
    perform_movement(&mut particle, generation.grid().bounds());
    particle.sanitize();
    particle
}

/// Fills `output` with generation N+1 for the slots in `slots`.
pub fn update_partition(
    generation: &SpatialIndex,
    rules: &RuleSet,
    friction: f32,
    slots: std::ops::Range<usize>,
    output: &mut Vec<Particle>,
) {
    output.clear();
    output.extend(slots.map(|slot| update_particle(generation, rules, friction, slot)));
}
