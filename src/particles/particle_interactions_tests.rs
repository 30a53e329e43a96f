use approx::assert_abs_diff_eq;

use crate::particles::{
    apply_friction, calculate_force, execute_rule, perform_movement, Color,
    Particle, Rule, MAX_REPULSION,
};

fn red_rule(near: f32, far: f32, peak: f32) -> Rule {
    Rule::new(Color::Red, Color::Red, near, far, peak)
}

#[test]
fn test_force_is_zero_beyond_far_cutoff() {
    let rule = red_rule(5.0, 15.0, 0.5);
    assert_eq!(calculate_force(&rule, 15.001), 0.0);
    assert_eq!(calculate_force(&rule, 1000.0), 0.0);
}

#[test]
fn test_force_vanishes_at_far_cutoff() {
    for (near, far, peak) in [(5.0, 15.0, 0.5), (1.0, 2.0, -0.7), (0.5, 80.0, 1.0)] {
        let rule = red_rule(near, far, peak);
        assert_abs_diff_eq!(calculate_force(&rule, far), 0.0, epsilon = 1e-6);
    }
}

#[test]
fn test_force_at_near_cutoff_is_peak() {
    let rule = red_rule(5.0, 15.0, 0.5);
    // Both branches agree at the boundary: 5/5 - 1 + 0.5 == 0.5.
    assert_abs_diff_eq!(calculate_force(&rule, 5.0), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(calculate_force(&rule, 5.0 - 1e-4), 0.5, epsilon = 1e-3);
}

#[test]
fn test_force_is_linear_between_cutoffs() {
    let rule = red_rule(2.0, 12.0, 0.8);
    assert_abs_diff_eq!(calculate_force(&rule, 7.0), 0.4, epsilon = 1e-6);
    assert_abs_diff_eq!(calculate_force(&rule, 9.5), 0.2, epsilon = 1e-6);
}

#[test]
fn test_repulsion_is_clamped() {
    let rule = red_rule(5.0, 15.0, 0.5);
    assert_eq!(calculate_force(&rule, 0.01), MAX_REPULSION);

    let attracting = red_rule(5.0, 15.0, -30.0);
    assert_eq!(calculate_force(&attracting, 4.0), -MAX_REPULSION);
}

#[test]
fn test_zero_distance_is_sanitized() {
    let rule = red_rule(5.0, 15.0, 0.5);
    assert_eq!(calculate_force(&rule, 0.0), 0.0);
}

#[test]
fn test_degenerate_rules_do_not_panic() {
    let equal = red_rule(4.0, 4.0, 0.9);
    assert_eq!(calculate_force(&equal, 4.0), 0.0);

    let reversed = red_rule(10.0, 2.0, 0.9);
    assert_eq!(calculate_force(&reversed, 5.0), 0.0);
    let close = calculate_force(&reversed, 1.0);
    assert!(close.is_finite() && close.abs() <= MAX_REPULSION);

    let nan = red_rule(f32::NAN, f32::NAN, f32::NAN);
    assert!(calculate_force(&nan, 1.0).is_finite());
}

#[test]
fn test_force_is_pure() {
    let rule = red_rule(3.3, 17.1, 0.41);
    for d in [0.1_f32, 1.7, 3.3, 4.2, 10.0, 17.1, 40.0] {
        let first = calculate_force(&rule, d);
        for _ in 0..5 {
            assert_eq!(calculate_force(&rule, d).to_bits(), first.to_bits());
        }
    }
}

#[test]
fn test_execute_rule_updates_only_the_subject() {
    let rule = red_rule(5.0, 15.0, 0.5);
    let mut subject = Particle::at_rest((50.0, 50.0), Color::Red);
    let other = Particle::at_rest((50.0, 60.0), Color::Red);
    let other_before = other;

    execute_rule(&rule, &mut subject, &other);

    // distance 10 is halfway down the slope: force 0.25 pointing away (-y).
    assert_abs_diff_eq!(subject.velocity.0, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(subject.velocity.1, -0.25, epsilon = 1e-6);
    assert_eq!(other, other_before);
}

#[test]
fn test_execute_rule_ignores_coincident_particles() {
    let rule = red_rule(5.0, 15.0, 0.5);
    let mut subject = Particle::new((10.0, 10.0), (0.3, 0.1), Color::Red);
    let other = Particle::at_rest((10.0, 10.0), Color::Red);
    execute_rule(&rule, &mut subject, &other);
    assert_eq!(subject.velocity, (0.3, 0.1));
}

#[test]
fn test_friction() {
    assert_eq!(apply_friction((2.0, -4.0), 0.0), (2.0, -4.0));
    let slowed = apply_friction((2.0, -4.0), 0.25);
    assert_abs_diff_eq!(slowed.0, 1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(slowed.1, -3.0, epsilon = 1e-6);
}

#[test]
fn test_movement_inside_bounds() {
    let mut particle = Particle::new((10.0, 10.0), (2.0, -3.0), Color::White);
    perform_movement(&mut particle, (100.0, 100.0));
    assert_eq!(particle.position, (12.0, 7.0));
    assert_eq!(particle.velocity, (2.0, -3.0));
}

#[test]
fn test_movement_reflects_each_axis_independently() {
    let mut particle = Particle::new((1.0, 99.0), (-2.0, 4.0), Color::White);
    perform_movement(&mut particle, (100.0, 100.0));
    assert_eq!(particle.position, (1.0, 99.0));
    assert_eq!(particle.velocity, (1.0, -2.0));

    let mut corner = Particle::new((0.5, 50.0), (-1.0, 1.0), Color::White);
    perform_movement(&mut corner, (100.0, 100.0));
    assert_eq!(corner.position, (0.5, 51.0));
    assert_eq!(corner.velocity, (0.5, 1.0));
}

#[test]
fn test_movement_lands_on_zero() {
    // Zero is inside the half-open bound.
    let mut particle = Particle::new((1.0, 5.0), (-1.0, 0.0), Color::White);
    perform_movement(&mut particle, (100.0, 100.0));
    assert_eq!(particle.position, (0.0, 5.0));
}
