//! Pairwise force evaluation.
//!
//! Every function here is pure per pair: the result depends only on the rule and the two
//! particles passed in, which is what lets the update pass run on any number of workers
//! without changing its output.
use crate::particles::{Particle, Rule};
use crate::utils::sanitize;

/// Largest magnitude the repulsive branch may reach.
pub const MAX_REPULSION: f32 = 1.0;

/// Computes the scalar force a rule exerts at `distance`.
///
/// - beyond `far_cutoff` there is no interaction;
/// - below `near_cutoff` the force is `near_cutoff / distance - 1 + peak`, clamped to a
///   magnitude of [`MAX_REPULSION`] and zeroed if it is not finite;
/// - in between it falls linearly from `peak` at `near_cutoff` to `0` at `far_cutoff`.
///
/// Degenerate rules never panic: equal cutoffs give `0` on the linear branch and reversed
/// cutoffs simply never reach it.
///
/// # Examples
///
/// ```
/// use particle_life::particles::{calculate_force, Color, Rule};
///
/// let rule = Rule::new(Color::Red, Color::Red, 5.0, 15.0, 0.5);
///
/// assert_eq!(calculate_force(&rule, 20.0), 0.0);   // out of reach
/// assert_eq!(calculate_force(&rule, 5.0), 0.5);    // peak at the near cutoff
/// assert_eq!(calculate_force(&rule, 10.0), 0.25);  // halfway down the slope
/// assert_eq!(calculate_force(&rule, 2.0), 1.0);    // 5/2 - 1 + 0.5, clamped
/// ```
pub fn calculate_force(rule: &Rule, distance: f32) -> f32 {
    if distance > rule.far_cutoff {
        return 0.0;
    }

    if distance < rule.near_cutoff {
        let repulsion = rule.near_cutoff / distance - 1.0 + rule.peak;
        if !repulsion.is_finite() {
            return 0.0;
        }
        return repulsion.clamp(-MAX_REPULSION, MAX_REPULSION);
    }

    let span = rule.far_cutoff - rule.near_cutoff;
    if span == 0.0 {
        return 0.0;
    }
    sanitize(rule.peak * (rule.far_cutoff - distance) / span)
}

/// Applies one rule to `subject` on behalf of `other`.
///
/// The force acts along `subject.position - other.position` and is accumulated into
/// `subject.velocity` only. Coincident particles have no direction and are left alone.
///
/// # Examples
///
/// ```
/// use particle_life::particles::{execute_rule, Color, Particle, Rule};
///
/// let rule = Rule::new(Color::Red, Color::Red, 5.0, 15.0, 0.5);
/// let mut left = Particle::at_rest((50.0, 50.0), Color::Red);
/// let right = Particle::at_rest((52.0, 50.0), Color::Red);
///
/// execute_rule(&rule, &mut left, &right);
/// assert_eq!(left.velocity, (-1.0, 0.0));
/// ```
pub fn execute_rule(rule: &Rule, subject: &mut Particle, other: &Particle) {
    let dx = subject.position.0 - other.position.0;
    let dy = subject.position.1 - other.position.1;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance == 0.0 {
        return;
    }

    let force = calculate_force(rule, distance);
    subject.velocity.0 += dx / distance * force;
    subject.velocity.1 += dy / distance * force;
}

/// Scales velocity by `1 - friction` on both axes.
#[inline]
pub fn apply_friction(velocity: (f32, f32), friction: f32) -> (f32, f32) {
    let keep = 1.0 - friction;
    (velocity.0 * keep, velocity.1 * keep)
}

/// Integrates position by one generation, reflecting off the world edges.
///
/// An axis whose new coordinate would leave `[0, bound)` keeps its old coordinate and has
/// its velocity reversed and halved instead. The particle is not pushed back inside, so a
/// particle held against a wall by forces flips its velocity every generation.
///
/// # Examples
///
/// ```
/// use particle_life::particles::{perform_movement, Color, Particle};
///
/// let mut particle = Particle::new((199.5, 50.0), (1.0, 0.0), Color::Blue);
/// perform_movement(&mut particle, (200.0, 200.0));
/// assert_eq!(particle.position, (199.5, 50.0));
/// assert_eq!(particle.velocity, (-0.5, 0.0));
/// ```
pub fn perform_movement(particle: &mut Particle, bounds: (f32, f32)) {
    let (x, y) = particle.position;
    let (vx, vy) = particle.velocity;

    let new_x = x + vx;
    if (0.0..bounds.0).contains(&new_x) {
        particle.position.0 = new_x;
    } else {
        particle.velocity.0 = -0.5 * vx;
    }

    let new_y = y + vy;
    if (0.0..bounds.1).contains(&new_y) {
        particle.position.1 = new_y;
    } else {
        particle.velocity.1 = -0.5 * vy;
    }
}
