use crate::particles::{Color, Particle};
use crate::utils::SimulationError;

#[test]
fn test_new_particle() {
    let particle = Particle::new((1.0, 2.0), (3.0, 4.0), Color::Green);
    assert_eq!(particle.position, (1.0, 2.0));
    assert_eq!(particle.velocity, (3.0, 4.0));
    assert_eq!(particle.color, Color::Green);
    assert!((particle.speed() - 5.0).abs() < 1e-6, "Speed should be the velocity length");
}

#[test]
fn test_equality_is_structural() {
    let a = Particle::at_rest((5.0, 5.0), Color::Red);
    let b = Particle::at_rest((5.0, 5.0), Color::Red);
    let c = Particle::at_rest((5.0, 5.0), Color::Blue);
    assert_eq!(a, b);
    assert_ne!(a, c, "Color is part of a particle's value");
}

#[test]
fn test_sanitize_zeroes_non_finite_components() {
    let mut particle = Particle::new((f32::NAN, 3.0), (f32::INFINITY, -1.0), Color::Cyan);
    particle.sanitize();
    assert_eq!(particle.position, (0.0, 3.0));
    assert_eq!(particle.velocity, (0.0, -1.0));
}

#[test]
fn test_color_names_round_trip() {
    for color in Color::ALL {
        let parsed: Color = color.name().parse().expect("every color name should parse");
        assert_eq!(parsed, color);
        assert_eq!(color.to_string(), color.name());
    }
}

#[test]
fn test_unknown_color_name() {
    match "purple".parse::<Color>() {
        Err(SimulationError::UnknownColor(name)) => assert_eq!(name, "purple"),
        other => panic!("Expected UnknownColor, got {:?}", other),
    }
}

#[test]
fn test_color_rgb_is_unique() {
    for (i, a) in Color::ALL.iter().enumerate() {
        for b in &Color::ALL[i + 1..] {
            assert_ne!(a.rgb(), b.rgb(), "{} and {} share an RGB triple", a, b);
        }
        assert_eq!(Color::from_rgb(a.rgb()), Some(*a));
    }
    assert_eq!(Color::from_rgb([12, 34, 56]), None);
}
