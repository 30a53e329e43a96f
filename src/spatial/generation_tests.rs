use crate::particles::{Color, Particle};
use crate::spatial::{GenerationPair, GridGeometry, SpatialIndex};

fn pair_with(particles: Vec<Particle>) -> GenerationPair {
    let grid = GridGeometry::new((100.0, 100.0), 10);
    GenerationPair::new(SpatialIndex::from_particles(grid, particles))
}

#[test]
fn test_next_is_slot_aligned_with_current() {
    let mut pair = pair_with(vec![
        Particle::at_rest((80.0, 80.0), Color::Red),
        Particle::at_rest((10.0, 10.0), Color::Blue),
    ]);
    let current: Vec<Particle> = pair.current().particles().to_vec();
    assert_eq!(pair.next_mut().len(), current.len());
}

#[test]
fn test_swap_promotes_next_and_sorts() {
    let mut pair = pair_with(vec![
        Particle::at_rest((5.0, 5.0), Color::Red),
        Particle::at_rest((95.0, 95.0), Color::Blue),
    ]);

    {
        let next = pair.next_mut();
        next[0] = Particle::new((96.0, 96.0), (1.0, 0.0), Color::Red);
        next[1] = Particle::new((4.0, 4.0), (0.0, 1.0), Color::Blue);
    }

    let (current, next) = pair.swap();
    assert_eq!(current.particles()[0], Particle::new((4.0, 4.0), (0.0, 1.0), Color::Blue));
    assert_eq!(current.particles()[1], Particle::new((96.0, 96.0), (1.0, 0.0), Color::Red));
    assert_eq!(next.len(), 2);
    assert_eq!(current.cell_range(0), 0..1);
}

#[test]
fn test_swap_does_not_alias_buffers() {
    let mut pair = pair_with(vec![Particle::at_rest((50.0, 50.0), Color::Green)]);
    pair.next_mut()[0].velocity = (3.0, 3.0);
    let (_, next) = pair.swap();
    next[0].velocity = (-7.0, -7.0);
    assert_eq!(pair.current().particles()[0].velocity, (3.0, 3.0));
}

#[test]
fn test_shared_handles_see_frozen_generation() {
    let mut pair = pair_with(vec![Particle::at_rest((50.0, 50.0), Color::Green)]);
    let frozen = pair.share_current();
    pair.next_mut()[0].position = (1.0, 1.0);
    pair.swap();
    assert_eq!(frozen.particles()[0].position, (50.0, 50.0));
    assert_eq!(pair.current().particles()[0].position, (1.0, 1.0));
}

#[test]
fn test_insert_grows_both_buffers() {
    let mut pair = pair_with(Vec::new());
    assert!(pair.insert(Particle::at_rest((20.0, 20.0), Color::Cyan)));
    assert!(!pair.insert(Particle::at_rest((200.0, 20.0), Color::Cyan)));
    assert_eq!(pair.current().len(), 1);
    assert_eq!(pair.next_mut().len(), 1);
}
