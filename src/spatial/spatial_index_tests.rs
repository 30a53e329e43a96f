use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::particles::{Color, Particle};
use crate::spatial::{GridGeometry, Region, SpatialIndex};

fn random_particles(rng: &mut StdRng, count: usize, bounds: (f32, f32)) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let color = Color::ALL[rng.random_range(0..Color::ALL.len())];
            Particle::new(
                (rng.random_range(0.0..bounds.0), rng.random_range(0.0..bounds.1)),
                (rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)),
                color,
            )
        })
        .collect()
}

fn assert_sorted_with_exact_offsets(index: &SpatialIndex) {
    let grid = index.grid();
    let particles = index.particles();
    for pair in particles.windows(2) {
        assert!(
            grid.cell_key(pair[0].position) <= grid.cell_key(pair[1].position),
            "particles out of cell order: {:?} before {:?}",
            pair[0].position,
            pair[1].position
        );
    }

    let offsets = index.offsets();
    assert_eq!(offsets.len(), grid.cell_count() + 1);
    assert_eq!(offsets[0], 0);
    assert_eq!(*offsets.last().unwrap(), particles.len());
    for cell in 0..grid.cell_count() {
        assert!(offsets[cell] <= offsets[cell + 1], "offsets must be non-decreasing");
        for slot in index.cell_range(cell) {
            assert_eq!(grid.cell_key(particles[slot].position), cell);
        }
    }
}

#[test]
fn test_grid_floor_semantics() {
    let grid = GridGeometry::new((200.0, 200.0), 10);
    assert_eq!(grid.cell_of((19.999, 0.0)), Some(0));
    assert_eq!(grid.cell_of((20.0, 0.0)), Some(1), "boundary belongs to the higher cell");
    assert_eq!(grid.cell_of((0.0, 20.0)), Some(10));
    assert_eq!(grid.cell_of((199.99, 199.99)), Some(99));
    assert_eq!(grid.cell_of((-0.01, 5.0)), None);
    assert_eq!(grid.cell_of((5.0, 200.0)), None);
    assert_eq!(grid.cell_of((f32::NAN, 5.0)), None);
}

#[test]
fn test_cell_key_clamps() {
    let grid = GridGeometry::new((100.0, 100.0), 4);
    assert_eq!(grid.cell_key((-5.0, -5.0)), 0);
    assert_eq!(grid.cell_key((500.0, 500.0)), 15);
    assert_eq!(grid.cell_key((f32::NAN, 99.0)), 12);
}

#[test]
fn test_cell_span_misses() {
    let grid = GridGeometry::new((100.0, 100.0), 4);
    assert!(grid.cell_span(&Region::new((-20.0, 10.0), (-1.0, 20.0))).is_none());
    assert!(grid.cell_span(&Region::new((100.0, 10.0), (120.0, 20.0))).is_none());
    assert!(grid.cell_span(&Region::around((50.0, 50.0), -1.0)).is_none(), "inverted region");
    assert!(grid.cell_span(&Region::around((50.0, 50.0), f32::NAN)).is_none());

    let (columns, rows) = grid.cell_span(&Region::new((-50.0, 30.0), (30.0, 300.0))).unwrap();
    assert_eq!(columns, 0..2);
    assert_eq!(rows, 1..4);
}

#[test]
fn test_insert_keeps_cell_order() {
    let grid = GridGeometry::new((100.0, 100.0), 5);
    let mut rng = StdRng::seed_from_u64(7);
    let mut index = SpatialIndex::new(grid);
    for particle in random_particles(&mut rng, 300, (100.0, 100.0)) {
        assert!(index.insert(particle));
    }
    assert_eq!(index.len(), 300);
    assert_sorted_with_exact_offsets(&index);
}

#[test]
fn test_insert_rejects_out_of_bounds() {
    let grid = GridGeometry::new((100.0, 100.0), 5);
    let mut index = SpatialIndex::new(grid);
    assert!(!index.insert(Particle::at_rest((100.0, 50.0), Color::Red)));
    assert!(!index.insert(Particle::at_rest((50.0, -3.0), Color::Red)));
    assert!(index.is_empty());
    assert!(index.offsets().iter().all(|&o| o == 0));
}

#[test]
fn test_insert_matches_bulk_build() {
    let grid = GridGeometry::new((300.0, 200.0), 8);
    let mut rng = StdRng::seed_from_u64(11);
    let population = random_particles(&mut rng, 500, (300.0, 200.0));

    let mut inserted = SpatialIndex::new(grid);
    for particle in &population {
        inserted.insert(*particle);
    }
    let bulk = SpatialIndex::from_particles(grid, population);

    // Both keep insertion order within a cell.
    assert_eq!(inserted.particles(), bulk.particles());
    assert_eq!(inserted.offsets(), bulk.offsets());
}

#[test]
fn test_from_particles_drops_out_of_bounds() {
    let grid = GridGeometry::new((50.0, 50.0), 5);
    let index = SpatialIndex::from_particles(
        grid,
        vec![
            Particle::at_rest((10.0, 10.0), Color::Red),
            Particle::at_rest((60.0, 10.0), Color::Red),
            Particle::at_rest((49.0, 49.0), Color::Red),
        ],
    );
    assert_eq!(index.len(), 2);
}

#[test]
fn test_sort_after_scrambling() {
    let grid = GridGeometry::new((400.0, 300.0), 12);
    let mut rng = StdRng::seed_from_u64(3);
    let mut index = SpatialIndex::from_particles(grid, random_particles(&mut rng, 1000, (400.0, 300.0)));

    let mut moved = random_particles(&mut rng, 1000, (400.0, 300.0));
    index.exchange(&mut moved);

    assert_eq!(moved.len(), 1000, "the previous generation is handed back");
    assert_sorted_with_exact_offsets(&index);
}

#[test]
fn test_range_query_completeness() {
    let bounds = (250.0, 180.0);
    let grid = GridGeometry::new(bounds, 9);
    let mut rng = StdRng::seed_from_u64(42);
    let index = SpatialIndex::from_particles(grid, random_particles(&mut rng, 800, bounds));

    for _ in 0..200 {
        let center = (rng.random_range(-20.0..270.0), rng.random_range(-20.0..200.0));
        let region = Region::around(center, rng.random_range(0.0..60.0));

        let mut covered = vec![false; index.len()];
        for range in index.ranges_intersecting(&region) {
            assert!(range.start <= range.end && range.end <= index.len());
            for slot in range {
                covered[slot] = true;
            }
        }

        for (slot, particle) in index.particles().iter().enumerate() {
            if region.contains(particle.position) {
                assert!(covered[slot], "particle at {:?} missing from {:?}", particle.position, region);
            }
        }
    }
}

#[test]
fn test_range_query_one_range_per_row() {
    let grid = GridGeometry::new((100.0, 100.0), 10);
    let index = SpatialIndex::new(grid);
    let ranges: Vec<_> = index
        .ranges_intersecting(&Region::new((15.0, 15.0), (35.0, 45.0)))
        .collect();
    assert_eq!(ranges.len(), 4, "rows 1 through 4");
    assert!(ranges.iter().all(|r| r.is_empty()));

    let outside: Vec<_> = index
        .ranges_intersecting(&Region::new((150.0, 150.0), (160.0, 160.0)))
        .collect();
    assert!(outside.is_empty());
}

#[test]
fn test_cell_range_past_grid_is_empty() {
    let grid = GridGeometry::new((10.0, 10.0), 2);
    let index = SpatialIndex::from_particles(grid, vec![Particle::at_rest((1.0, 1.0), Color::Red)]);
    assert_eq!(index.cell_range(0), 0..1);
    assert!(index.cell_range(4).is_empty());
    assert!(index.cell_range(99).is_empty());
}
