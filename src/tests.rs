#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use crate::automaton::seed::{self, with_alive};
    use crate::automaton::{diff, transition, Cell, Coordinate, Extents, Generation, Rules, SeedConfig};
    use crate::config::SimulationConfig;
    use crate::simulation::Simulation;

    fn noisy(extents: Extents, seed: u64, density: f64) -> Generation {
        let mut rng = StdRng::seed_from_u64(seed);
        Generation::from_fn(extents, |_| rng.random_bool(density))
    }

    fn as_set(g: &Generation) -> HashSet<Cell> {
        g.cells().iter().copied().collect()
    }

    #[test]
    fn test_coverage_invariant() {
        for (extents, seed) in [
            (Extents::new(3, 3, 3).unwrap(), 1),
            (Extents::new(7, 4, 9).unwrap(), 2),
            (Extents::new(1, 1, 12).unwrap(), 3),
        ] {
            let g = noisy(extents, seed, 0.3);
            let next = transition(&g, Rules::default()).unwrap();
            assert_eq!(next.len(), g.len());
            assert!(next.validate(extents).is_ok());

            let before: HashSet<_> = g.cells().iter().map(|c| c.coordinate).collect();
            let after: HashSet<_> = next.cells().iter().map(|c| c.coordinate).collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_order_independence() {
        let extents = Extents::new(9, 9, 9).unwrap();
        let g = noisy(extents, 77, 0.25);

        let mut shuffled = g.clone().into_cells();
        shuffled.shuffle(&mut StdRng::seed_from_u64(5));
        let shuffled = Generation::from_cells(shuffled);

        let a = transition(&g, Rules::default()).unwrap();
        let b = transition(&shuffled, Rules::default()).unwrap();
        assert_eq!(as_set(&a), as_set(&b));
    }

    #[test]
    fn test_boundary_does_not_wrap() {
        // Opposite face fully alive; a dead cell on the near face must not see it.
        let extents = Extents::new(5, 5, 5).unwrap();
        let (min, max) = (extents.min(), extents.max());
        let g = Generation::from_fn(extents, |c| c.x == max.x);

        let next = transition(&g, Rules::default()).unwrap();
        for cell in next.cells().iter().filter(|c| c.coordinate.x == min.x) {
            assert_eq!(cell.alive_neighbors, Some(0), "cell {}", cell.coordinate);
            assert!(!cell.alive);
        }
    }

    #[test]
    fn test_corner_counts_only_in_region_neighbors() {
        let extents = Extents::new(4, 4, 4).unwrap();
        let g = Generation::from_fn(extents, |_| true);
        let next = transition(&g, Rules::new(2, 26).unwrap()).unwrap();

        let corner = next.get(extents.max()).unwrap();
        assert_eq!(corner.alive_neighbors, Some(7));
        let face_center = next.get(Coordinate::new(0, 0, extents.max().z)).unwrap();
        assert_eq!(face_center.alive_neighbors, Some(17));
    }

    #[test]
    fn test_face_cross_center_and_faces_die() {
        // 3x3x3, the 6 face neighbours of the center alive.
        let extents = Extents::new(3, 3, 3).unwrap();
        let faces = [
            Coordinate::new(1, 0, 0),
            Coordinate::new(-1, 0, 0),
            Coordinate::new(0, 1, 0),
            Coordinate::new(0, -1, 0),
            Coordinate::new(0, 0, 1),
            Coordinate::new(0, 0, -1),
        ];
        let g = with_alive(extents, &faces);
        let next = transition(&g, Rules::default()).unwrap();

        // Center sees 6 > upper, so no birth.
        let center = next.get(Coordinate::new(0, 0, 0)).unwrap();
        assert_eq!(center.alive_neighbors, Some(6));
        assert!(!center.alive);

        // Each face cell sees the 4 faces it touches diagonally, too many to survive.
        for c in faces {
            let cell = next.get(c).unwrap();
            assert_eq!(cell.alive_neighbors, Some(4));
            assert!(!cell.alive, "face cell {c} survived");
        }

        // Corners touch exactly 3 faces and are born; edges touch 4 and are not.
        for cell in next.cells() {
            let c = cell.coordinate;
            let is_corner = c.x != 0 && c.y != 0 && c.z != 0;
            assert_eq!(cell.alive, is_corner, "cell {c}");
        }
        assert_eq!(next.alive_count(), 8);
    }

    #[test]
    fn test_dead_state_is_fixed_point() {
        let extents = Extents::new(6, 5, 4).unwrap();
        let dead = Generation::dead(extents);

        let once = transition(&dead, Rules::default()).unwrap();
        let twice = transition(&once, Rules::default()).unwrap();
        assert!(once.is_extinct());
        assert_eq!(
            once.cells().iter().map(|c| (c.coordinate, c.alive)).collect::<Vec<_>>(),
            twice.cells().iter().map(|c| (c.coordinate, c.alive)).collect::<Vec<_>>()
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_diff_matches_transition() {
        let extents = Extents::new(8, 8, 8).unwrap();
        let g = noisy(extents, 9, 0.2);
        let next = transition(&g, Rules::default()).unwrap();
        let d = diff(&g, &next).unwrap();

        assert_eq!(
            g.alive_count() + d.born.len() - d.died.len(),
            next.alive_count()
        );
        for c in &d.born {
            assert!(!g.get(*c).unwrap().alive);
            assert!(next.get(*c).unwrap().alive);
        }
    }

    #[test]
    fn test_simulation_runs_many_generations() {
        let config = SimulationConfig {
            extents: Extents::new(12, 12, 12).unwrap(),
            seed: SeedConfig {
                radius: 4.0,
                probability: 0.3,
                rng_seed: Some(2024),
            },
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(&config).unwrap();

        let mut reference = sim.generation().clone();
        for _ in 0..5 {
            if sim.generation().is_extinct() {
                break;
            }
            assert!(sim.step_blocking(Duration::from_secs(10)).unwrap());
            reference = transition(&reference, config.rules).unwrap();
            assert_eq!(sim.generation(), &reference);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let extents = Extents::new(10, 10, 10).unwrap();
        let config = SeedConfig {
            probability: 0.4,
            ..SeedConfig::default()
        };
        let a = seed::random(extents, &config, &mut StdRng::seed_from_u64(3));
        let b = seed::random(extents, &config, &mut StdRng::seed_from_u64(3));

        let mut ga = a;
        let mut gb = b;
        for _ in 0..3 {
            ga = transition(&ga, Rules::default()).unwrap();
            gb = transition(&gb, Rules::default()).unwrap();
        }
        assert_eq!(ga, gb);
    }
}
