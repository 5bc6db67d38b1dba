//! Whole-search properties checked through the public library API.

use dirt_search::output::CollectSink;
use dirt_search::query::{Axis, Constraint, Facing, Predicate, RequestBuilder, RequestError};
use dirt_search::search::{search, Coordinate, SearchEngine, SearchVolume};
use dirt_search::world::orientation;

fn volume(min: (i32, i32, i32), max: (i32, i32, i32)) -> SearchVolume {
    SearchVolume::new(
        Coordinate::new(min.0, min.1, min.2),
        Coordinate::new(max.0, max.1, max.2),
    )
    .unwrap()
}

fn run(volume: SearchVolume, predicate: &Predicate, workers: usize) -> Vec<Coordinate> {
    let sink = CollectSink::new();
    SearchEngine::new(volume, predicate.clone(), workers)
        .run(&sink)
        .unwrap();
    sink.into_sorted()
}

#[test]
fn test_origin_matches_only_itself() {
    let request = RequestBuilder::new()
        .facing("north")
        .constraints(format!("{{dx:0,dy:0,dz:0,r:{}}}", orientation(0, 0, 0)))
        .x_range(0, 0)
        .y_range(0, 0)
        .z_range(0, 0)
        .workers(4)
        .build()
        .unwrap();

    let sink = CollectSink::new();
    let stats = SearchEngine::from_request(request).run(&sink).unwrap();
    assert_eq!(sink.into_sorted(), vec![Coordinate::new(0, 0, 0)]);
    assert_eq!(stats.matches, 1);
}

#[test]
fn test_empty_predicate_rejected_before_search() {
    let err = RequestBuilder::new()
        .facing("north")
        .rotations("")
        .x_range(0, 10)
        .y_range(0, 10)
        .z_range(0, 10)
        .build()
        .unwrap_err();
    assert_eq!(err, RequestError::EmptyPredicate);
}

#[test]
fn test_facing_normalization_equivalence() {
    let v = volume((-8, 60, -8), (8, 64, 8));
    let observed = [
        Constraint::new(0, 0, 0, 1),
        Constraint::new(1, 0, 0, 3),
    ];

    let north = Predicate::new(observed.to_vec(), Facing::North).unwrap();
    let north_matches = run(v, &north, 4);

    for facing in [Facing::East, Facing::South, Facing::West] {
        // Reading the same blocks while facing another way lowers every
        // observed rotation by that facing's offset.
        let shifted: Vec<Constraint> = observed
            .iter()
            .map(|c| Constraint {
                rotation: (c.rotation - facing.offset()).rem_euclid(4),
                ..*c
            })
            .collect();
        let turned = Predicate::new(shifted, facing).unwrap();
        assert_eq!(run(v, &turned, 3), north_matches, "facing={}", facing);
    }
}

#[test]
fn test_north_plus_one_equals_east() {
    let v = volume((0, 0, 0), (15, 3, 15));
    let rotations = [2, 0, 1];
    let bumped: Vec<i32> = rotations.iter().map(|r| (r + 1) % 4).collect();

    let north = Predicate::from_rotations(&bumped, Axis::Y, Facing::North).unwrap();
    let east = Predicate::from_rotations(&rotations, Axis::Y, Facing::East).unwrap();
    assert_eq!(north, east);
    assert_eq!(run(v, &north, 2), run(v, &east, 5));
}

#[test]
fn test_extending_max_x_only_adds_boundary_plane() {
    let predicate = Predicate::from_rotations(&[3, 1], Axis::Y, Facing::North).unwrap();
    let before = run(volume((-10, 0, -10), (10, 6, 10)), &predicate, 4);
    let after = run(volume((-10, 0, -10), (11, 6, 10)), &predicate, 4);

    for c in &before {
        assert!(after.contains(c), "lost match {:?}", c);
    }
    for c in after.iter().filter(|c| !before.contains(c)) {
        assert_eq!(c.x, 11, "new match off the boundary: {:?}", c);
    }
}

#[test]
fn test_worker_count_does_not_change_results() {
    let v = volume((-7, 62, -7), (7, 66, 7));
    let predicate = Predicate::from_rotations(&[0, 2], Axis::Z, Facing::South).unwrap();
    let baseline = run(v, &predicate, 1);
    assert!(!baseline.is_empty());
    for workers in [2, 5, 13, 64] {
        assert_eq!(run(v, &predicate, workers), baseline, "workers={}", workers);
    }
}

#[test]
fn test_known_row_pattern() {
    // Rotations along x at y=0, z=0 are 0, 1, 0, 2, 3, 1, 0, 3
    let predicate = Predicate::from_rotations(&[2, 3], Axis::X, Facing::North).unwrap();
    assert_eq!(
        run(volume((0, 0, 0), (7, 0, 0)), &predicate, 3),
        vec![Coordinate::new(3, 0, 0)]
    );
}

#[test]
fn test_lazy_stream() {
    // Rotations along y at x=0, z=0 are 0, 0, 1, 3, 0, 0, 3, 2, 1, 0
    let predicate = Predicate::from_rotations(&[0, 0], Axis::Y, Facing::North).unwrap();
    let mut found: Vec<Coordinate> = search(volume((0, 0, 0), (0, 8, 0)), predicate, 3)
        .unwrap()
        .collect();
    found.sort();
    assert_eq!(found, vec![Coordinate::new(0, 0, 0), Coordinate::new(0, 4, 0)]);
}

#[test]
fn test_dropping_stream_early_is_harmless() {
    let predicate = Predicate::from_rotations(&[0], Axis::Y, Facing::North).unwrap();
    let mut stream = search(volume((-50, 0, -50), (50, 3, 50)), predicate, 2).unwrap();
    assert!(stream.next().is_some());
    drop(stream);
}

#[test]
fn test_search_rejects_zero_workers() {
    let predicate = Predicate::from_rotations(&[0], Axis::Y, Facing::North).unwrap();
    let Err(err) = search(volume((0, 0, 0), (1, 1, 1)), predicate, 0) else {
        panic!("zero workers accepted");
    };
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}
