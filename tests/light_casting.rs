use approx::assert_relative_eq;
use star_caster::{
    BoundarySegment, LightSource, Point, Ray, Scene, SceneConfig, StarConfig,
    create_star_boundaries,
};

#[test]
fn ray_hits_wall_straight_ahead() {
    let ray = Ray::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    let wall = BoundarySegment::from_coords(5.0, -5.0, 5.0, 5.0);
    assert_eq!(ray.intersect(&wall), Some(Point::new(5.0, 0.0)));
}

#[test]
fn ray_parallel_to_wall_misses() {
    let ray = Ray::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    let wall = BoundarySegment::from_coords(0.0, 0.0, 10.0, 0.0);
    assert_eq!(ray.intersect(&wall), None);
}

#[test]
fn ray_through_wall_endpoint_misses() {
    let ray = Ray::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    for wall in [
        BoundarySegment::from_coords(5.0, 0.0, 5.0, 5.0),
        BoundarySegment::from_coords(5.0, -5.0, 5.0, 0.0),
        BoundarySegment::from_coords(5.0, 0.0, 8.0, -3.0),
    ] {
        assert_eq!(ray.intersect(&wall), None, "{wall:?}");
    }
}

#[test]
fn star_has_two_segments_per_point_and_closes() {
    let mut walls = Vec::new();
    create_star_boundaries(&mut walls, Point::new(200.0, 200.0), 100.0, 40.0, 7);

    assert_eq!(walls.len(), 14);
    assert_eq!(walls.last().unwrap().b(), walls.first().unwrap().a());
}

#[test]
fn nearest_of_two_walls_wins() {
    let near = BoundarySegment::from_coords(3.0, -1.0, 3.0, 1.0);
    let far = BoundarySegment::from_coords(7.0, -1.0, 7.0, 1.0);
    let light = LightSource::new(Point::ZERO, 1.0).unwrap();

    let hits = light.cast_all(&[far, near]);
    let hit = hits[0].unwrap();
    assert_eq!(hit.point, Point::new(3.0, 0.0));
    assert_relative_eq!(hit.distance, 3.0);
}

#[test]
fn light_inside_star_hits_on_every_ray() {
    let center = Point::new(100.0, 100.0);
    let mut walls = Vec::new();
    create_star_boundaries(&mut walls, center, 80.0, 30.0, 5);

    let mut light = LightSource::new(Point::ZERO, 1.0).unwrap();
    // Off-center, so no ray runs exactly through a vertex.
    for pos in [
        Point::new(103.7, 98.2),
        Point::new(110.0, 95.0),
        Point::new(85.0, 112.0),
        Point::new(150.0, 101.0),
    ] {
        light.update(pos);
        let hits = light.cast_all(&walls);
        assert_eq!(hits.len(), 360);
        assert!(hits.iter().all(Option::is_some), "ray escaped from {pos:?}");
    }
}

#[test]
fn casting_twice_gives_same_hits() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    scene.advance(Point::new(321.5, 655.3));

    let first = scene.cast();
    let second = scene.cast();
    assert_eq!(first, second);
    assert_eq!(scene.light().pos(), Point::new(321.5, 655.3));
}

#[test]
fn parallel_and_sequential_scenes_agree() {
    let pointer = Point::new(700.0, 300.0);
    let mut seq = Scene::new(SceneConfig::default()).unwrap();
    let mut par = Scene::new(SceneConfig::default().parallel_cast(true)).unwrap();

    assert_eq!(seq.advance(pointer), par.advance(pointer));
}

#[test]
fn degenerate_stars_build_and_cast() {
    let config = SceneConfig::new().stars(vec![
        StarConfig::new(Point::new(300.0, 300.0), 0.0, 0.0, 5),
        StarConfig::new(Point::new(600.0, 600.0), -50.0, 20.0, 3),
        StarConfig::new(Point::new(100.0, 100.0), 40.0, 10.0, 0),
    ]);
    let mut scene = Scene::new(config).unwrap();
    assert_eq!(scene.walls().len(), 10 + 6 + 4);

    let frame = scene.advance(Point::new(500.0, 500.0));
    assert_eq!(frame.segments.len() + frame.misses, 360);
    assert!(
        frame
            .segments
            .iter()
            .all(|s| s.to.x.is_finite() && s.to.y.is_finite())
    );
}

#[test]
fn bundled_scene_file_loads() {
    let config = SceneConfig::from_toml_str(include_str!("../scenes/twin_stars.toml")).unwrap();
    let scene = Scene::new(config).unwrap();
    assert_eq!(scene.walls().len(), 10 + 16 + 4);
    assert_eq!(scene.light().ray_count(), 720);
    assert_eq!(scene.light().pos(), Point::new(600.0, 400.0));
}
