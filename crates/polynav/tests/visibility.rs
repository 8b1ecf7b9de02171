use polynav::{
    is_path_clear, nearest_point_on_mesh, ObstacleHole, OpenSurface, PlannerConfig,
    SurfaceProbe, Vec2, VisibilityGraph, WalkableRegion, GOAL_NODE, START_NODE,
};

fn l_shape() -> WalkableRegion {
    WalkableRegion::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 4.0),
        Vec2::new(4.0, 4.0),
        Vec2::new(4.0, 10.0),
        Vec2::new(0.0, 10.0),
    ])
    .expect("valid outline")
}

fn square(min: f32, max: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(min, min),
        Vec2::new(max, min),
        Vec2::new(max, max),
        Vec2::new(min, max),
    ]
}

#[test]
fn line_inside_region_is_clear() {
    let region = l_shape();
    let config = PlannerConfig::default();
    assert!(is_path_clear(&region, Vec2::new(1.0, 1.0), Vec2::new(9.0, 2.0), &config));
    assert!(is_path_clear(&region, Vec2::new(2.0, 8.0), Vec2::new(4.0, 4.0), &config));
}

#[test]
fn line_across_missing_corner_is_blocked() {
    let region = l_shape();
    let config = PlannerConfig::default();
    let a = Vec2::new(2.0, 8.0);
    let b = Vec2::new(8.0, 2.0);
    assert!(!is_path_clear(&region, a, b, &config));
    assert!(!is_path_clear(&region, b, a, &config));
}

#[test]
fn line_along_an_outline_edge_is_clear() {
    let region = l_shape();
    let config = PlannerConfig::default();
    assert!(is_path_clear(&region, Vec2::new(10.0, 4.0), Vec2::new(4.0, 4.0), &config));
    assert!(is_path_clear(&region, Vec2::new(4.0, 4.0), Vec2::new(4.0, 10.0), &config));
}

#[test]
fn probe_radius_scales_with_segment_length() {
    let mut region = WalkableRegion::new(square(0.0, 10.0)).expect("boundary");
    // A wall 0.2 wide.
    region
        .add_outline(vec![
            Vec2::new(4.9, 1.0),
            Vec2::new(5.1, 1.0),
            Vec2::new(5.1, 9.0),
            Vec2::new(4.9, 9.0),
        ])
        .expect("hole");
    let config = PlannerConfig::default();

    assert!(!region.contains(Vec2::new(5.0, 5.0)));

    // Short segment: probe radius 0.08 cannot reach past the wall's 0.1 half-width.
    assert!(!is_path_clear(&region, Vec2::new(3.0, 5.0), Vec2::new(7.0, 5.0), &config));
    // Long segment: probe radius 0.18 straddles the wall, which the sampling accepts.
    assert!(is_path_clear(&region, Vec2::new(0.5, 5.0), Vec2::new(9.5, 5.0), &config));
}

#[test]
fn degenerate_segment_on_the_outline_is_clear() {
    let region = l_shape();
    let p = Vec2::new(10.0, 2.0);
    assert!(is_path_clear(&region, p, p, &PlannerConfig::default()));
}

#[test]
fn open_surface_never_blocks() {
    let config = PlannerConfig::default();
    assert!(is_path_clear(
        &OpenSurface,
        Vec2::new(-100.0, 3.0),
        Vec2::new(250.0, -40.0),
        &config
    ));
}

#[test]
fn empty_region_blocks_everything() {
    let region = WalkableRegion::empty();
    assert!(!region.overlaps_disk(Vec2::ZERO, 100.0));
    assert!(!is_path_clear(
        &region,
        Vec2::new(0.0, 0.0),
        Vec2::new(5.0, 0.0),
        &PlannerConfig::default()
    ));
}

#[test]
fn nearest_point_keeps_points_already_on_the_mesh() {
    let region = l_shape();
    let config = PlannerConfig::default();
    let inside = Vec2::new(2.0, 2.0);
    assert_eq!(nearest_point_on_mesh(&region, &region, inside, &config), inside);

    let on_edge = Vec2::new(10.0, 1.0);
    assert_eq!(nearest_point_on_mesh(&region, &region, on_edge, &config), on_edge);
}

#[test]
fn nearest_point_projects_onto_sampled_edge_points() {
    let region = l_shape();
    let config = PlannerConfig::default();

    let q = nearest_point_on_mesh(&region, &region, Vec2::new(15.0, 2.0), &config);
    assert_eq!(q, Vec2::new(10.0, 2.0));

    // Equidistant from two edges: the edge declared first wins.
    let q = nearest_point_on_mesh(&region, &region, Vec2::new(7.0, 7.0), &config);
    assert_eq!(q, Vec2::new(7.0, 4.0));
}

#[test]
fn nearest_point_on_empty_region_is_identity() {
    let region = WalkableRegion::empty();
    let p = Vec2::new(3.0, -2.0);
    assert_eq!(
        nearest_point_on_mesh(&region, &region, p, &PlannerConfig::default()),
        p
    );
}

#[test]
fn graph_puts_query_ends_first_and_drops_duplicates() {
    let region = l_shape();
    let start = Vec2::new(0.0, 0.0); // coincides with a region vertex
    let goal = Vec2::new(3.0, 9.0);
    let graph = VisibilityGraph::build(
        region.vertices(),
        start,
        goal,
        &region,
        &PlannerConfig::default(),
    );

    assert_eq!(graph.nodes()[START_NODE], start);
    assert_eq!(graph.nodes()[GOAL_NODE], goal);
    assert_eq!(graph.node_count(), 2 + region.vertex_count() - 1);
    assert_eq!(
        &graph.nodes()[2..],
        &[
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 4.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(4.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    );
}

#[test]
fn graph_weights_are_symmetric_distances_without_self_edges() {
    let region = l_shape();
    let graph = VisibilityGraph::build(
        region.vertices(),
        Vec2::new(2.0, 8.0),
        Vec2::new(8.0, 2.0),
        &region,
        &PlannerConfig::default(),
    );
    let weights = graph.weights();
    let nodes = graph.nodes();

    assert_eq!(weights.weight(START_NODE, GOAL_NODE), None);
    for i in 0..graph.node_count() {
        assert_eq!(weights.weight(i, i), None);
        for j in 0..graph.node_count() {
            assert_eq!(weights.weight(i, j), weights.weight(j, i));
            if let Some(w) = weights.weight(i, j) {
                assert_eq!(w, nodes[i].distance(nodes[j]));
            }
        }
    }

    // The reflex corner sees both query ends.
    let corner = nodes
        .iter()
        .position(|p| *p == Vec2::new(4.0, 4.0))
        .expect("corner node");
    assert!(weights.weight(START_NODE, corner).is_some());
    assert!(weights.weight(corner, GOAL_NODE).is_some());

    assert_eq!(graph.edges().count(), weights.edge_count());
    assert!(graph.edges().all(|(i, j, _)| i < j));
}

#[test]
fn holes_contribute_vertices_after_the_boundary() {
    let region = WalkableRegion::new(square(0.0, 10.0)).expect("boundary");
    let hole = ObstacleHole::rect(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0));
    let snapshot = region.with_holes([&hole]);

    assert_eq!(region.vertex_count(), 4);
    assert_eq!(snapshot.vertex_count(), 8);
    assert_eq!(snapshot.vertices().nth(4), Some(Vec2::new(4.0, 4.0)));
    assert!(!snapshot.contains(Vec2::new(5.0, 5.0)));
    assert!(region.contains(Vec2::new(5.0, 5.0)));
}

fn corridor() -> WalkableRegion {
    WalkableRegion::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(20.0, 0.0),
        Vec2::new(20.0, 4.0),
        Vec2::new(0.0, 4.0),
    ])
    .expect("corridor")
}

#[test]
fn hole_crossing_the_boundary_only_removes_ground() {
    let region = corridor();
    // Taller than the corridor: pokes out past both long walls.
    let hole = ObstacleHole::rect(Vec2::new(10.0, 2.0), Vec2::new(1.0, 3.0));
    let snapshot = region.with_holes([&hole]);
    let config = PlannerConfig::default();

    assert!(!snapshot.contains(Vec2::new(10.0, 4.5)));
    assert!(!snapshot.contains(Vec2::new(10.0, -0.5)));
    assert!(!snapshot.contains(Vec2::new(10.0, 2.0)));
    // Boundary stretches under the hole are gone too.
    assert!(!snapshot.contains(Vec2::new(10.0, 0.0)));
    assert!(!snapshot.overlaps_disk(Vec2::new(10.0, 0.0), 0.5));
    // The hole's own edge inside the boundary is still walkable.
    assert!(snapshot.contains(Vec2::new(9.0, 2.0)));
    assert!(snapshot.contains(Vec2::new(5.0, 2.0)));

    assert!(!is_path_clear(&snapshot, Vec2::new(2.0, 2.0), Vec2::new(18.0, 2.0), &config));
    assert!(!is_path_clear(&snapshot, Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), &config));
    assert!(!is_path_clear(&snapshot, Vec2::new(0.0, 4.0), Vec2::new(20.0, 4.0), &config));
}

#[test]
fn overlapping_holes_do_not_cancel_out() {
    let region = WalkableRegion::new(square(0.0, 10.0)).expect("boundary");
    let a = ObstacleHole::rect(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0));
    let b = ObstacleHole::rect(Vec2::new(5.5, 5.0), Vec2::new(1.0, 1.0));
    let config = PlannerConfig::default();

    let stacked = region.with_holes([&a, &a]);
    assert!(!stacked.contains(Vec2::new(5.0, 5.0)));
    assert!(!is_path_clear(&stacked, Vec2::new(2.0, 5.0), Vec2::new(8.0, 5.0), &config));

    let overlapping = region.with_holes([&a, &b]);
    assert!(!overlapping.contains(Vec2::new(5.2, 5.0)));
    assert!(!overlapping.contains(Vec2::new(4.2, 5.0)));
    assert!(!overlapping.contains(Vec2::new(6.4, 5.0)));
    // On one hole's edge but inside the other.
    assert!(!overlapping.contains(Vec2::new(4.5, 5.0)));
    assert!(overlapping.contains(Vec2::new(3.0, 5.0)));
    assert!(!is_path_clear(&overlapping, Vec2::new(2.0, 5.0), Vec2::new(8.0, 5.0), &config));
}
