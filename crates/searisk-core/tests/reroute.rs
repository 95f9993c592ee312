//! End-to-end reroute scenarios against scripted and offline path generators.

use std::cell::{Cell, RefCell};

use searisk_core::{
    evaluate_path, is_improvement, DirectLineGenerator, HazardRegistry, HazardType, HazardZone,
    LonLat, PathGenerationError, PathGenerator, PolygonGeometry, RerouteOrchestrator, RoutePath,
    Severity, WaypointPlanner,
};

const LE_HAVRE: LonLat = [0.1071, 49.4859];
const TIANJIN: LonLat = [117.7449, 38.9868];
const HAMBURG: LonLat = [9.9937, 53.5511];

/// Wraps a generator and records every request.
struct Recording<G> {
    inner: G,
    calls: Cell<usize>,
    requests: RefCell<Vec<(LonLat, LonLat)>>,
}

impl<G> Recording<G> {
    fn new(inner: G) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl<G: PathGenerator> PathGenerator for Recording<G> {
    fn generate(&self, origin: LonLat, destination: LonLat) -> Result<RoutePath, PathGenerationError> {
        self.calls.set(self.calls.get() + 1);
        self.requests.borrow_mut().push((origin, destination));
        self.inner.generate(origin, destination)
    }
}

/// Generator backed by a closure.
struct Scripted<F>(F);

fn scripted<F>(f: F) -> Scripted<F>
where
    F: Fn(LonLat, LonLat) -> Result<RoutePath, PathGenerationError>,
{
    Scripted(f)
}

impl<F> PathGenerator for Scripted<F>
where
    F: Fn(LonLat, LonLat) -> Result<RoutePath, PathGenerationError>,
{
    fn generate(&self, origin: LonLat, destination: LonLat) -> Result<RoutePath, PathGenerationError> {
        (self.0)(origin, destination)
    }
}

fn box_zone(id: &str, severity: Severity, center: LonLat, half: f64) -> HazardZone {
    let [cx, cy] = center;
    HazardZone {
        id: id.to_string(),
        name: format!("Zone {id}"),
        hazard_type: HazardType::Piracy,
        severity,
        region: PolygonGeometry::from_ring(vec![
            [cx - half, cy - half],
            [cx + half, cy - half],
            [cx + half, cy + half],
            [cx - half, cy + half],
            [cx - half, cy - half],
        ]),
        active: true,
        reported_incidents: 7,
        last_updated: "2024-06-01".to_string(),
        description: "scenario zone".to_string(),
    }
}

fn rect_zone(id: &str, severity: Severity, min: LonLat, max: LonLat) -> HazardZone {
    let mut zone = box_zone(id, severity, [0.0, 0.0], 1.0);
    zone.region = PolygonGeometry::from_ring(vec![
        [min[0], min[1]],
        [max[0], min[1]],
        [max[0], max[1]],
        [min[0], max[1]],
        [min[0], min[1]],
    ]);
    zone
}

/// Point halfway along the offline direct line between two ports.
fn midpoint(a: LonLat, b: LonLat) -> LonLat {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

#[test]
fn le_havre_to_tianjin_reroutes_around_high_zone() {
    let zone = box_zone("aden", Severity::High, midpoint(LE_HAVRE, TIANJIN), 3.0);
    let registry = HazardRegistry::new(vec![zone.clone()]);
    let generator = Recording::new(DirectLineGenerator::default());
    let orchestrator = RerouteOrchestrator::new(&registry, &generator);

    let direct = DirectLineGenerator::default().generate(LE_HAVRE, TIANJIN).unwrap();
    let initial = searisk_core::evaluate(&direct, &registry);
    assert!(!initial.is_safe);
    assert_eq!(initial.severity, Severity::High);

    let outcome = orchestrator.generate_safe_route(LE_HAVRE, TIANJIN, 3);
    let verdict = &outcome.verdict;

    if verdict.is_safe {
        assert!(verdict.rerouted);
        let waypoint = verdict.waypoint_used.expect("waypoint recorded");
        assert!(!zone.covers_point(waypoint), "waypoint {waypoint:?} inside zone");
        let route = outcome.route.expect("route present");
        assert!(route.waypoint_route);
        assert_eq!(route.origin(), Some(LE_HAVRE));
        assert_eq!(route.destination(), Some(TIANJIN));
        assert_eq!(generator.calls.get(), 3);
        let requests = generator.requests.borrow();
        assert_eq!(requests[0], (LE_HAVRE, TIANJIN));
        assert_eq!(requests[1], (LE_HAVRE, waypoint));
        assert_eq!(requests[2], (waypoint, TIANJIN));
    } else {
        assert!(!verdict.rerouted);
        assert_eq!(verdict, &initial);
    }
    assert!(verdict.is_safe, "offline detour should clear a single box zone");
}

#[test]
fn route_far_from_hazards_needs_one_call() {
    let registry = HazardRegistry::new(vec![box_zone("south", Severity::High, [0.0, -60.0], 5.0)]);
    let generator = Recording::new(DirectLineGenerator::default());
    let outcome = RerouteOrchestrator::new(&registry, &generator).generate_safe_route(LE_HAVRE, HAMBURG, 3);

    assert!(outcome.verdict.is_safe);
    assert!(outcome.verdict.hazards_detected.is_empty());
    assert_eq!(generator.calls.get(), 1);
    assert_eq!(outcome.stats.generator_calls, 1);
}

#[test]
fn low_severity_direct_route_is_returned_unmodified() {
    let registry = HazardRegistry::new(vec![box_zone(
        "traffic",
        Severity::Low,
        midpoint(LE_HAVRE, HAMBURG),
        0.5,
    )]);
    let generator = Recording::new(DirectLineGenerator::default());
    let outcome = RerouteOrchestrator::new(&registry, &generator).generate_safe_route(LE_HAVRE, HAMBURG, 3);

    let expected = DirectLineGenerator::default().generate(LE_HAVRE, HAMBURG).unwrap();
    assert_eq!(outcome.route.as_ref(), Some(&expected));
    assert_eq!(outcome.verdict.severity, Severity::Low);
    assert!(!outcome.verdict.is_safe);
    assert!(!outcome.verdict.rerouted);
    assert_eq!(generator.calls.get(), 1);
}

#[test]
fn failed_direct_request_yields_error_verdict() {
    let registry = HazardRegistry::default();
    let generator = scripted(|_, _| Err(PathGenerationError::Unavailable("connection refused".into())));
    let outcome = RerouteOrchestrator::new(&registry, generator).generate_safe_route(LE_HAVRE, TIANJIN, 3);

    assert!(outcome.route.is_none());
    assert!(!outcome.verdict.is_safe);
    assert_eq!(outcome.verdict.severity, Severity::High);
    assert_eq!(outcome.verdict.total_hazards, 0);
    assert!(outcome
        .verdict
        .recommendation
        .starts_with("Error generating route: path generator unavailable"));
}

#[test]
fn leg_failures_are_recovered_and_original_returned() {
    let registry = HazardRegistry::new(vec![box_zone(
        "storm",
        Severity::Medium,
        midpoint(LE_HAVRE, TIANJIN),
        3.0,
    )]);
    let direct = DirectLineGenerator::default();
    let generator = Recording::new(scripted(move |origin: LonLat, destination: LonLat| {
        if origin == LE_HAVRE && destination == TIANJIN {
            direct.generate(origin, destination)
        } else {
            Err(PathGenerationError::NoRoute { origin, destination })
        }
    }));

    let outcome = RerouteOrchestrator::new(&registry, &generator).generate_safe_route(LE_HAVRE, TIANJIN, 3);

    assert_eq!(outcome.verdict.severity, Severity::Medium);
    assert!(!outcome.verdict.rerouted);
    assert!(outcome.verdict.waypoint_used.is_none());
    assert!(!outcome.route.unwrap().waypoint_route);
    // Direct request + first leg of the single candidate, then the loop stops
    assert_eq!(generator.calls.get(), 2);
    assert_eq!(outcome.stats.leg_failures, 1);
    assert_eq!(outcome.stats.attempts, 1);
}

#[test]
fn generator_calls_stay_within_bound() {
    // The generator ignores the waypoint and always returns the same hazardous
    // line, so no candidate ever improves.
    let zones: Vec<_> = (0..4)
        .map(|i| box_zone(&format!("z{i}"), Severity::High, [10.0 + 20.0 * i as f64, 0.0], 2.0))
        .collect();
    let registry = HazardRegistry::new(zones);
    let line = RoutePath::new(vec![[0.0, 0.0], [80.0, 0.0]], 4800.0, 200.0);
    let generator = Recording::new(scripted(move |_, _| Ok(line.clone())));

    let max_attempts = 3;
    let outcome =
        RerouteOrchestrator::new(&registry, &generator).generate_safe_route([0.0, 0.0], [80.0, 0.0], max_attempts);

    assert!(generator.calls.get() <= 1 + max_attempts * 3 * 2);
    // No improvement in the first iteration ends the search early
    assert_eq!(generator.calls.get(), 1 + 3 * 2);
    assert_eq!(outcome.stats.attempts, 1);
    assert_eq!(outcome.stats.candidates_tried, 3);
    assert!(!outcome.verdict.rerouted);
    assert_eq!(outcome.verdict.total_hazards, 4);
}

#[test]
fn zero_attempts_returns_direct_verdict() {
    let registry = HazardRegistry::new(vec![box_zone("z", Severity::High, [5.0, 0.0], 1.0)]);
    let generator = Recording::new(DirectLineGenerator::default());
    let outcome =
        RerouteOrchestrator::new(&registry, &generator).generate_safe_route([0.0, 0.0], [10.0, 0.0], 0);

    assert_eq!(generator.calls.get(), 1);
    assert_eq!(outcome.verdict.severity, Severity::High);
    assert!(!outcome.verdict.rerouted);
}

#[test]
fn accepted_candidates_never_worsen_severity() {
    let registry = HazardRegistry::new(vec![
        box_zone("high", Severity::High, [20.0, 0.0], 2.0),
        box_zone("medium", Severity::Medium, [40.0, 0.0], 2.0),
        box_zone("ring-north", Severity::Medium, [20.0, 6.0], 1.5),
    ]);
    let generator = DirectLineGenerator::default();
    let direct = generator.generate([0.0, 0.0], [60.0, 0.0]).unwrap();
    let initial = searisk_core::evaluate(&direct, &registry);

    let outcome = RerouteOrchestrator::new(&registry, &generator).generate_safe_route([0.0, 0.0], [60.0, 0.0], 3);

    assert!(outcome.verdict.severity <= initial.severity);
    if outcome.verdict.rerouted {
        assert!(is_improvement(&outcome.verdict, &initial));
    } else {
        assert_eq!(outcome.verdict, initial);
    }
}

#[test]
fn partial_improvement_starts_next_iteration_from_new_hazards() {
    let origin: LonLat = [0.0, 0.0];
    let destination: LonLat = [40.0, 0.0];
    // On the direct line: a high zone mid-way and a small medium one near the origin.
    let storm = rect_zone("storm", Severity::High, [18.0, -2.0], [22.0, 2.0]);
    let shoal = rect_zone("shoal", Severity::Medium, [9.5, -0.5], [10.5, 0.5]);
    // Wide medium zone sitting where the detour around the storm goes.
    let traffic = rect_zone("traffic", Severity::Medium, [17.0, 4.2], [23.0, 6.2]);
    let registry = HazardRegistry::new(vec![storm.clone(), shoal, traffic.clone()]);

    let planner = WaypointPlanner::default();
    let around_storm = planner.plan(origin, destination, &storm).unwrap();
    let around_traffic = planner.plan(origin, destination, &traffic).unwrap();

    // Straight two-point legs, so each candidate is exactly origin -> waypoint -> destination.
    let generator = Recording::new(scripted(|a: LonLat, b: LonLat| Ok(RoutePath::new(vec![a, b], 10.0, 1.0))));
    let outcome =
        RerouteOrchestrator::new(&registry, &generator).generate_safe_route(origin, destination, 3);

    let direct = evaluate_path(&[origin, destination], &registry);
    let first = evaluate_path(&[origin, around_storm, destination], &registry);
    let second = evaluate_path(&[origin, around_traffic, destination], &registry);
    assert_eq!(direct.severity, Severity::High);
    assert_eq!(direct.total_hazards, 2);
    assert_eq!(first.severity, Severity::Medium);
    assert_eq!(first.hazards_detected[0].id, "traffic");
    assert!(second.is_safe);
    let accepted = [direct.severity, first.severity, second.severity];
    assert!(accepted.windows(2).all(|pair| pair[1] <= pair[0]));

    assert!(outcome.verdict.is_safe);
    assert!(outcome.verdict.rerouted);
    assert_eq!(outcome.verdict.waypoint_used, Some(around_traffic));
    let route = outcome.route.expect("route present");
    assert_eq!(route.coordinates, vec![origin, around_traffic, destination]);
    assert_eq!(route.waypoint_used, Some(around_traffic));

    // The storm detour is accepted without trying the shoal, then the search
    // moves on to the traffic zone it introduced.
    assert_eq!(outcome.stats.attempts, 2);
    assert_eq!(outcome.stats.candidates_tried, 2);
    assert_eq!(outcome.stats.generator_calls, 5);
    assert_eq!(
        *generator.requests.borrow(),
        vec![
            (origin, destination),
            (origin, around_storm),
            (around_storm, destination),
            (origin, around_traffic),
            (around_traffic, destination),
        ]
    );
}
