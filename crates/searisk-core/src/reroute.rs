//! Reroute orchestration: the bounded search for a safer route.
//!
//! The search is an explicit state machine: one direct request, then at most
//! `max_attempts` outer iterations, each trying at most
//! `candidates_per_attempt` hazards. Every hazard tried costs at most two
//! path-generator calls, so the worst case is
//! `1 + max_attempts * candidates_per_attempt * 2` calls.

use serde::{Deserialize, Serialize};

use crate::combine::combine;
use crate::error::{PathGenerationError, RerouteError};
use crate::generator::PathGenerator;
use crate::models::{HazardFinding, LonLat, RoutePath, SafetyVerdict, Severity};
use crate::registry::HazardRegistry;
use crate::rules::RerouteConfig;
use crate::safety::evaluate;
use crate::waypoint::WaypointPlanner;

/// Counters describing how much work a search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Outer iterations entered
    pub attempts: usize,
    /// Hazards for which a detour was tried
    pub candidates_tried: usize,
    pub generator_calls: usize,
    /// Candidates abandoned because a leg request failed
    pub leg_failures: usize,
}

/// Result of [`RerouteOrchestrator::generate_safe_route`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerouteOutcome {
    /// `None` only when the direct route could not be generated
    pub route: Option<RoutePath>,
    pub verdict: SafetyVerdict,
    pub stats: SearchStats,
}

/// Why a single detour candidate produced nothing.
#[derive(Debug)]
enum CandidateError {
    UnknownZone,
    NoWaypoint,
    Leg(PathGenerationError),
}

pub struct RerouteOrchestrator<'a, G> {
    registry: &'a HazardRegistry,
    generator: G,
    planner: WaypointPlanner,
    config: RerouteConfig,
}

impl<'a, G: PathGenerator> RerouteOrchestrator<'a, G> {
    pub fn new(registry: &'a HazardRegistry, generator: G) -> Self {
        Self::with_config(registry, generator, RerouteConfig::default())
    }

    pub fn with_config(registry: &'a HazardRegistry, generator: G, config: RerouteConfig) -> Self {
        Self {
            registry,
            generator,
            planner: WaypointPlanner::new(config.planner.clone()),
            config,
        }
    }

    pub fn config(&self) -> &RerouteConfig {
        &self.config
    }

    /// Sole entry point for callers: always yields a (route-or-none, verdict) pair.
    ///
    /// A failed direct request becomes a high-severity verdict with no route.
    pub fn generate_safe_route(
        &self,
        origin: LonLat,
        destination: LonLat,
        max_attempts: usize,
    ) -> RerouteOutcome {
        match self.try_generate_safe_route(origin, destination, max_attempts) {
            Ok(outcome) => outcome,
            Err(RerouteError::DirectPath(err)) => {
                tracing::error!("Error generating route: {}", err);
                RerouteOutcome {
                    route: None,
                    verdict: SafetyVerdict::generation_failure(&err),
                    stats: SearchStats {
                        generator_calls: 1,
                        ..SearchStats::default()
                    },
                }
            }
        }
    }

    /// Same search, reporting a failed direct request as an error.
    pub fn try_generate_safe_route(
        &self,
        origin: LonLat,
        destination: LonLat,
        max_attempts: usize,
    ) -> Result<RerouteOutcome, RerouteError> {
        let mut stats = SearchStats {
            generator_calls: 1,
            ..SearchStats::default()
        };
        let direct = self
            .generator
            .generate(origin, destination)
            .map_err(RerouteError::DirectPath)?;
        let verdict = evaluate(&direct, self.registry);

        // Low severity is accepted as-is by policy
        if verdict.is_safe || verdict.severity == Severity::Low {
            tracing::info!(severity = %verdict.severity, "Direct route accepted");
            return Ok(RerouteOutcome {
                route: Some(direct),
                verdict,
                stats,
            });
        }

        let mut best_route = direct;
        let mut best = verdict;

        for attempt in 0..max_attempts {
            stats.attempts += 1;
            let mut improved = false;

            for finding in prioritized(&best.hazards_detected, self.config.candidates_per_attempt) {
                stats.candidates_tried += 1;
                let (route, waypoint) =
                    match self.try_candidate(origin, destination, &finding.id, &mut stats) {
                        Ok(found) => found,
                        Err(CandidateError::Leg(err)) => {
                            stats.leg_failures += 1;
                            tracing::warn!(
                                attempt,
                                zone_id = %finding.id,
                                "Error generating alternative route: {}",
                                err
                            );
                            continue;
                        }
                        Err(reason) => {
                            tracing::debug!(attempt, zone_id = %finding.id, ?reason, "No detour candidate");
                            continue;
                        }
                    };

                let candidate = evaluate(&route, self.registry);
                tracing::debug!(
                    attempt,
                    zone_id = %finding.id,
                    severity = %candidate.severity,
                    hazards = candidate.total_hazards,
                    "Evaluated detour"
                );

                if !is_improvement(&candidate, &best) {
                    continue;
                }

                tracing::info!(
                    attempt,
                    from = %best.severity,
                    to = %candidate.severity,
                    lon = waypoint[0],
                    lat = waypoint[1],
                    "Accepted rerouted candidate"
                );
                best_route = route;
                best = SafetyVerdict {
                    rerouted: true,
                    waypoint_used: Some(waypoint),
                    ..candidate
                };

                if best.is_safe {
                    return Ok(RerouteOutcome {
                        route: Some(best_route),
                        verdict: best,
                        stats,
                    });
                }
                improved = true;
                break;
            }

            if !improved {
                tracing::debug!(attempt, "No candidate improved; stopping search");
                break;
            }
        }

        tracing::info!(
            severity = %best.severity,
            rerouted = best.rerouted,
            attempts = stats.attempts,
            "Reroute search finished without a safe route"
        );
        Ok(RerouteOutcome {
            route: Some(best_route),
            verdict: best,
            stats,
        })
    }

    fn try_candidate(
        &self,
        origin: LonLat,
        destination: LonLat,
        zone_id: &str,
        stats: &mut SearchStats,
    ) -> Result<(RoutePath, LonLat), CandidateError> {
        let zone = self.registry.lookup(zone_id).ok_or(CandidateError::UnknownZone)?;
        let waypoint = self
            .planner
            .plan(origin, destination, zone)
            .ok_or(CandidateError::NoWaypoint)?;

        stats.generator_calls += 1;
        let leg1 = self
            .generator
            .generate(origin, waypoint)
            .map_err(CandidateError::Leg)?;
        stats.generator_calls += 1;
        let leg2 = self
            .generator
            .generate(waypoint, destination)
            .map_err(CandidateError::Leg)?;

        Ok((combine(&leg1, &leg2, waypoint), waypoint))
    }
}

/// Top `limit` hazards by (severity, percentage affected), descending.
fn prioritized(hazards: &[HazardFinding], limit: usize) -> Vec<HazardFinding> {
    let mut sorted = hazards.to_vec();
    // Stable sort keeps evaluation order among exact ties
    sorted.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.percentage_affected.total_cmp(&a.percentage_affected))
    });
    sorted.truncate(limit);
    sorted
}

/// Safe, or strictly lower severity, or same severity with fewer hazards.
///
/// Equal severity and count is not an improvement even if less of the route
/// is affected.
pub fn is_improvement(candidate: &SafetyVerdict, best: &SafetyVerdict) -> bool {
    candidate.is_safe
        || candidate.severity < best.severity
        || (candidate.severity == best.severity && candidate.total_hazards < best.total_hazards)
}
