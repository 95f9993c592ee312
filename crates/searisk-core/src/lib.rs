pub mod combine;
pub mod error;
pub mod generator;
pub mod geojson;
pub mod models;
pub mod registry;
pub mod report;
pub mod reroute;
pub mod rules;
pub mod safety;
pub mod spatial;
pub mod waypoint;

pub use combine::combine;
pub use error::{HazardSourceError, PathGenerationError, RerouteError};
pub use generator::{DirectLineGenerator, PathGenerator};
pub use geojson::{export_feature, RouteFeature};
pub use models::{
    HazardFinding, HazardType, HazardZone, LonLat, PolygonGeometry, PortInfo, RoutePath,
    SafetyVerdict, Severity,
};
pub use registry::{HazardRegistry, HazardStore, HazardSummary};
pub use report::format_safety_report;
pub use reroute::{is_improvement, RerouteOrchestrator, RerouteOutcome, SearchStats};
pub use rules::{PlannerConfig, RerouteConfig};
pub use safety::{evaluate, evaluate_path};
pub use spatial::haversine_distance;
pub use waypoint::WaypointPlanner;
