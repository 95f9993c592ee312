//! Hazard registry: immutable snapshot of hazard-zone definitions.
//!
//! A registry is loaded once and never mutated. Reloading builds a new
//! registry and swaps it into a [`HazardStore`] so readers holding the old
//! snapshot keep a consistent view.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HazardSourceError;
use crate::models::{HazardZone, Severity};

/// On-disk layout of a hazard source. Zones stay untyped until each one is
/// decoded on its own, so one bad record cannot take the whole file down.
#[derive(Debug, Deserialize)]
struct HazardSource {
    #[serde(default)]
    hazard_zones: Vec<serde_json::Value>,
}

/// Read-only projection of the registry for dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardSummary {
    /// Number of zones in the registry, active or not
    pub total_hazards: usize,
    pub total_active_hazards: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_type: BTreeMap<String, usize>,
    /// Most recent `last_updated` among active zones, "Unknown" if none
    pub last_updated: String,
}

#[derive(Debug, Clone)]
pub struct HazardRegistry {
    zones: Vec<HazardZone>,
    index: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
}

impl Default for HazardRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl HazardRegistry {
    /// Build a registry from already-parsed zones.
    ///
    /// Zones failing validation, and later duplicates of an id, are skipped
    /// with a warning.
    pub fn new(zones: Vec<HazardZone>) -> Self {
        let mut kept: Vec<HazardZone> = Vec::with_capacity(zones.len());
        let mut index = HashMap::with_capacity(zones.len());

        for zone in zones {
            let errors = zone.validate();
            if !errors.is_empty() {
                tracing::warn!(
                    zone_id = %zone.id,
                    "Skipping invalid hazard zone '{}': {}",
                    zone.name,
                    errors.join("; ")
                );
                continue;
            }
            if index.contains_key(&zone.id) {
                tracing::warn!(zone_id = %zone.id, "Skipping duplicate hazard zone id");
                continue;
            }
            index.insert(zone.id.clone(), kept.len());
            kept.push(zone);
        }

        Self {
            zones: kept,
            index,
            loaded_at: Utc::now(),
        }
    }

    /// Load zones from a JSON file.
    ///
    /// A missing or malformed source yields an empty registry and a warning;
    /// evaluation keeps working (every route is then safe).
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(registry) => {
                tracing::info!(
                    path = %path.display(),
                    zones = registry.len(),
                    "Loaded hazard zones"
                );
                registry
            }
            Err(err) => {
                tracing::warn!("{}. No hazards loaded.", err);
                Self::default()
            }
        }
    }

    /// Strict variant of [`HazardRegistry::load`] that reports why loading failed.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, HazardSourceError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                HazardSourceError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                HazardSourceError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_json_str(&raw)
    }

    /// Parse a hazard source.
    ///
    /// Fails only when the document itself is not valid JSON or lacks the
    /// `hazard_zones` array; zones that do not decode are skipped with a warning.
    pub fn from_json_str(raw: &str) -> Result<Self, HazardSourceError> {
        let source: HazardSource = serde_json::from_str(raw)?;
        let zones = source
            .hazard_zones
            .into_iter()
            .enumerate()
            .filter_map(|(position, value)| {
                let zone_id = value
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("<missing id>")
                    .to_string();
                match serde_json::from_value::<HazardZone>(value) {
                    Ok(zone) => Some(zone),
                    Err(err) => {
                        tracing::warn!(
                            zone_id = %zone_id,
                            position,
                            "Skipping undecodable hazard zone: {}",
                            err
                        );
                        None
                    }
                }
            })
            .collect();
        Ok(Self::new(zones))
    }

    pub fn zones(&self) -> &[HazardZone] {
        &self.zones
    }

    pub fn active_zones(&self) -> impl Iterator<Item = &HazardZone> {
        self.zones.iter().filter(|zone| zone.active)
    }

    pub fn lookup(&self, id: &str) -> Option<&HazardZone> {
        self.index.get(id).and_then(|&idx| self.zones.get(idx))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn summary(&self) -> HazardSummary {
        let mut by_severity: BTreeMap<Severity, usize> =
            [(Severity::Low, 0), (Severity::Medium, 0), (Severity::High, 0)]
                .into_iter()
                .collect();
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut latest: Option<&str> = None;
        let mut active = 0;

        for zone in self.active_zones() {
            active += 1;
            *by_severity.entry(zone.severity).or_insert(0) += 1;
            *by_type.entry(zone.hazard_type.to_string()).or_insert(0) += 1;

            if zone.last_updated == "Unknown" {
                continue;
            }
            latest = match latest {
                Some(current) if !is_more_recent(&zone.last_updated, current) => Some(current),
                _ => Some(zone.last_updated.as_str()),
            };
        }

        HazardSummary {
            total_hazards: self.zones.len(),
            total_active_hazards: active,
            by_severity,
            by_type,
            last_updated: latest.unwrap_or("Unknown").to_string(),
        }
    }
}

/// Compare timestamps chronologically when both parse, lexically otherwise.
fn is_more_recent(candidate: &str, current: &str) -> bool {
    match (parse_timestamp(candidate), parse_timestamp(current)) {
        (Some(a), Some(b)) => a > b,
        _ => candidate > current,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(ts.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

/// Shared holder of the current registry snapshot.
#[derive(Debug, Default)]
pub struct HazardStore {
    current: RwLock<Arc<HazardRegistry>>,
}

impl HazardStore {
    pub fn new(registry: HazardRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Current snapshot; stays valid even if a reload happens meanwhile.
    pub fn snapshot(&self) -> Arc<HazardRegistry> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Install a new registry, returning the previous snapshot.
    pub fn replace(&self, registry: HazardRegistry) -> Arc<HazardRegistry> {
        let next = Arc::new(registry);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }

    /// Reload from a file with the tolerant loader and swap it in.
    pub fn reload(&self, path: impl AsRef<Path>) -> Arc<HazardRegistry> {
        self.replace(HazardRegistry::load(path));
        self.snapshot()
    }
}
