//! Shared application state.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use searisk_client::HttpPathGenerator;
use searisk_core::{
    DirectLineGenerator, HazardRegistry, HazardSourceError, HazardStore, PathGenerationError,
    PathGenerator, RerouteConfig,
};

use crate::config::Config;

/// Which path generator each request builds.
///
/// The HTTP generator wraps a blocking client, so only its settings live
/// here; the client itself is created on the blocking worker.
#[derive(Debug, Clone)]
pub enum GeneratorSettings {
    Direct(DirectLineGenerator),
    Http { base_url: String, timeout: Duration },
}

pub struct AppState {
    hazards: HazardStore,
    hazards_file: PathBuf,
    generator: GeneratorSettings,
    reroute: RerouteConfig,
}

impl AppState {
    /// Load the configured hazard file (tolerantly) and pick a generator.
    pub fn new(config: &Config) -> Self {
        let registry = HazardRegistry::load(&config.hazards_file);
        tracing::info!(
            "Loaded {} hazard zone(s) from {}",
            registry.len(),
            config.hazards_file.display()
        );
        Self::with_registry(registry, config)
    }

    pub fn with_registry(registry: HazardRegistry, config: &Config) -> Self {
        let generator = match &config.router_url {
            Some(base_url) => GeneratorSettings::Http {
                base_url: base_url.clone(),
                timeout: config.router_timeout,
            },
            None => GeneratorSettings::Direct(DirectLineGenerator::default()),
        };
        Self {
            hazards: HazardStore::new(registry),
            hazards_file: config.hazards_file.clone(),
            generator,
            reroute: config.reroute.clone(),
        }
    }

    pub fn hazards(&self) -> Arc<HazardRegistry> {
        self.hazards.snapshot()
    }

    pub fn hazards_file(&self) -> &Path {
        &self.hazards_file
    }

    /// Re-read the hazard file and swap it in.
    ///
    /// Blocking. A missing or malformed file leaves the current snapshot
    /// in place.
    pub fn reload_hazards(&self) -> Result<Arc<HazardRegistry>, HazardSourceError> {
        let registry = HazardRegistry::try_load(&self.hazards_file)?;
        self.hazards.replace(registry);
        Ok(self.hazards.snapshot())
    }

    pub fn reroute_config(&self) -> &RerouteConfig {
        &self.reroute
    }

    pub fn generator_settings(&self) -> &GeneratorSettings {
        &self.generator
    }

    /// Build the configured generator. Call from a blocking thread.
    pub fn build_generator(
        &self,
        request_id: Option<String>,
    ) -> Result<Box<dyn PathGenerator>, PathGenerationError> {
        match &self.generator {
            GeneratorSettings::Direct(direct) => Ok(Box::new(direct.clone())),
            GeneratorSettings::Http { base_url, timeout } => {
                let mut client = HttpPathGenerator::new(base_url.clone(), *timeout)?;
                client.set_request_id(request_id);
                Ok(Box::new(client))
            }
        }
    }
}
