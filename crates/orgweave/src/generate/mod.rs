//! Layered synthetic generation pipeline.
//!
//! The [`Orchestrator`] drives the fixed 12-layer generator order, then
//! the relationship [`weaver`], then the [`quality`] assessor. Layer
//! L(n) entities always exist before any L(m > n) generator runs, and
//! the weaver only runs after every layer completes.

pub mod generators;
pub mod quality;
pub mod templates;
pub mod weaver;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{create_engine, GraphEngine};
use crate::error::Result;
use crate::model::{Entity, EntityKind};
use crate::scaling::{scaled_count, OrgProfile};

pub use quality::{assess, QualityReport};
pub use weaver::Weaver;

/// Shared state threaded through the generators and the weaver.
///
/// Generators get the seeded RNG, the profile, and read access to
/// already-generated entities through the engine; cross-layer decisions
/// that are not expressible as graph structure (people-to-department
/// assignment, role rosters per department) ride along explicitly.
pub struct GenerationContext {
    pub profile: OrgProfile,
    pub rng: StdRng,
    pub engine: Box<dyn GraphEngine>,
    /// `(person_id, department_id)` pairs from headcount-proportional
    /// distribution; consumed by the weaver.
    pub person_assignments: Vec<(String, String)>,
    /// Role ids generated per department id; consumed by the weaver.
    pub department_roles: HashMap<String, Vec<String>>,
}

impl GenerationContext {
    pub fn new(profile: OrgProfile, engine: Box<dyn GraphEngine>) -> Result<Self> {
        profile.validate()?;
        let rng = StdRng::seed_from_u64(profile.seed);
        Ok(Self {
            profile,
            rng,
            engine,
            person_assignments: Vec::new(),
            department_roles: HashMap::new(),
        })
    }

    /// Deterministic v4-format id drawn from the seeded RNG, so the same
    /// seed reproduces the same graph ids.
    pub fn new_id(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }

    /// Scaled count for a non-derived kind.
    pub fn count(&mut self, kind: EntityKind) -> Result<u32> {
        scaled_count(&self.profile, kind, &mut self.rng)
    }

    /// Draw one template from a table.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Bernoulli draw.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform draw from an inclusive range.
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }

    pub fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }

    /// Ids of every generated entity of a kind, insertion-ordered.
    #[must_use]
    pub fn ids_of(&self, kind: EntityKind) -> Vec<String> {
        self.engine
            .list_entities(Some(kind), None)
            .into_iter()
            .map(|e| e.id.clone())
            .collect()
    }

    /// Bulk-insert a generator's output through the engine.
    pub fn add_all(&mut self, entities: Vec<Entity>) -> Result<()> {
        if entities.is_empty() {
            return Ok(());
        }
        self.engine.add_entities_bulk(entities)?;
        Ok(())
    }
}

/// One step of the fixed pipeline.
pub type GeneratorFn = fn(&mut GenerationContext) -> Result<()>;

/// The fixed 12-layer generation order. Each entry is
/// `(layer, kind label, generator)`.
pub const GENERATION_ORDER: &[(u8, &str, GeneratorFn)] = &[
    (0, "location", generators::locations),
    (1, "policy", generators::policies),
    (1, "regulation", generators::regulations),
    (1, "control", generators::controls),
    (1, "risk", generators::risks),
    (1, "threat", generators::threats),
    (1, "vulnerability", generators::vulnerabilities),
    (1, "threat_actor", generators::threat_actors),
    (1, "incident", generators::incidents),
    (2, "network", generators::networks),
    (2, "system", generators::systems),
    (2, "integration", generators::integrations),
    (3, "data_asset", generators::data_assets),
    (3, "data_domain", generators::data_domains),
    (3, "data_flow", generators::data_flows),
    (4, "department", generators::departments),
    (4, "organizational_unit", generators::organizational_units),
    (5, "role", generators::roles),
    (5, "person", generators::people),
    (6, "business_capability", generators::business_capabilities),
    (7, "site", generators::sites),
    (7, "geography", generators::geographies),
    (7, "jurisdiction", generators::jurisdictions),
    (8, "product_portfolio", generators::product_portfolios),
    (8, "product", generators::products),
    (9, "market_segment", generators::market_segments),
    (9, "customer", generators::customers),
    (10, "vendor", generators::vendors),
    (10, "contract", generators::contracts),
    (11, "initiative", generators::initiatives),
];

/// Result of a full pipeline run.
pub struct GenerationOutcome {
    pub engine: Box<dyn GraphEngine>,
    pub quality: QualityReport,
    pub profile: OrgProfile,
}

/// Drives generators, weaver, and assessor in order.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    backend: String,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: crate::engine::memory::BACKEND_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Run the full synthetic pipeline for one profile.
    ///
    /// Generators and the weaver do not recover from errors: the first
    /// failure aborts the pipeline with a diagnostic naming the layer
    /// and kind under construction.
    pub fn generate(&self, profile: OrgProfile) -> Result<GenerationOutcome> {
        let engine = create_engine(&self.backend)?;
        let mut ctx = GenerationContext::new(profile, engine)?;
        tracing::info!(
            org = %ctx.profile.name,
            industry = %ctx.profile.industry,
            employees = ctx.profile.employee_count,
            seed = ctx.profile.seed,
            "starting synthetic generation"
        );

        for (layer, kind, generator) in GENERATION_ORDER {
            generator(&mut ctx).map_err(|err| {
                tracing::error!(layer = layer, kind = kind, %err, "generator failed");
                err
            })?;
        }

        Weaver::new().weave_all(&mut ctx).map_err(|err| {
            tracing::error!(%err, "weaver failed");
            err
        })?;

        let quality = assess(&ctx);
        if quality.overall < 0.70 {
            tracing::warn!(
                overall = quality.overall,
                warnings = quality.warnings.len(),
                "generated graph quality below threshold"
            );
        }

        let stats = ctx.engine.statistics();
        tracing::info!(
            entities = stats.entity_count,
            relationships = stats.relationship_count,
            quality = quality.overall,
            "generation complete"
        );

        Ok(GenerationOutcome {
            engine: ctx.engine,
            quality,
            profile: ctx.profile,
        })
    }
}
