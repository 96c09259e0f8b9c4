//! Relationship weaver: connects the generated entities.
//!
//! `weave_all` runs once, after every generator layer. Each weave method
//! produces one to three relationship kinds, and every emitted edge goes
//! through the same builders: organisational facts carry full weight and
//! 0.90-0.95 confidence, inferred dependencies carry drawn weights and
//! 0.80-0.90 confidence, threat attribution carries 0.70-0.75. Severity
//! drives the weight wherever one exists, and `properties` always
//! carries typed context.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::Result;
use crate::model::{
    Criticality, DataClassification, Entity, EntityBody, EntityKind, Relationship, RiskLevel,
    Severity, SystemKind,
};
use crate::schema::RelationshipKind;

use super::GenerationContext;

/// Severity-derived edge weight for risk levels (the five-point scale
/// folded onto the severity weight table).
fn risk_weight(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::VeryLow | RiskLevel::Low => 0.3,
        RiskLevel::Medium => 0.5,
        RiskLevel::High => 0.8,
        RiskLevel::VeryHigh => 1.0,
    }
}

/// Post-generation relationship construction.
#[derive(Debug, Default)]
pub struct Weaver;

impl Weaver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run every weave method, then denormalise the mirror fields.
    pub fn weave_all(&self, ctx: &mut GenerationContext) -> Result<()> {
        self.weave_department_hierarchy(ctx)?;
        self.weave_department_units(ctx)?;
        self.weave_people_departments(ctx)?;
        self.weave_people_roles(ctx)?;
        self.weave_management_chain(ctx)?;
        self.weave_people_locations(ctx)?;
        self.weave_department_locations(ctx)?;
        self.weave_unit_geographies(ctx)?;
        self.weave_unit_jurisdictions(ctx)?;
        self.weave_system_ownership(ctx)?;
        self.weave_system_dependencies(ctx)?;
        self.weave_system_networks(ctx)?;
        self.weave_network_sites(ctx)?;
        self.weave_system_sites(ctx)?;
        self.weave_integration_endpoints(ctx)?;
        self.weave_system_integrations(ctx)?;
        self.weave_data_storage(ctx)?;
        self.weave_data_processing(ctx)?;
        self.weave_data_flow_edges(ctx)?;
        self.weave_data_domain_membership(ctx)?;
        self.weave_data_stewardship(ctx)?;
        self.weave_data_residency(ctx)?;
        self.weave_policy_governance(ctx)?;
        self.weave_control_implementations(ctx)?;
        self.weave_control_mitigations(ctx)?;
        self.weave_control_monitoring(ctx)?;
        self.weave_regulatory_applicability(ctx)?;
        self.weave_regulation_jurisdictions(ctx)?;
        self.weave_threat_landscape(ctx)?;
        self.weave_exploits(ctx)?;
        self.weave_actor_targets(ctx)?;
        self.weave_incident_edges(ctx)?;
        self.weave_vendor_risk(ctx)?;
        self.weave_capability_support(ctx)?;
        self.weave_product_structure(ctx)?;
        self.weave_customer_edges(ctx)?;
        self.weave_vendor_commercial(ctx)?;
        self.weave_initiative_edges(ctx)?;
        self.weave_access(ctx)?;
        self.populate_mirror_fields(ctx)?;
        Ok(())
    }

    // -- edge builders -------------------------------------------------

    /// Pure organisational fact: full weight, 0.90-0.95 confidence.
    fn org_fact(
        &self,
        ctx: &mut GenerationContext,
        kind: RelationshipKind,
        source: &str,
        target: &str,
        properties: &[(&str, Value)],
    ) -> Result<()> {
        let id = ctx.new_id();
        let confidence = ctx.range_f64(0.90, 0.95);
        self.push(ctx, kind, source, target, id, 1.0, confidence, properties)
    }

    /// Dependency inference: caller-chosen weight, 0.80-0.90 confidence.
    fn inferred(
        &self,
        ctx: &mut GenerationContext,
        kind: RelationshipKind,
        source: &str,
        target: &str,
        weight: f64,
        properties: &[(&str, Value)],
    ) -> Result<()> {
        let id = ctx.new_id();
        let confidence = ctx.range_f64(0.80, 0.90);
        self.push(ctx, kind, source, target, id, weight, confidence, properties)
    }

    /// Threat attribution: caller-chosen weight, 0.70-0.75 confidence.
    fn attribution(
        &self,
        ctx: &mut GenerationContext,
        kind: RelationshipKind,
        source: &str,
        target: &str,
        weight: f64,
        properties: &[(&str, Value)],
    ) -> Result<()> {
        let id = ctx.new_id();
        let confidence = ctx.range_f64(0.70, 0.75);
        self.push(ctx, kind, source, target, id, weight, confidence, properties)
    }

    /// Dependency inference with a drawn non-severity weight in
    /// [0.5, 1.0].
    fn inferred_drawn(
        &self,
        ctx: &mut GenerationContext,
        kind: RelationshipKind,
        source: &str,
        target: &str,
        properties: &[(&str, Value)],
    ) -> Result<()> {
        let weight = ctx.range_f64(0.5, 1.0);
        self.inferred(ctx, kind, source, target, weight, properties)
    }

    /// Attribution with a drawn non-severity weight in [0.5, 1.0].
    fn attribution_drawn(
        &self,
        ctx: &mut GenerationContext,
        kind: RelationshipKind,
        source: &str,
        target: &str,
        properties: &[(&str, Value)],
    ) -> Result<()> {
        let weight = ctx.range_f64(0.5, 1.0);
        self.attribution(ctx, kind, source, target, weight, properties)
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &self,
        ctx: &mut GenerationContext,
        kind: RelationshipKind,
        source: &str,
        target: &str,
        id: String,
        weight: f64,
        confidence: f64,
        properties: &[(&str, Value)],
    ) -> Result<()> {
        debug_assert!(!properties.is_empty(), "{kind} edge emitted without context");
        let mut relationship = Relationship::new(kind, source, target)
            .with_id(id)
            .with_weight(weight)
            .with_confidence(confidence);
        for (key, value) in properties {
            relationship = relationship.with_property(*key, value.clone());
        }
        ctx.engine.add_relationship(relationship)?;
        Ok(())
    }

    // -- organisation --------------------------------------------------

    fn weave_department_hierarchy(&self, ctx: &mut GenerationContext) -> Result<()> {
        let pairs: Vec<(String, String)> = ctx
            .engine
            .list_entities(Some(EntityKind::Department), None)
            .iter()
            .filter_map(|d| match &d.body {
                EntityBody::Department(body) => body
                    .parent_department_id
                    .clone()
                    .map(|parent| (parent, d.id.clone())),
                _ => None,
            })
            .collect();
        for (parent, child) in pairs {
            self.org_fact(
                ctx,
                RelationshipKind::ParentOf,
                &parent,
                &child,
                &[("hierarchy", json!("subdivision"))],
            )?;
        }
        Ok(())
    }

    fn weave_department_units(&self, ctx: &mut GenerationContext) -> Result<()> {
        let units = ctx.ids_of(EntityKind::OrganizationalUnit);
        if units.is_empty() {
            return Ok(());
        }
        let roots: Vec<String> = ctx
            .engine
            .list_entities(Some(EntityKind::Department), None)
            .iter()
            .filter(|d| match &d.body {
                EntityBody::Department(body) => body.parent_department_id.is_none(),
                _ => false,
            })
            .map(|d| d.id.clone())
            .collect();
        for (index, dept) in roots.iter().enumerate() {
            let unit = &units[index % units.len()];
            self.org_fact(
                ctx,
                RelationshipKind::MemberOf,
                dept,
                unit,
                &[("alignment", json!("reporting_line"))],
            )?;
        }
        Ok(())
    }

    fn weave_people_departments(&self, ctx: &mut GenerationContext) -> Result<()> {
        let assignments = ctx.person_assignments.clone();
        for (person, department) in assignments {
            self.org_fact(
                ctx,
                RelationshipKind::WorksIn,
                &person,
                &department,
                &[("assignment", json!("primary"))],
            )?;
        }
        Ok(())
    }

    fn weave_people_roles(&self, ctx: &mut GenerationContext) -> Result<()> {
        let assignments = ctx.person_assignments.clone();
        let department_roles = ctx.department_roles.clone();
        for (person, department) in assignments {
            let Some(roles) = department_roles.get(&department) else {
                continue;
            };
            if roles.is_empty() {
                continue;
            }
            let role = roles[ctx.range_u32(0, roles.len() as u32 - 1) as usize].clone();
            self.org_fact(
                ctx,
                RelationshipKind::HasRole,
                &person,
                &role,
                &[("source", json!("hris"))],
            )?;
        }
        Ok(())
    }

    fn weave_management_chain(&self, ctx: &mut GenerationContext) -> Result<()> {
        // The first person assigned to each department is its head: the
        // head manages the department, everyone else reports to the head.
        // Assignment order keeps the emitted edges seed-stable.
        let mut heads: HashMap<String, String> = HashMap::new();
        let mut head_order: Vec<(String, String)> = Vec::new();
        let mut members: Vec<(String, String)> = Vec::new();
        for (person, department) in ctx.person_assignments.clone() {
            if let Some(head) = heads.get(&department) {
                members.push((person, head.clone()));
            } else {
                heads.insert(department.clone(), person.clone());
                head_order.push((department, person));
            }
        }
        for (department, head) in head_order {
            self.org_fact(
                ctx,
                RelationshipKind::Manages,
                &head,
                &department,
                &[("line", json!("solid"))],
            )?;
        }
        for (person, head) in members {
            self.org_fact(
                ctx,
                RelationshipKind::ReportsTo,
                &person,
                &head,
                &[("line", json!("solid"))],
            )?;
        }
        Ok(())
    }

    fn weave_people_locations(&self, ctx: &mut GenerationContext) -> Result<()> {
        let locations = ctx.ids_of(EntityKind::Location);
        if locations.is_empty() {
            return Ok(());
        }
        let people = ctx.ids_of(EntityKind::Person);
        for (index, person) in people.iter().enumerate() {
            let location = &locations[index % locations.len()];
            self.org_fact(
                ctx,
                RelationshipKind::LocatedAt,
                person,
                location,
                &[("basis", json!("badge_records"))],
            )?;
        }
        Ok(())
    }

    fn weave_department_locations(&self, ctx: &mut GenerationContext) -> Result<()> {
        let locations = ctx.ids_of(EntityKind::Location);
        let Some(headquarters) = locations.first().cloned() else {
            return Ok(());
        };
        let roots: Vec<String> = ctx
            .engine
            .list_entities(Some(EntityKind::Department), None)
            .iter()
            .filter(|d| match &d.body {
                EntityBody::Department(body) => body.parent_department_id.is_none(),
                _ => false,
            })
            .map(|d| d.id.clone())
            .collect();
        for department in roots {
            self.org_fact(
                ctx,
                RelationshipKind::LocatedAt,
                &department,
                &headquarters,
                &[("basis", json!("org_registry"))],
            )?;
        }
        Ok(())
    }

    fn weave_unit_geographies(&self, ctx: &mut GenerationContext) -> Result<()> {
        let geographies = ctx.ids_of(EntityKind::Geography);
        if geographies.is_empty() {
            return Ok(());
        }
        let units = ctx.ids_of(EntityKind::OrganizationalUnit);
        for (index, unit) in units.iter().enumerate() {
            let geography = &geographies[index % geographies.len()];
            self.org_fact(
                ctx,
                RelationshipKind::BasedIn,
                unit,
                geography,
                &[("registration", json!("primary"))],
            )?;
        }
        Ok(())
    }

    fn weave_unit_jurisdictions(&self, ctx: &mut GenerationContext) -> Result<()> {
        let jurisdictions = ctx.ids_of(EntityKind::Jurisdiction);
        if jurisdictions.is_empty() {
            return Ok(());
        }
        let units = ctx.ids_of(EntityKind::OrganizationalUnit);
        for (index, unit) in units.iter().enumerate() {
            let jurisdiction = &jurisdictions[index % jurisdictions.len()];
            self.inferred_drawn(
                ctx,
                RelationshipKind::OperatesIn,
                unit,
                jurisdiction,
                &[("basis", json!("legal_registration"))],
            )?;
        }
        Ok(())
    }

    // -- technology ----------------------------------------------------

    fn weave_system_ownership(&self, ctx: &mut GenerationContext) -> Result<()> {
        let owners = departments_with_function(ctx, &["engineering", "it", "data"]);
        let fallback = ctx.ids_of(EntityKind::Department);
        let pool = if owners.is_empty() { fallback } else { owners };
        if pool.is_empty() {
            return Ok(());
        }
        let systems = ctx.ids_of(EntityKind::System);
        for (index, system) in systems.iter().enumerate() {
            let owner = &pool[index % pool.len()];
            self.inferred_drawn(
                ctx,
                RelationshipKind::Owns,
                owner,
                system,
                &[("ownership", json!("operational"))],
            )?;
        }
        Ok(())
    }

    fn weave_system_dependencies(&self, ctx: &mut GenerationContext) -> Result<()> {
        let systems = systems_info(ctx);
        let providers: Vec<&SystemInfo> = systems
            .iter()
            .filter(|s| {
                matches!(
                    s.kind,
                    SystemKind::Database | SystemKind::Infrastructure | SystemKind::Middleware
                )
            })
            .collect();
        if providers.is_empty() {
            return Ok(());
        }
        let dependency_types = ["runtime", "build", "data", "auth", "monitoring"];
        let consumers: Vec<String> = systems
            .iter()
            .filter(|s| matches!(s.kind, SystemKind::Application | SystemKind::Saas))
            .map(|s| s.id.clone())
            .collect();
        let provider_ids: Vec<String> = providers.iter().map(|s| s.id.clone()).collect();
        for consumer in consumers {
            let picks = ctx.range_u32(1, (provider_ids.len() as u32).min(3));
            let start = ctx.range_u32(0, provider_ids.len() as u32 - 1) as usize;
            for offset in 0..picks as usize {
                let provider = &provider_ids[(start + offset) % provider_ids.len()];
                if provider == &consumer {
                    continue;
                }
                let dependency_type =
                    dependency_types[ctx.range_u32(0, 4) as usize];
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::DependsOn,
                    &consumer,
                    provider,
                    &[("dependency_type", json!(dependency_type))],
                )?;
            }
        }
        Ok(())
    }

    fn weave_system_networks(&self, ctx: &mut GenerationContext) -> Result<()> {
        let networks: Vec<(String, bool)> = ctx
            .engine
            .list_entities(Some(EntityKind::Network), None)
            .iter()
            .filter_map(|n| match &n.body {
                EntityBody::Network(body) => Some((n.id.clone(), body.internet_facing)),
                _ => None,
            })
            .collect();
        if networks.is_empty() {
            return Ok(());
        }
        let internal: Vec<&(String, bool)> = networks.iter().filter(|(_, i)| !*i).collect();
        let exposed: Vec<&(String, bool)> = networks.iter().filter(|(_, i)| *i).collect();
        for system in systems_info(ctx) {
            if system.kind == SystemKind::Saas {
                continue;
            }
            let pool = if system.internet_facing && !exposed.is_empty() {
                &exposed
            } else if !internal.is_empty() {
                &internal
            } else {
                continue;
            };
            let (network, _) = pool[ctx.range_u32(0, pool.len() as u32 - 1) as usize];
            let network = network.clone();
            self.org_fact(
                ctx,
                RelationshipKind::RunsOn,
                &system.id,
                &network,
                &[("placement", json!("primary"))],
            )?;
        }
        Ok(())
    }

    fn weave_network_sites(&self, ctx: &mut GenerationContext) -> Result<()> {
        let sites = data_center_sites(ctx);
        let fallback = ctx.ids_of(EntityKind::Site);
        let pool = if sites.is_empty() { fallback } else { sites };
        if pool.is_empty() {
            return Ok(());
        }
        let networks = ctx.ids_of(EntityKind::Network);
        for (index, network) in networks.iter().enumerate() {
            let site = &pool[index % pool.len()];
            self.org_fact(
                ctx,
                RelationshipKind::HostedAt,
                network,
                site,
                &[("tier", json!("primary"))],
            )?;
        }
        Ok(())
    }

    fn weave_system_sites(&self, ctx: &mut GenerationContext) -> Result<()> {
        let pool = {
            let sites = data_center_sites(ctx);
            if sites.is_empty() {
                ctx.ids_of(EntityKind::Site)
            } else {
                sites
            }
        };
        if pool.is_empty() {
            return Ok(());
        }
        for system in systems_info(ctx) {
            if system.kind == SystemKind::Saas {
                continue;
            }
            let site = pool[ctx.range_u32(0, pool.len() as u32 - 1) as usize].clone();
            self.inferred_drawn(
                ctx,
                RelationshipKind::HostedAt,
                &system.id,
                &site,
                &[("tier", json!("primary"))],
            )?;
        }
        Ok(())
    }

    fn weave_integration_endpoints(&self, ctx: &mut GenerationContext) -> Result<()> {
        let systems = ctx.ids_of(EntityKind::System);
        if systems.len() < 2 {
            return Ok(());
        }
        let integrations = ctx.ids_of(EntityKind::Integration);
        for integration in integrations {
            let producer = systems[ctx.range_u32(0, systems.len() as u32 - 1) as usize].clone();
            let mut consumer =
                systems[ctx.range_u32(0, systems.len() as u32 - 1) as usize].clone();
            if consumer == producer {
                consumer = systems[(systems.iter().position(|s| *s == producer).unwrap_or(0) + 1)
                    % systems.len()]
                .clone();
            }
            self.inferred_drawn(
                ctx,
                RelationshipKind::ConnectsTo,
                &integration,
                &producer,
                &[("endpoint", json!("producer"))],
            )?;
            self.inferred_drawn(
                ctx,
                RelationshipKind::ConnectsTo,
                &integration,
                &consumer,
                &[("endpoint", json!("consumer"))],
            )?;
        }
        Ok(())
    }

    fn weave_system_integrations(&self, ctx: &mut GenerationContext) -> Result<()> {
        let systems: Vec<String> = systems_info(ctx)
            .iter()
            .filter(|s| matches!(s.kind, SystemKind::Application | SystemKind::Saas))
            .map(|s| s.id.clone())
            .collect();
        if systems.len() < 2 {
            return Ok(());
        }
        for pair in systems.chunks(2) {
            if let [a, b] = pair {
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::IntegratesWith,
                    a,
                    b,
                    &[("coupling", json!("api"))],
                )?;
            }
        }
        Ok(())
    }

    // -- data ----------------------------------------------------------

    fn weave_data_storage(&self, ctx: &mut GenerationContext) -> Result<()> {
        let stores: Vec<String> = systems_info(ctx)
            .iter()
            .filter(|s| {
                matches!(s.kind, SystemKind::Database | SystemKind::Infrastructure)
            })
            .map(|s| s.id.clone())
            .collect();
        if stores.is_empty() {
            return Ok(());
        }
        let assets = assets_info(ctx);
        for (index, asset) in assets.iter().enumerate() {
            let system = &stores[index % stores.len()];
            let weight = match asset.classification {
                Some(DataClassification::Restricted) => 1.0,
                Some(DataClassification::Confidential) => 0.8,
                Some(DataClassification::Internal) => 0.5,
                _ => 0.3,
            };
            self.inferred(
                ctx,
                RelationshipKind::Stores,
                system,
                &asset.id,
                weight,
                &[("store_role", json!("primary"))],
            )?;
        }
        Ok(())
    }

    fn weave_data_processing(&self, ctx: &mut GenerationContext) -> Result<()> {
        let processors: Vec<String> = systems_info(ctx)
            .iter()
            .filter(|s| matches!(s.kind, SystemKind::Application | SystemKind::Middleware))
            .map(|s| s.id.clone())
            .collect();
        if processors.is_empty() {
            return Ok(());
        }
        let assets = ctx.ids_of(EntityKind::DataAsset);
        for (index, asset) in assets.iter().enumerate() {
            if index % 3 == 2 {
                continue;
            }
            let system = &processors[index % processors.len()];
            self.inferred_drawn(
                ctx,
                RelationshipKind::Processes,
                system,
                asset,
                &[("operation", json!("read_write"))],
            )?;
        }
        Ok(())
    }

    fn weave_data_flow_edges(&self, ctx: &mut GenerationContext) -> Result<()> {
        let systems = ctx.ids_of(EntityKind::System);
        if systems.is_empty() {
            return Ok(());
        }
        let flows = ctx.ids_of(EntityKind::DataFlow);
        for flow in flows {
            let target = systems[ctx.range_u32(0, systems.len() as u32 - 1) as usize].clone();
            self.inferred_drawn(
                ctx,
                RelationshipKind::FlowsTo,
                &flow,
                &target,
                &[("delivery", json!("push"))],
            )?;
        }
        Ok(())
    }

    fn weave_data_domain_membership(&self, ctx: &mut GenerationContext) -> Result<()> {
        let domains = ctx.ids_of(EntityKind::DataDomain);
        if domains.is_empty() {
            return Ok(());
        }
        let assets = ctx.ids_of(EntityKind::DataAsset);
        for (index, asset) in assets.iter().enumerate() {
            let domain = &domains[index % domains.len()];
            self.org_fact(
                ctx,
                RelationshipKind::BelongsToDomain,
                asset,
                domain,
                &[("catalogued", json!(true))],
            )?;
        }
        Ok(())
    }

    fn weave_data_stewardship(&self, ctx: &mut GenerationContext) -> Result<()> {
        let roles = ctx.ids_of(EntityKind::Role);
        if roles.is_empty() {
            return Ok(());
        }
        let domains = ctx.ids_of(EntityKind::DataDomain);
        for domain in domains {
            let role = roles[ctx.range_u32(0, roles.len() as u32 - 1) as usize].clone();
            self.org_fact(
                ctx,
                RelationshipKind::StewardedBy,
                &domain,
                &role,
                &[("appointment", json!("data_council"))],
            )?;
        }
        Ok(())
    }

    fn weave_data_residency(&self, ctx: &mut GenerationContext) -> Result<()> {
        let geographies = ctx.ids_of(EntityKind::Geography);
        if geographies.is_empty() {
            return Ok(());
        }
        let assets = ctx.ids_of(EntityKind::DataAsset);
        for (index, asset) in assets.iter().enumerate() {
            let geography = &geographies[index % geographies.len()];
            self.inferred_drawn(
                ctx,
                RelationshipKind::ResidesIn,
                asset,
                geography,
                &[("basis", json!("storage_region"))],
            )?;
        }
        Ok(())
    }

    // -- governance ----------------------------------------------------

    fn weave_policy_governance(&self, ctx: &mut GenerationContext) -> Result<()> {
        let policies: Vec<(String, String)> = ctx
            .engine
            .list_entities(Some(EntityKind::Policy), None)
            .iter()
            .filter_map(|p| match &p.body {
                EntityBody::Policy(body) => Some((p.id.clone(), body.enforcement.clone())),
                _ => None,
            })
            .collect();
        let systems = ctx.ids_of(EntityKind::System);
        let assets = ctx.ids_of(EntityKind::DataAsset);
        let departments = ctx.ids_of(EntityKind::Department);
        for (index, (policy, enforcement)) in policies.iter().enumerate() {
            let weight = if enforcement == "mandatory" { 0.8 } else { 0.5 };
            let targets: [Option<&String>; 3] = [
                systems.get(index % systems.len().max(1)),
                assets.get(index % assets.len().max(1)),
                departments.get(index % departments.len().max(1)),
            ];
            for target in targets.into_iter().flatten() {
                let target = target.clone();
                self.inferred(
                    ctx,
                    RelationshipKind::Governs,
                    policy,
                    &target,
                    weight,
                    &[("enforcement", json!(enforcement))],
                )?;
            }
        }
        Ok(())
    }

    fn weave_control_implementations(&self, ctx: &mut GenerationContext) -> Result<()> {
        let regulations = ctx.ids_of(EntityKind::Regulation);
        let policies = ctx.ids_of(EntityKind::Policy);
        let controls = ctx.ids_of(EntityKind::Control);
        for (index, control) in controls.iter().enumerate() {
            if let Some(policy) = policies.get(index % policies.len().max(1)) {
                let policy = policy.clone();
                let coverage = if ctx.chance(0.7) { "full" } else { "partial" };
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Implements,
                    control,
                    &policy,
                    &[("coverage", json!(coverage))],
                )?;
            }
            if index % 2 == 0 {
                if let Some(regulation) = regulations.get(index % regulations.len().max(1)) {
                    let regulation = regulation.clone();
                    let coverage = if ctx.chance(0.6) { "full" } else { "partial" };
                    self.inferred_drawn(
                        ctx,
                        RelationshipKind::Implements,
                        control,
                        &regulation,
                        &[("coverage", json!(coverage))],
                    )?;
                }
            }
        }
        Ok(())
    }

    fn weave_control_mitigations(&self, ctx: &mut GenerationContext) -> Result<()> {
        let controls = ctx.ids_of(EntityKind::Control);
        if controls.is_empty() {
            return Ok(());
        }
        // Severity-derived weights throughout.
        let risks: Vec<(String, RiskLevel)> = ctx
            .engine
            .list_entities(Some(EntityKind::Risk), None)
            .iter()
            .filter_map(|r| match &r.body {
                EntityBody::Risk(body) => Some((r.id.clone(), body.inherent_level)),
                _ => None,
            })
            .collect();
        for (index, (risk, level)) in risks.iter().enumerate() {
            let control = controls[index % controls.len()].clone();
            self.inferred(
                ctx,
                RelationshipKind::Mitigates,
                &control,
                risk,
                risk_weight(*level),
                &[("mitigation_type", json!("risk_reduction"))],
            )?;
        }
        let vulnerabilities: Vec<(String, Severity)> = ctx
            .engine
            .list_entities(Some(EntityKind::Vulnerability), None)
            .iter()
            .filter_map(|v| match &v.body {
                EntityBody::Vulnerability(body) => {
                    body.severity.map(|s| (v.id.clone(), s))
                }
                _ => None,
            })
            .collect();
        for (index, (vulnerability, severity)) in vulnerabilities.iter().enumerate() {
            if index % 2 == 1 {
                continue;
            }
            let control = controls[(index / 2) % controls.len()].clone();
            self.inferred(
                ctx,
                RelationshipKind::Mitigates,
                &control,
                vulnerability,
                severity.edge_weight(),
                &[("mitigation_type", json!("compensating"))],
            )?;
        }
        Ok(())
    }

    fn weave_control_monitoring(&self, ctx: &mut GenerationContext) -> Result<()> {
        let detective: Vec<String> = ctx
            .engine
            .list_entities(Some(EntityKind::Control), None)
            .iter()
            .filter(|c| match &c.body {
                EntityBody::Control(body) => body.control_class == "detective",
                _ => false,
            })
            .map(|c| c.id.clone())
            .collect();
        let systems = ctx.ids_of(EntityKind::System);
        for (index, control) in detective.iter().enumerate() {
            if let Some(system) = systems.get(index % systems.len().max(1)) {
                let system = system.clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Monitors,
                    control,
                    &system,
                    &[("telemetry", json!("continuous"))],
                )?;
            }
        }
        let preventive: Vec<String> = ctx
            .engine
            .list_entities(Some(EntityKind::Control), None)
            .iter()
            .filter(|c| match &c.body {
                EntityBody::Control(body) => body.control_class == "preventive",
                _ => false,
            })
            .map(|c| c.id.clone())
            .collect();
        let networks = ctx.ids_of(EntityKind::Network);
        let assets = ctx.ids_of(EntityKind::DataAsset);
        for (index, control) in preventive.iter().enumerate() {
            let target = if index % 2 == 0 {
                networks.get(index % networks.len().max(1))
            } else {
                assets.get(index % assets.len().max(1))
            };
            if let Some(target) = target {
                let target = target.clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Secures,
                    control,
                    &target,
                    &[("scope", json!("in_scope_estate"))],
                )?;
            }
        }
        Ok(())
    }

    fn weave_regulatory_applicability(&self, ctx: &mut GenerationContext) -> Result<()> {
        let regulations: Vec<(String, String)> = ctx
            .engine
            .list_entities(Some(EntityKind::Regulation), None)
            .iter()
            .filter_map(|r| match &r.body {
                EntityBody::Regulation(body) => Some((r.id.clone(), body.domain.clone())),
                _ => None,
            })
            .collect();
        if regulations.is_empty() {
            return Ok(());
        }
        // PII-bearing assets pick up privacy regulations; systems and
        // vendors rotate across the register.
        let pii_assets: Vec<String> = assets_info(ctx)
            .iter()
            .filter(|a| a.pii)
            .map(|a| a.id.clone())
            .collect();
        let privacy: Vec<&(String, String)> = regulations
            .iter()
            .filter(|(_, domain)| domain == "privacy" || domain == "healthcare")
            .collect();
        for (index, asset) in pii_assets.iter().enumerate() {
            if privacy.is_empty() {
                break;
            }
            let (regulation, _) = privacy[index % privacy.len()];
            let regulation = regulation.clone();
            self.inferred_drawn(
                ctx,
                RelationshipKind::SubjectTo,
                asset,
                &regulation,
                &[("basis", json!("personal_data"))],
            )?;
        }
        let systems = ctx.ids_of(EntityKind::System);
        for (index, system) in systems.iter().enumerate() {
            if index % 3 != 0 {
                continue;
            }
            let (regulation, _) = &regulations[index % regulations.len()];
            let regulation = regulation.clone();
            self.inferred_drawn(
                ctx,
                RelationshipKind::SubjectTo,
                system,
                &regulation,
                &[("basis", json!("in_scope_processing"))],
            )?;
        }
        let vendors = ctx.ids_of(EntityKind::Vendor);
        for (index, vendor) in vendors.iter().enumerate() {
            if index % 4 != 0 {
                continue;
            }
            let (regulation, _) = &regulations[index % regulations.len()];
            let regulation = regulation.clone();
            self.inferred_drawn(
                ctx,
                RelationshipKind::SubjectTo,
                vendor,
                &regulation,
                &[("basis", json!("subprocessor"))],
            )?;
        }
        Ok(())
    }

    fn weave_regulation_jurisdictions(&self, ctx: &mut GenerationContext) -> Result<()> {
        let jurisdictions = ctx.ids_of(EntityKind::Jurisdiction);
        if jurisdictions.is_empty() {
            return Ok(());
        }
        let regulations = ctx.ids_of(EntityKind::Regulation);
        for (index, regulation) in regulations.iter().enumerate() {
            let jurisdiction = &jurisdictions[index % jurisdictions.len()];
            self.org_fact(
                ctx,
                RelationshipKind::AppliesIn,
                regulation,
                jurisdiction,
                &[("force", json!("statutory"))],
            )?;
        }
        Ok(())
    }

    // -- threat landscape ----------------------------------------------

    fn weave_threat_landscape(&self, ctx: &mut GenerationContext) -> Result<()> {
        let threats: Vec<(String, Severity)> = ctx
            .engine
            .list_entities(Some(EntityKind::Threat), None)
            .iter()
            .filter_map(|t| match &t.body {
                EntityBody::Threat(body) => body.severity.map(|s| (t.id.clone(), s)),
                _ => None,
            })
            .collect();
        let systems = ctx.ids_of(EntityKind::System);
        let capabilities = ctx.ids_of(EntityKind::BusinessCapability);
        for (index, (threat, severity)) in threats.iter().enumerate() {
            if let Some(system) = systems.get(index % systems.len().max(1)) {
                let system = system.clone();
                self.inferred(
                    ctx,
                    RelationshipKind::Threatens,
                    threat,
                    &system,
                    severity.edge_weight(),
                    &[("assessment", json!("threat_model"))],
                )?;
            }
            if index % 2 == 0 {
                if let Some(capability) = capabilities.get(index % capabilities.len().max(1)) {
                    let capability = capability.clone();
                    self.inferred(
                        ctx,
                        RelationshipKind::Threatens,
                        threat,
                        &capability,
                        severity.edge_weight(),
                        &[("assessment", json!("business_impact"))],
                    )?;
                }
            }
        }
        Ok(())
    }

    fn weave_exploits(&self, ctx: &mut GenerationContext) -> Result<()> {
        let vulnerabilities: Vec<(String, Severity)> = ctx
            .engine
            .list_entities(Some(EntityKind::Vulnerability), None)
            .iter()
            .filter_map(|v| match &v.body {
                EntityBody::Vulnerability(body) => body.severity.map(|s| (v.id.clone(), s)),
                _ => None,
            })
            .collect();
        if vulnerabilities.is_empty() {
            return Ok(());
        }
        let maturities = ["weaponized", "poc", "theoretical"];
        let threats = ctx.ids_of(EntityKind::Threat);
        for (index, threat) in threats.iter().enumerate() {
            let (vulnerability, severity) = &vulnerabilities[index % vulnerabilities.len()];
            let vulnerability = vulnerability.clone();
            let maturity = maturities[ctx.range_u32(0, 2) as usize];
            self.inferred(
                ctx,
                RelationshipKind::Exploits,
                threat,
                &vulnerability,
                severity.edge_weight(),
                &[("exploit_maturity", json!(maturity))],
            )?;
        }
        let actors = ctx.ids_of(EntityKind::ThreatActor);
        for (index, actor) in actors.iter().enumerate() {
            let (vulnerability, severity) =
                &vulnerabilities[(index * 3) % vulnerabilities.len()];
            let vulnerability = vulnerability.clone();
            let maturity = maturities[ctx.range_u32(0, 1) as usize];
            self.attribution(
                ctx,
                RelationshipKind::Exploits,
                actor,
                &vulnerability,
                severity.edge_weight(),
                &[("exploit_maturity", json!(maturity))],
            )?;
        }
        Ok(())
    }

    fn weave_actor_targets(&self, ctx: &mut GenerationContext) -> Result<()> {
        let systems: Vec<String> = systems_info(ctx)
            .iter()
            .filter(|s| s.internet_facing || s.criticality == Some(Criticality::Critical))
            .map(|s| s.id.clone())
            .collect();
        if systems.is_empty() {
            return Ok(());
        }
        let motivations = ["espionage", "financial", "disruption"];
        let actors = ctx.ids_of(EntityKind::ThreatActor);
        for (index, actor) in actors.iter().enumerate() {
            let system = systems[index % systems.len()].clone();
            let motivation = motivations[ctx.range_u32(0, 2) as usize];
            self.attribution_drawn(
                ctx,
                RelationshipKind::Targets,
                actor,
                &system,
                &[("motivation", json!(motivation))],
            )?;
        }
        Ok(())
    }

    fn weave_incident_edges(&self, ctx: &mut GenerationContext) -> Result<()> {
        let incidents: Vec<(String, Severity)> = ctx
            .engine
            .list_entities(Some(EntityKind::Incident), None)
            .iter()
            .filter_map(|i| match &i.body {
                EntityBody::Incident(body) => body.severity.map(|s| (i.id.clone(), s)),
                _ => None,
            })
            .collect();
        let actors = ctx.ids_of(EntityKind::ThreatActor);
        let systems = ctx.ids_of(EntityKind::System);
        let vulnerabilities = ctx.ids_of(EntityKind::Vulnerability);
        for (index, (incident, severity)) in incidents.iter().enumerate() {
            if let Some(system) = systems.get(index % systems.len().max(1)) {
                let system = system.clone();
                self.inferred(
                    ctx,
                    RelationshipKind::IncidentAffects,
                    incident,
                    &system,
                    severity.edge_weight(),
                    &[("impact", json!("service_degradation"))],
                )?;
            }
            // Only the serious incidents get a named attribution.
            if *severity >= Severity::High && !actors.is_empty() {
                let actor = actors[index % actors.len()].clone();
                self.attribution(
                    ctx,
                    RelationshipKind::AttributedTo,
                    incident,
                    &actor,
                    severity.edge_weight(),
                    &[("attribution_basis", json!("ttp_overlap"))],
                )?;
            }
            if index % 2 == 0 {
                if let Some(vulnerability) =
                    vulnerabilities.get(index % vulnerabilities.len().max(1))
                {
                    let vulnerability = vulnerability.clone();
                    self.inferred(
                        ctx,
                        RelationshipKind::TriggeredBy,
                        incident,
                        &vulnerability,
                        severity.edge_weight(),
                        &[("evidence", json!("forensic_timeline"))],
                    )?;
                }
            }
        }
        Ok(())
    }

    fn weave_vendor_risk(&self, ctx: &mut GenerationContext) -> Result<()> {
        let risks = ctx.ids_of(EntityKind::Risk);
        if risks.is_empty() {
            return Ok(());
        }
        let data_vendors: Vec<String> = ctx
            .engine
            .list_entities(Some(EntityKind::Vendor), None)
            .iter()
            .filter(|v| match &v.body {
                EntityBody::Vendor(body) => body.data_access,
                _ => false,
            })
            .map(|v| v.id.clone())
            .collect();
        for (index, vendor) in data_vendors.iter().enumerate() {
            if index % 3 != 0 {
                continue;
            }
            let risk = risks[index % risks.len()].clone();
            self.inferred_drawn(
                ctx,
                RelationshipKind::Introduces,
                vendor,
                &risk,
                &[("channel", json!("third_party_access"))],
            )?;
        }
        let owners = departments_with_function(ctx, &["security", "risk", "compliance"]);
        let fallback = ctx.ids_of(EntityKind::Department);
        let pool = if owners.is_empty() { fallback } else { owners };
        if pool.is_empty() {
            return Ok(());
        }
        for (index, risk) in risks.iter().enumerate() {
            let owner = pool[index % pool.len()].clone();
            self.org_fact(
                ctx,
                RelationshipKind::AssignedTo,
                risk,
                &owner,
                &[("accountability", json!("risk_register"))],
            )?;
        }
        Ok(())
    }

    // -- capabilities, products, commerce ------------------------------

    fn weave_capability_support(&self, ctx: &mut GenerationContext) -> Result<()> {
        let capabilities = ctx.ids_of(EntityKind::BusinessCapability);
        if capabilities.is_empty() {
            return Ok(());
        }
        let systems = ctx.ids_of(EntityKind::System);
        for (index, system) in systems.iter().enumerate() {
            if index % 2 == 1 {
                continue;
            }
            let capability = &capabilities[index % capabilities.len()];
            self.inferred_drawn(
                ctx,
                RelationshipKind::Supports,
                system,
                capability,
                &[("support_role", json!("primary_system"))],
            )?;
        }
        for window in capabilities.windows(2).step_by(3) {
            if let [upstream, downstream] = window {
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Enables,
                    upstream,
                    downstream,
                    &[("linkage", json!("value_stream"))],
                )?;
            }
        }
        let products = ctx.ids_of(EntityKind::Product);
        for (index, product) in products.iter().enumerate() {
            let capability = capabilities[index % capabilities.len()].clone();
            self.inferred_drawn(
                ctx,
                RelationshipKind::Delivers,
                &capability,
                product,
                &[("contribution", json!("direct"))],
            )?;
            if index % 2 == 0 {
                let required = capabilities[(index + 1) % capabilities.len()].clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Requires,
                    product,
                    &required,
                    &[("dependency_type", json!("capability"))],
                )?;
            }
        }
        Ok(())
    }

    fn weave_product_structure(&self, ctx: &mut GenerationContext) -> Result<()> {
        let portfolios = ctx.ids_of(EntityKind::ProductPortfolio);
        let segments = ctx.ids_of(EntityKind::MarketSegment);
        let products = ctx.ids_of(EntityKind::Product);
        for (index, product) in products.iter().enumerate() {
            if let Some(portfolio) = portfolios.get(index % portfolios.len().max(1)) {
                let portfolio = portfolio.clone();
                self.org_fact(
                    ctx,
                    RelationshipKind::PartOf,
                    product,
                    &portfolio,
                    &[("catalogued", json!(true))],
                )?;
            }
            if let Some(segment) = segments.get(index % segments.len().max(1)) {
                let segment = segment.clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Serves,
                    product,
                    &segment,
                    &[("fit", json!("primary_market"))],
                )?;
            }
        }
        Ok(())
    }

    fn weave_customer_edges(&self, ctx: &mut GenerationContext) -> Result<()> {
        let products = ctx.ids_of(EntityKind::Product);
        let segments = ctx.ids_of(EntityKind::MarketSegment);
        let customers = ctx.ids_of(EntityKind::Customer);
        for (index, customer) in customers.iter().enumerate() {
            if let Some(product) = products.get(index % products.len().max(1)) {
                let product = product.clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Purchases,
                    customer,
                    &product,
                    &[("commitment", json!("subscription"))],
                )?;
            }
            if let Some(segment) = segments.get(index % segments.len().max(1)) {
                let segment = segment.clone();
                self.org_fact(
                    ctx,
                    RelationshipKind::BelongsToSegment,
                    customer,
                    &segment,
                    &[("segmentation", json!("firmographic"))],
                )?;
            }
        }
        Ok(())
    }

    fn weave_vendor_commercial(&self, ctx: &mut GenerationContext) -> Result<()> {
        let departments = ctx.ids_of(EntityKind::Department);
        let systems = ctx.ids_of(EntityKind::System);
        let contracts = ctx.ids_of(EntityKind::Contract);
        let products = ctx.ids_of(EntityKind::Product);
        let procurement = departments_with_function(ctx, &["finance", "operations", "it"]);
        let managers = if procurement.is_empty() {
            departments.clone()
        } else {
            procurement
        };
        let vendors = ctx.ids_of(EntityKind::Vendor);
        for (index, vendor) in vendors.iter().enumerate() {
            if let Some(department) = departments.get(index % departments.len().max(1)) {
                let department = department.clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Supplies,
                    vendor,
                    &department,
                    &[("service", json!("managed"))],
                )?;
            }
            if let Some(manager) = managers.get(index % managers.len().max(1)) {
                let manager = manager.clone();
                self.org_fact(
                    ctx,
                    RelationshipKind::ManagesVendor,
                    &manager,
                    vendor,
                    &[("relationship", json!("commercial_owner"))],
                )?;
            }
            if let Some(contract) = contracts.get(index % contracts.len().max(1)) {
                let contract = contract.clone();
                self.org_fact(
                    ctx,
                    RelationshipKind::ContractedUnder,
                    vendor,
                    &contract,
                    &[("instrument", json!("executed"))],
                )?;
            }
        }
        for (index, contract) in contracts.iter().enumerate() {
            let target = if index % 2 == 0 {
                systems.get(index % systems.len().max(1))
            } else {
                products.get(index % products.len().max(1))
            };
            if let Some(target) = target {
                let target = target.clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Covers,
                    contract,
                    &target,
                    &[("coverage", json!("service_scope"))],
                )?;
            }
        }
        Ok(())
    }

    fn weave_initiative_edges(&self, ctx: &mut GenerationContext) -> Result<()> {
        let departments = ctx.ids_of(EntityKind::Department);
        let systems = ctx.ids_of(EntityKind::System);
        let products = ctx.ids_of(EntityKind::Product);
        let capabilities = ctx.ids_of(EntityKind::BusinessCapability);
        let risks = ctx.ids_of(EntityKind::Risk);
        let initiatives = ctx.ids_of(EntityKind::Initiative);
        for (index, initiative) in initiatives.iter().enumerate() {
            if let Some(sponsor) = departments.get(index % departments.len().max(1)) {
                let sponsor = sponsor.clone();
                self.org_fact(
                    ctx,
                    RelationshipKind::Sponsors,
                    &sponsor,
                    initiative,
                    &[("funding", json!("annual_plan"))],
                )?;
            }
            let targets: [Option<&String>; 2] = match index % 4 {
                0 => [
                    systems.get(index % systems.len().max(1)),
                    risks.get(index % risks.len().max(1)),
                ],
                1 => [products.get(index % products.len().max(1)), None],
                2 => [
                    capabilities.get(index % capabilities.len().max(1)),
                    systems.get((index + 1) % systems.len().max(1)),
                ],
                _ => [risks.get(index % risks.len().max(1)), None],
            };
            for target in targets.into_iter().flatten() {
                let target = target.clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Impacts,
                    initiative,
                    &target,
                    &[("effect", json!("planned_change"))],
                )?;
            }
        }
        Ok(())
    }

    fn weave_access(&self, ctx: &mut GenerationContext) -> Result<()> {
        let systems = ctx.ids_of(EntityKind::System);
        if systems.is_empty() {
            return Ok(());
        }
        // A sample of the workforce, not everyone: access reviews only
        // sweep a fifth of people per cycle.
        let people = ctx.ids_of(EntityKind::Person);
        for (index, person) in people.iter().enumerate() {
            if index % 5 != 0 {
                continue;
            }
            let system = systems[index % systems.len()].clone();
            self.inferred_drawn(
                ctx,
                RelationshipKind::Accesses,
                person,
                &system,
                &[("access_level", json!("standard"))],
            )?;
        }
        let assets = ctx.ids_of(EntityKind::DataAsset);
        let data_vendors: Vec<String> = ctx
            .engine
            .list_entities(Some(EntityKind::Vendor), None)
            .iter()
            .filter(|v| match &v.body {
                EntityBody::Vendor(body) => body.data_access,
                _ => false,
            })
            .map(|v| v.id.clone())
            .collect();
        for (index, vendor) in data_vendors.iter().enumerate() {
            if index % 2 != 0 {
                continue;
            }
            if let Some(asset) = assets.get(index % assets.len().max(1)) {
                let asset = asset.clone();
                self.inferred_drawn(
                    ctx,
                    RelationshipKind::Accesses,
                    vendor,
                    &asset,
                    &[("access_level", json!("scoped_api"))],
                )?;
            }
        }
        Ok(())
    }

    // -- mirror fields -------------------------------------------------

    /// One sweep over the woven edges to set the declared mirror fields:
    /// `person.holds_roles`, `person.located_at`,
    /// `role.filled_by_persons`/`headcount_filled`,
    /// `data_asset.stored_in_systems`, `system.attached_network`.
    fn populate_mirror_fields(&self, ctx: &mut GenerationContext) -> Result<()> {
        let mut holds_roles: HashMap<String, Vec<String>> = HashMap::new();
        let mut filled_by: HashMap<String, Vec<String>> = HashMap::new();
        let mut person_location: HashMap<String, String> = HashMap::new();
        let mut stored_in: HashMap<String, Vec<String>> = HashMap::new();
        let mut attached_network: HashMap<String, String> = HashMap::new();

        for relationship in ctx.engine.relationships() {
            match relationship.kind {
                RelationshipKind::HasRole => {
                    holds_roles
                        .entry(relationship.source_id.clone())
                        .or_default()
                        .push(relationship.target_id.clone());
                    filled_by
                        .entry(relationship.target_id.clone())
                        .or_default()
                        .push(relationship.source_id.clone());
                }
                RelationshipKind::LocatedAt => {
                    person_location
                        .entry(relationship.source_id.clone())
                        .or_insert_with(|| relationship.target_id.clone());
                }
                RelationshipKind::Stores => {
                    stored_in
                        .entry(relationship.target_id.clone())
                        .or_default()
                        .push(relationship.source_id.clone());
                }
                RelationshipKind::RunsOn => {
                    attached_network
                        .entry(relationship.source_id.clone())
                        .or_insert_with(|| relationship.target_id.clone());
                }
                _ => {}
            }
        }

        let entities: Vec<Entity> = ctx.engine.entities().into_iter().cloned().collect();
        for entity in entities {
            let id = entity.id.clone();
            let patched = match entity.body {
                EntityBody::Person(mut body) => {
                    let roles = holds_roles.remove(&id).unwrap_or_default();
                    let location = person_location.get(&id).cloned();
                    if roles.is_empty() && location.is_none() {
                        continue;
                    }
                    body.holds_roles = roles;
                    body.located_at = location;
                    EntityBody::Person(body)
                }
                EntityBody::Role(mut body) => {
                    let Some(persons) = filled_by.remove(&id) else {
                        continue;
                    };
                    body.headcount_filled = persons.len() as u32;
                    body.filled_by_persons = persons;
                    EntityBody::Role(body)
                }
                EntityBody::DataAsset(mut body) => {
                    let Some(systems) = stored_in.remove(&id) else {
                        continue;
                    };
                    body.stored_in_systems = systems;
                    EntityBody::DataAsset(body)
                }
                EntityBody::System(mut body) => {
                    let Some(network) = attached_network.get(&id) else {
                        continue;
                    };
                    body.attached_network = Some(network.clone());
                    EntityBody::System(body)
                }
                _ => continue,
            };
            ctx.engine
                .update_entity(&id, crate::engine::EntityPatch::body(patched))?;
        }
        Ok(())
    }
}

struct SystemInfo {
    id: String,
    kind: SystemKind,
    internet_facing: bool,
    criticality: Option<Criticality>,
}

fn systems_info(ctx: &GenerationContext) -> Vec<SystemInfo> {
    ctx.engine
        .list_entities(Some(EntityKind::System), None)
        .iter()
        .filter_map(|s| match &s.body {
            EntityBody::System(body) => Some(SystemInfo {
                id: s.id.clone(),
                kind: body.system_kind.unwrap_or(SystemKind::Application),
                internet_facing: body.internet_facing,
                criticality: body.criticality,
            }),
            _ => None,
        })
        .collect()
}

struct AssetInfo {
    id: String,
    classification: Option<DataClassification>,
    pii: bool,
}

fn assets_info(ctx: &GenerationContext) -> Vec<AssetInfo> {
    ctx.engine
        .list_entities(Some(EntityKind::DataAsset), None)
        .iter()
        .filter_map(|a| match &a.body {
            EntityBody::DataAsset(body) => Some(AssetInfo {
                id: a.id.clone(),
                classification: body.classification,
                pii: body.contains_pii,
            }),
            _ => None,
        })
        .collect()
}

fn departments_with_function(ctx: &GenerationContext, functions: &[&str]) -> Vec<String> {
    ctx.engine
        .list_entities(Some(EntityKind::Department), None)
        .iter()
        .filter(|d| match &d.body {
            EntityBody::Department(body) => functions.contains(&body.function.as_str()),
            _ => false,
        })
        .map(|d| d.id.clone())
        .collect()
}

fn data_center_sites(ctx: &GenerationContext) -> Vec<String> {
    ctx.engine
        .list_entities(Some(EntityKind::Site), None)
        .iter()
        .filter(|s| match &s.body {
            EntityBody::Site(body) => {
                body.facility == Some(crate::model::FacilityKind::DataCenter)
            }
            _ => false,
        })
        .map(|s| s.id.clone())
        .collect()
}
