//! The thirty per-kind generators, one function per entity kind.
//!
//! Every generator is a stateless function of the [`GenerationContext`]:
//! it draws its count, pulls coordinated bundles from the template
//! tables, and bulk-inserts through the engine. Counts exceeding a
//! template table cycle through it with numbered names.

use crate::error::Result;
use crate::model::{
    inherent_risk, BusinessCapabilityBody, ContractBody, ControlBody, CustomerBody,
    DataAssetBody, DataClassification, DataDomainBody, DataFlowBody, DepartmentBody, Entity,
    EntityBody, EntityKind, FacilityKind, GeographyBody, IncidentBody, InitiativeBody,
    IntegrationBody, JurisdictionBody, LocationBody, MarketSegmentBody, NetworkBody,
    OrganizationalUnitBody, PersonBody, PolicyBody, ProductBody, ProductPortfolioBody,
    RegulationBody, RiskBody, RoleBody, SecurityTier, SiteBody, SystemBody, ThreatActorBody,
    ThreatBody, VendorBody, VulnStatus, VulnerabilityBody,
};
use crate::scaling::{bounds, person_count, scaled_range};

use super::templates::{
    departments_for, facility_for_index, roles_for, CAPABILITY_TEMPLATES, CITIES, CONTRACT_KINDS,
    CONTROL_TEMPLATES, CUSTOMER_NAME_HEADS, CUSTOMER_NAME_TAILS, DATA_ASSET_TEMPLATES,
    DATA_DOMAINS, FIRST_NAMES, GEOGRAPHIES, INCIDENT_TEMPLATES, INITIATIVE_TEMPLATES,
    INTEGRATION_TEMPLATES, JURISDICTIONS, LAST_NAMES, MANAGEMENT_MARKERS, MARKET_SEGMENTS,
    NETWORK_TEMPLATES, POLICY_TEMPLATES, PORTFOLIO_NAMES, PRODUCT_TEMPLATES,
    REGULATION_TEMPLATES, RISK_TEMPLATES, SYSTEM_TEMPLATES, THREAT_ACTORS, THREAT_TEMPLATES,
    VENDOR_TEMPLATES, VULN_COMPONENTS,
};
use super::GenerationContext;

/// `base` for the first pass over a template table, `base N` afterwards.
fn numbered(base: &str, occurrence: usize) -> String {
    if occurrence == 0 {
        base.to_string()
    } else {
        format!("{base} {}", occurrence + 1)
    }
}

// -- L00 foundation ----------------------------------------------------

pub fn locations(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Location)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let city = &CITIES[index % CITIES.len()];
        let facility = facility_for_index(index);
        let label = match facility {
            FacilityKind::Headquarters => "Headquarters",
            FacilityKind::DataCenter => "Data Center",
            _ => "Office",
        };
        // Data centers always sit in the restricted physical tier.
        let tier = if facility == FacilityKind::DataCenter {
            SecurityTier::Restricted
        } else {
            SecurityTier::Internal
        };
        let capacity = match facility {
            FacilityKind::Headquarters => ctx.range_u32(300, 1500),
            FacilityKind::DataCenter => ctx.range_u32(0, 40),
            _ => ctx.range_u32(40, 400),
        };
        let id = ctx.new_id();
        out.push(
            Entity::new(
                format!("{} {}", city.city, label),
                EntityBody::Location(LocationBody {
                    facility: Some(facility),
                    city: city.city.to_string(),
                    country: city.country.to_string(),
                    region: city.region.to_string(),
                    capacity,
                    physical_security_tier: Some(tier),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} {} for {} in {}, {}",
                city.city,
                label.to_lowercase(),
                ctx.profile.name,
                city.city,
                city.country
            )),
        );
    }
    ctx.add_all(out)
}

// -- L01 compliance ----------------------------------------------------

pub fn policies(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Policy)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &POLICY_TEMPLATES[index % POLICY_TEMPLATES.len()];
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / POLICY_TEMPLATES.len()),
                EntityBody::Policy(PolicyBody {
                    policy_area: template.area.to_string(),
                    review_cycle: template.review_cycle.to_string(),
                    enforcement: template.enforcement.to_string(),
                    owner_role: None,
                }),
            )
            .with_id(id)
            .with_description(format!(
                "Sets the {} requirements every team at {} must follow, reviewed on a {} cycle",
                template.area, ctx.profile.name, template.review_cycle
            )),
        );
    }
    ctx.add_all(out)
}

pub fn regulations(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Regulation)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &REGULATION_TEMPLATES[index % REGULATION_TEMPLATES.len()];
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / REGULATION_TEMPLATES.len()),
                EntityBody::Regulation(RegulationBody {
                    authority: template.authority.to_string(),
                    domain: template.domain.to_string(),
                    scope: template.scope.to_string(),
                    max_penalty: None,
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} obligations issued by {} that bind {} systems and data handling",
                template.domain, template.authority, ctx.profile.name
            )),
        );
    }
    ctx.add_all(out)
}

pub fn controls(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Control)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &CONTROL_TEMPLATES[index % CONTROL_TEMPLATES.len()];
        let maturity = ctx.range_u32(2, 5) as u8;
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / CONTROL_TEMPLATES.len()),
                EntityBody::Control(ControlBody {
                    control_class: template.class.to_string(),
                    automation: template.automation.to_string(),
                    framework_refs: template.frameworks.iter().map(ToString::to_string).collect(),
                    maturity,
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} {} control operated at maturity level {maturity}",
                template.automation, template.class
            )),
        );
    }
    ctx.add_all(out)
}

pub fn risks(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Risk)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &RISK_TEMPLATES[index % RISK_TEMPLATES.len()];
        let inherent = inherent_risk(template.likelihood, template.impact);
        // Residual is the inherent level minus a mitigation delta,
        // clamped at the bottom of the scale.
        let delta = if template.treatment == "mitigate" {
            ctx.range_u32(1, 2) as usize
        } else {
            ctx.range_u32(0, 1) as usize
        };
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / RISK_TEMPLATES.len()),
                EntityBody::Risk(RiskBody {
                    likelihood: template.likelihood,
                    impact: template.impact,
                    inherent_level: inherent,
                    residual_level: inherent.lowered_by(delta),
                    category: template.category.to_string(),
                    treatment: template.treatment.to_string(),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} risk for {}, assessed at {} likelihood and {} impact",
                template.category, ctx.profile.name, template.likelihood, template.impact
            )),
        );
    }
    ctx.add_all(out)
}

pub fn threats(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Threat)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &THREAT_TEMPLATES[index % THREAT_TEMPLATES.len()];
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / THREAT_TEMPLATES.len()),
                EntityBody::Threat(ThreatBody {
                    threat_class: template.class.to_string(),
                    severity: Some(template.severity),
                    vector: Some(template.vector.to_string()),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} threat arriving through the {} vector, rated {}",
                template.class, template.vector, template.severity
            )),
        );
    }
    ctx.add_all(out)
}

pub fn vulnerabilities(ctx: &mut GenerationContext) -> Result<()> {
    // Derived: tracks the expected system population (systems arrive in
    // L02, so the estimate uses the scaling midpoint rather than a draw).
    let (floor, ceiling) = bounds(EntityKind::System);
    let coefficient = ctx.profile.coefficients().system;
    let (low, high) = scaled_range(ctx.profile.employee_count, coefficient, floor, ceiling);
    let count = ((low + high) / 2 * 6 / 5).clamp(6, 60) as usize;

    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let (component, severity, cvss_base) = VULN_COMPONENTS[index % VULN_COMPONENTS.len()];
        let year = ctx.range_u32(2019, 2025);
        let number = ctx.range_u32(10_000, 99_999);
        let status = match ctx.range_u32(0, 9) {
            0..=3 => VulnStatus::Open,
            4..=6 => VulnStatus::InRemediation,
            7..=8 => VulnStatus::Patched,
            _ => VulnStatus::Accepted,
        };
        // A patch always exists once remediation started or finished.
        let patch_available = match status {
            VulnStatus::Patched | VulnStatus::InRemediation => true,
            VulnStatus::Open => ctx.chance(0.6),
            VulnStatus::Accepted => ctx.chance(0.3),
        };
        let cvss_score = crate::model::round2(cvss_base + ctx.range_f64(-0.4, 0.3));
        let cve_id = format!("CVE-{year}-{number}");
        let id = ctx.new_id();
        out.push(
            Entity::new(
                format!("{cve_id} ({component})"),
                EntityBody::Vulnerability(VulnerabilityBody {
                    cve_id: Some(cve_id.clone()),
                    severity: Some(severity),
                    cvss_score,
                    status: Some(status),
                    patch_available,
                    affected_component: Some(component.to_string()),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{severity} severity flaw in {component} tracked as {cve_id}, CVSS {cvss_score}"
            )),
        );
    }
    ctx.add_all(out)
}

pub fn threat_actors(ctx: &mut GenerationContext) -> Result<()> {
    // Attribution is hard-coded per named actor; the scaled count only
    // decides how many of the twelve are in scope.
    let count = (ctx.count(EntityKind::ThreatActor)? as usize).min(THREAT_ACTORS.len());
    let mut out = Vec::with_capacity(count);
    for template in &THREAT_ACTORS[..count] {
        let id = ctx.new_id();
        out.push(
            Entity::new(
                template.name,
                EntityBody::ThreatActor(ThreatActorBody {
                    actor_class: template.class.to_string(),
                    sophistication: template.sophistication.to_string(),
                    origin: Some(template.origin.to_string()),
                    known_aliases: template.aliases.iter().map(ToString::to_string).collect(),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} actor attributed to {}, also tracked as {}",
                template.class,
                template.origin,
                template.aliases.join(", ")
            )),
        );
    }
    ctx.add_all(out)
}

pub fn incidents(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Incident)? as usize;
    let statuses = ["resolved", "post_mortem", "contained", "open"];
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &INCIDENT_TEMPLATES[index % INCIDENT_TEMPLATES.len()];
        // Older incidents dominate: most of the register is closed out.
        let status = match ctx.range_u32(0, 9) {
            0..=4 => statuses[0],
            5..=6 => statuses[1],
            7..=8 => statuses[2],
            _ => statuses[3],
        };
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / INCIDENT_TEMPLATES.len()),
                EntityBody::Incident(IncidentBody {
                    incident_class: template.class.to_string(),
                    severity: Some(template.severity),
                    status: status.to_string(),
                    root_cause: Some(template.root_cause.to_string()),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} {} incident; root cause: {}",
                template.severity, template.class, template.root_cause
            )),
        );
    }
    ctx.add_all(out)
}

// -- L02 technology ----------------------------------------------------

pub fn networks(ctx: &mut GenerationContext) -> Result<()> {
    // Derived: segmentation grows stepwise with organisation size.
    let count = match ctx.profile.employee_count {
        0..=999 => 4,
        1000..=9999 => 5,
        _ => NETWORK_TEMPLATES.len(),
    };
    let mut out = Vec::with_capacity(count);
    for template in &NETWORK_TEMPLATES[..count] {
        let id = ctx.new_id();
        out.push(
            Entity::new(
                template.name,
                EntityBody::Network(NetworkBody {
                    network_zone: template.zone.to_string(),
                    cidr: Some(template.cidr.to_string()),
                    internet_facing: template.internet_facing,
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} segment {} spanning {}",
                template.zone, template.name, template.cidr
            )),
        );
    }
    ctx.add_all(out)
}

pub fn systems(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::System)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &SYSTEM_TEMPLATES[index % SYSTEM_TEMPLATES.len()];
        let occurrence = index / SYSTEM_TEMPLATES.len();
        let environment = if occurrence > 0 && ctx.chance(0.3) {
            "staging"
        } else {
            "production"
        };
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, occurrence),
                EntityBody::System(SystemBody {
                    system_kind: Some(template.kind),
                    operating_system: Some(template.os.to_string()),
                    tech_stack: template.stack.iter().map(ToString::to_string).collect(),
                    criticality: Some(template.criticality),
                    ports: template.ports.to_vec(),
                    internet_facing: template.internet_facing,
                    environment: environment.to_string(),
                    attached_network: None,
                }),
            )
            .with_id(id)
            .with_description(format!("{} at {}", template.description, ctx.profile.name)),
        );
    }
    ctx.add_all(out)
}

pub fn integrations(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Integration)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &INTEGRATION_TEMPLATES[index % INTEGRATION_TEMPLATES.len()];
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / INTEGRATION_TEMPLATES.len()),
                EntityBody::Integration(IntegrationBody {
                    integration_style: template.style.to_string(),
                    protocol: template.protocol.to_string(),
                    direction: template.direction.to_string(),
                    auth_method: Some(template.auth.to_string()),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} {} integration over {} authenticated with {}",
                template.direction, template.style, template.protocol, template.auth
            )),
        );
    }
    ctx.add_all(out)
}

// -- L03 data ----------------------------------------------------------

pub fn data_assets(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::DataAsset)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &DATA_ASSET_TEMPLATES[index % DATA_ASSET_TEMPLATES.len()];
        let record_count = if template.format == "structured" {
            Some(10_u64.pow(ctx.range_u32(3, 8)))
        } else {
            None
        };
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / DATA_ASSET_TEMPLATES.len()),
                EntityBody::DataAsset(DataAssetBody {
                    classification: Some(template.classification),
                    format: template.format.to_string(),
                    contains_pii: template.pii,
                    record_count,
                    retention_days: Some(365 * ctx.range_u32(1, 7)),
                    stored_in_systems: Vec::new(),
                }),
            )
            .with_id(id)
            .with_description(template.description.to_string()),
        );
    }
    ctx.add_all(out)
}

pub fn data_domains(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::DataDomain)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let (name, tier) = DATA_DOMAINS[index % DATA_DOMAINS.len()];
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(name, index / DATA_DOMAINS.len()),
                EntityBody::DataDomain(DataDomainBody {
                    domain_area: name.to_lowercase(),
                    governance_tier: tier.to_string(),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{tier} data domain grouping {} assets under shared stewardship",
                name.to_lowercase()
            )),
        );
    }
    ctx.add_all(out)
}

pub fn data_flows(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::DataFlow)? as usize;
    let asset_names: Vec<String> = ctx
        .engine
        .list_entities(Some(EntityKind::DataAsset), None)
        .into_iter()
        .map(|e| e.name.clone())
        .collect();
    let frequencies = ["realtime", "hourly", "daily", "weekly", "batch"];
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let classification = match ctx.range_u32(0, 9) {
            0 => DataClassification::Public,
            1..=4 => DataClassification::Internal,
            5..=7 => DataClassification::Confidential,
            _ => DataClassification::Restricted,
        };
        // Restricted and confidential flows are always encrypted.
        let encryption_in_transit = classification.requires_encryption() || ctx.chance(0.7);
        let frequency = frequencies[ctx.range_u32(0, 4) as usize];
        let asset = asset_names
            .get(index % asset_names.len().max(1))
            .cloned()
            .unwrap_or_else(|| "Operational".to_string());
        let id = ctx.new_id();
        out.push(
            Entity::new(
                format!("{asset} {frequency} feed"),
                EntityBody::DataFlow(DataFlowBody {
                    classification: Some(classification),
                    encryption_in_transit,
                    frequency: frequency.to_string(),
                    volume_gb_per_day: Some(crate::model::round2(ctx.range_f64(0.1, 250.0))),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{frequency} movement of {} data at {classification} classification",
                asset.to_lowercase()
            )),
        );
    }
    ctx.add_all(out)
}

// -- L04 organization --------------------------------------------------

pub fn departments(ctx: &mut GenerationContext) -> Result<()> {
    let templates = departments_for(ctx.profile.industry);
    let employees = ctx.profile.employee_count;
    let mut out = Vec::new();
    for (index, template) in templates.iter().enumerate() {
        let headcount = (f64::from(employees) * template.share).round() as u32;
        let headcount = headcount.max(1);
        let root_id = ctx.new_id();
        let children = if headcount > 500 && !template.sub_departments.is_empty() {
            (template.sub_departments.len() as u32).min((headcount / 300).max(2))
        } else {
            0
        };
        // The subdivided parent keeps a small leadership-and-staff core.
        let parent_headcount = if children > 0 {
            ((f64::from(headcount) * 0.03).round() as u32).max(1)
        } else {
            headcount
        };
        out.push(
            Entity::new(
                template.name,
                EntityBody::Department(DepartmentBody {
                    headcount: parent_headcount,
                    function: template.function.to_string(),
                    cost_center: Some(format!("CC-{:03}", index + 1)),
                    parent_department_id: None,
                }),
            )
            .with_id(root_id.clone())
            .with_description(format!(
                "{} organisation at {} with {} staff",
                template.function, ctx.profile.name, headcount
            )),
        );
        if children > 0 {
            let remaining = headcount - parent_headcount;
            let per_child = remaining / children;
            let mut leftover = remaining % children;
            for sub_name in &template.sub_departments[..children as usize] {
                let mut sub_headcount = per_child;
                if leftover > 0 {
                    sub_headcount += 1;
                    leftover -= 1;
                }
                let id = ctx.new_id();
                out.push(
                    Entity::new(
                        *sub_name,
                        EntityBody::Department(DepartmentBody {
                            headcount: sub_headcount,
                            function: template.function.to_string(),
                            cost_center: Some(format!("CC-{:03}", index + 1)),
                            parent_department_id: Some(root_id.clone()),
                        }),
                    )
                    .with_id(id)
                    .with_description(format!(
                        "{sub_name} group within {} ({} staff)",
                        template.name, sub_headcount
                    )),
                );
            }
        }
    }
    ctx.add_all(out)
}

pub fn organizational_units(ctx: &mut GenerationContext) -> Result<()> {
    const UNIT_TEMPLATES: &[(&str, &str)] = &[
        ("Global Operations", "division"),
        ("North America", "region"),
        ("EMEA", "region"),
        ("APAC", "region"),
        ("Corporate Services", "business_unit"),
        ("Shared Technology", "business_unit"),
        ("Emerging Markets", "region"),
        ("Digital Ventures", "subsidiary"),
        ("Latin America", "region"),
        ("Public Sector Unit", "business_unit"),
        ("Research Group", "subsidiary"),
        ("Holdings", "division"),
    ];
    let count = (ctx.count(EntityKind::OrganizationalUnit)? as usize).min(UNIT_TEMPLATES.len());
    let per_unit = ctx.profile.employee_count / count.max(1) as u32;
    let mut out = Vec::with_capacity(count);
    for (name, unit_kind) in &UNIT_TEMPLATES[..count] {
        let id = ctx.new_id();
        out.push(
            Entity::new(
                *name,
                EntityBody::OrganizationalUnit(OrganizationalUnitBody {
                    unit_kind: (*unit_kind).to_string(),
                    headcount: per_unit,
                }),
            )
            .with_id(id)
            .with_description(format!("{unit_kind} of {} covering {name}", ctx.profile.name)),
        );
    }
    ctx.add_all(out)
}

// -- L05 people --------------------------------------------------------

/// Leaf departments: subdivided children plus undivided roots.
fn leaf_departments(ctx: &GenerationContext) -> Vec<(String, String, String, u32)> {
    let departments = ctx.engine.list_entities(Some(EntityKind::Department), None);
    let parent_ids: std::collections::HashSet<String> = departments
        .iter()
        .filter_map(|d| match &d.body {
            EntityBody::Department(body) => body.parent_department_id.clone(),
            _ => None,
        })
        .collect();
    departments
        .iter()
        .filter(|d| !parent_ids.contains(&d.id))
        .filter_map(|d| match &d.body {
            EntityBody::Department(body) => Some((
                d.id.clone(),
                d.name.clone(),
                body.function.clone(),
                body.headcount,
            )),
            _ => None,
        })
        .collect()
}

pub fn roles(ctx: &mut GenerationContext) -> Result<()> {
    let leaves = leaf_departments(ctx);
    let mut out = Vec::new();
    for (dept_id, dept_name, function, headcount) in &leaves {
        let mut role_ids = Vec::new();
        for template in roles_for(function) {
            let is_management = MANAGEMENT_MARKERS
                .iter()
                .any(|marker| template.title.contains(marker));
            let id = ctx.new_id();
            role_ids.push(id.clone());
            out.push(
                Entity::new(
                    format!("{} - {dept_name}", template.title),
                    EntityBody::Role(RoleBody {
                        role_level: template.level.to_string(),
                        role_family: template.family.to_string(),
                        filled_by_persons: Vec::new(),
                        headcount_filled: 0,
                    }),
                )
                .with_id(id)
                .with_description(format!(
                    "{} position in {dept_name}",
                    template.title
                )),
            );
            if is_management {
                continue;
            }
            // Seniority expansion by department headcount.
            let variants: &[&str] = if *headcount >= 500 {
                &["Junior", "Senior", "Staff"]
            } else if *headcount >= 300 {
                &["Junior", "Senior"]
            } else if *headcount >= 100 {
                &["Senior"]
            } else {
                &[]
            };
            for variant in variants {
                let id = ctx.new_id();
                role_ids.push(id.clone());
                out.push(
                    Entity::new(
                        format!("{variant} {} - {dept_name}", template.title),
                        EntityBody::Role(RoleBody {
                            role_level: variant.to_lowercase(),
                            role_family: template.family.to_string(),
                            filled_by_persons: Vec::new(),
                            headcount_filled: 0,
                        }),
                    )
                    .with_id(id)
                    .with_description(format!(
                        "{variant} {} position in {dept_name}",
                        template.title
                    )),
                );
            }
        }
        ctx.department_roles.insert(dept_id.clone(), role_ids);
    }
    ctx.add_all(out)
}

pub fn people(ctx: &mut GenerationContext) -> Result<()> {
    let total = person_count(ctx.profile.employee_count) as usize;
    let leaves = leaf_departments(ctx);
    let total_headcount: u32 = leaves.iter().map(|(_, _, _, h)| *h).sum();

    // Headcount-proportional quotas with remainder rounding: floors
    // first, then the largest fractional parts absorb the remainder.
    let mut quotas: Vec<(usize, usize, f64)> = leaves
        .iter()
        .enumerate()
        .map(|(i, (_, _, _, headcount))| {
            let exact =
                total as f64 * f64::from(*headcount) / f64::from(total_headcount.max(1));
            (i, exact as usize, exact.fract())
        })
        .collect();
    let assigned: usize = quotas.iter().map(|(_, floor, _)| floor).sum();
    let mut remainder = total.saturating_sub(assigned);
    quotas.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    for quota in quotas.iter_mut() {
        if remainder == 0 {
            break;
        }
        quota.1 += 1;
        remainder -= 1;
    }
    quotas.sort_by_key(|(i, _, _)| *i);

    let domain: String = ctx
        .profile
        .name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();
    let mut out = Vec::with_capacity(total);
    let mut assignments = Vec::with_capacity(total);
    let mut serial = 0usize;
    for (leaf_index, quota, _) in quotas {
        let (dept_id, dept_name, _, _) = &leaves[leaf_index];
        for _ in 0..quota {
            let first = *ctx.pick(FIRST_NAMES);
            let last = *ctx.pick(LAST_NAMES);
            serial += 1;
            let employment = if ctx.chance(0.9) { "full_time" } else { "contractor" };
            let id = ctx.new_id();
            assignments.push((id.clone(), dept_id.clone()));
            out.push(
                Entity::new(
                    format!("{first} {last}"),
                    EntityBody::Person(PersonBody {
                        email: format!(
                            "{}.{}{serial}@{domain}.example.com",
                            first.to_lowercase(),
                            last.to_lowercase()
                        ),
                        employment: employment.to_string(),
                        holds_roles: Vec::new(),
                        located_at: None,
                    }),
                )
                .with_id(id)
                .with_description(format!("{first} {last} works in {dept_name}")),
            );
        }
    }
    ctx.person_assignments = assignments;
    ctx.add_all(out)
}

// -- L06 capabilities --------------------------------------------------

pub fn business_capabilities(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::BusinessCapability)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let (name, tier, criticality) = CAPABILITY_TEMPLATES[index % CAPABILITY_TEMPLATES.len()];
        let maturity = ctx.range_u32(2, 5) as u8;
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(name, index / CAPABILITY_TEMPLATES.len()),
                EntityBody::BusinessCapability(BusinessCapabilityBody {
                    capability_tier: tier.to_string(),
                    maturity,
                    criticality: Some(criticality),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{tier} capability of {} operating at maturity {maturity}",
                ctx.profile.name
            )),
        );
    }
    ctx.add_all(out)
}

// -- L07 locations -----------------------------------------------------

pub fn sites(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Site)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let city = &CITIES[(index + 5) % CITIES.len()];
        let facility = facility_for_index(index);
        // Data-center sites are always in the restricted physical tier.
        let tier = if facility == FacilityKind::DataCenter {
            SecurityTier::Restricted
        } else {
            SecurityTier::Internal
        };
        let label = match facility {
            FacilityKind::Headquarters => "Campus",
            FacilityKind::DataCenter => "DC",
            _ => "Site",
        };
        let id = ctx.new_id();
        out.push(
            Entity::new(
                format!("{} {label}", city.city),
                EntityBody::Site(SiteBody {
                    facility: Some(facility),
                    physical_security_tier: Some(tier),
                    capacity: ctx.range_u32(20, 800),
                    city: city.city.to_string(),
                    country: city.country.to_string(),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "Physical {} operated in {}, {}",
                label.to_lowercase(),
                city.city,
                city.country
            )),
        );
    }
    ctx.add_all(out)
}

pub fn geographies(ctx: &mut GenerationContext) -> Result<()> {
    let count = (ctx.count(EntityKind::Geography)? as usize).min(GEOGRAPHIES.len());
    let mut out = Vec::with_capacity(count);
    for (name, scope, iso) in &GEOGRAPHIES[..count] {
        let id = ctx.new_id();
        out.push(
            Entity::new(
                *name,
                EntityBody::Geography(GeographyBody {
                    geo_scope: (*scope).to_string(),
                    iso_code: Some((*iso).to_string()),
                }),
            )
            .with_id(id)
            .with_description(format!("Operating {scope} {name} for market and residency scoping")),
        );
    }
    ctx.add_all(out)
}

pub fn jurisdictions(ctx: &mut GenerationContext) -> Result<()> {
    let count = (ctx.count(EntityKind::Jurisdiction)? as usize).min(JURISDICTIONS.len());
    let mut out = Vec::with_capacity(count);
    for (name, legal, density) in &JURISDICTIONS[..count] {
        let id = ctx.new_id();
        out.push(
            Entity::new(
                *name,
                EntityBody::Jurisdiction(JurisdictionBody {
                    legal_system: (*legal).to_string(),
                    regulatory_density: (*density).to_string(),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{name} jurisdiction ({legal}) with {density} regulatory density"
            )),
        );
    }
    ctx.add_all(out)
}

// -- L08 products ------------------------------------------------------

pub fn product_portfolios(ctx: &mut GenerationContext) -> Result<()> {
    let count = (ctx.count(EntityKind::ProductPortfolio)? as usize).min(PORTFOLIO_NAMES.len());
    let share = crate::model::round2(1.0 / count.max(1) as f64);
    let mut out = Vec::with_capacity(count);
    for (name, lifecycle) in &PORTFOLIO_NAMES[..count] {
        let id = ctx.new_id();
        out.push(
            Entity::new(
                *name,
                EntityBody::ProductPortfolio(ProductPortfolioBody {
                    lifecycle: (*lifecycle).to_string(),
                    revenue_share: share,
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{lifecycle} portfolio grouping {} offerings",
                name.to_lowercase()
            )),
        );
    }
    ctx.add_all(out)
}

pub fn products(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Product)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let (name, stage, criticality) = PRODUCT_TEMPLATES[index % PRODUCT_TEMPLATES.len()];
        let annual_revenue = if stage == "ga" {
            Some((ctx.range_f64(0.5, 80.0) * 1e6).round())
        } else {
            None
        };
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(name, index / PRODUCT_TEMPLATES.len()),
                EntityBody::Product(ProductBody {
                    stage: stage.to_string(),
                    criticality: Some(criticality),
                    annual_revenue,
                }),
            )
            .with_id(id)
            .with_description(format!("{stage} offering {name} sold by {}", ctx.profile.name)),
        );
    }
    ctx.add_all(out)
}

// -- L09 customers -----------------------------------------------------

pub fn market_segments(ctx: &mut GenerationContext) -> Result<()> {
    let count = (ctx.count(EntityKind::MarketSegment)? as usize).min(MARKET_SEGMENTS.len());
    let mut out = Vec::with_capacity(count);
    for (name, size) in &MARKET_SEGMENTS[..count] {
        let id = ctx.new_id();
        out.push(
            Entity::new(
                *name,
                EntityBody::MarketSegment(MarketSegmentBody {
                    segment_size: (*size).to_string(),
                    vertical: None,
                }),
            )
            .with_id(id)
            .with_description(format!("{size} market segment targeted as {name}")),
        );
    }
    ctx.add_all(out)
}

pub fn customers(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Customer)? as usize;
    let tiers = ["strategic", "enterprise", "mid_market", "smb"];
    let combos = CUSTOMER_NAME_HEADS.len() * CUSTOMER_NAME_TAILS.len();
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let head = CUSTOMER_NAME_HEADS[index % CUSTOMER_NAME_HEADS.len()];
        let tail = CUSTOMER_NAME_TAILS[(index / CUSTOMER_NAME_HEADS.len()) % CUSTOMER_NAME_TAILS.len()];
        let name = numbered(&format!("{head} {tail}"), index / combos);
        let tier = tiers[(ctx.range_u32(0, 9) as usize).min(3)];
        let annual_value = (ctx.range_f64(5.0, 900.0) * 1000.0).round();
        let region = ctx.pick(CITIES).region;
        let id = ctx.new_id();
        out.push(
            Entity::new(
                name.clone(),
                EntityBody::Customer(CustomerBody {
                    tier: tier.to_string(),
                    region: Some(region.to_string()),
                    annual_value: Some(annual_value),
                }),
            )
            .with_id(id)
            .with_description(format!("{tier} account {name} served from {region}")),
        );
    }
    ctx.add_all(out)
}

// -- L10 vendors -------------------------------------------------------

pub fn vendors(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Vendor)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let template = &VENDOR_TEMPLATES[index % VENDOR_TEMPLATES.len()];
        // Data-handling vendors carry at least a medium residual rating.
        let risk_rating = if template.data_access {
            crate::model::RiskLevel::ALL[ctx.range_u32(2, 3) as usize]
        } else {
            crate::model::RiskLevel::ALL[ctx.range_u32(0, 2) as usize]
        };
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(template.name, index / VENDOR_TEMPLATES.len()),
                EntityBody::Vendor(VendorBody {
                    tier: template.tier.to_string(),
                    service_category: template.category.to_string(),
                    risk_rating: Some(risk_rating),
                    data_access: template.data_access,
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{} supplier of {} services{}",
                template.tier,
                template.category,
                if template.data_access {
                    " with access to internal data"
                } else {
                    ""
                }
            )),
        );
    }
    ctx.add_all(out)
}

pub fn contracts(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Contract)? as usize;
    let vendor_names: Vec<String> = ctx
        .engine
        .list_entities(Some(EntityKind::Vendor), None)
        .into_iter()
        .map(|e| e.name.clone())
        .collect();
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let vendor = vendor_names
            .get(index % vendor_names.len().max(1))
            .cloned()
            .unwrap_or_else(|| "Framework".to_string());
        let kind = CONTRACT_KINDS[index % CONTRACT_KINDS.len()];
        let annual_value = (ctx.range_f64(10.0, 2500.0) * 1000.0).round();
        let auto_renew = ctx.chance(0.6);
        let id = ctx.new_id();
        out.push(
            Entity::new(
                format!("{vendor} {} Agreement", kind.to_uppercase().replace('_', " ")),
                EntityBody::Contract(ContractBody {
                    contract_kind: kind.to_string(),
                    annual_value,
                    auto_renew,
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{kind} agreement with {vendor} worth {annual_value:.0} per year"
            )),
        );
    }
    ctx.add_all(out)
}

// -- L11 initiatives ---------------------------------------------------

pub fn initiatives(ctx: &mut GenerationContext) -> Result<()> {
    let count = ctx.count(EntityKind::Initiative)? as usize;
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let (name, class, status) = INITIATIVE_TEMPLATES[index % INITIATIVE_TEMPLATES.len()];
        let budget = (ctx.range_f64(50.0, 5000.0) * 1000.0).round();
        let id = ctx.new_id();
        out.push(
            Entity::new(
                numbered(name, index / INITIATIVE_TEMPLATES.len()),
                EntityBody::Initiative(InitiativeBody {
                    initiative_class: class.to_string(),
                    status: status.to_string(),
                    budget: Some(budget),
                }),
            )
            .with_id(id)
            .with_description(format!(
                "{class} initiative currently {status} with a {budget:.0} budget"
            )),
        );
    }
    ctx.add_all(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::default_engine;
    use crate::scaling::{Industry, OrgProfile};

    fn ctx(employees: u32) -> GenerationContext {
        let profile = OrgProfile::new("Acme Robotics", Industry::Technology, employees);
        GenerationContext::new(profile, default_engine()).unwrap()
    }

    #[test]
    fn test_locations_respect_data_center_tier() {
        let mut ctx = ctx(5000);
        locations(&mut ctx).unwrap();
        for entity in ctx.engine.list_entities(Some(EntityKind::Location), None) {
            if let EntityBody::Location(body) = &entity.body {
                if body.facility == Some(FacilityKind::DataCenter) {
                    assert_eq!(body.physical_security_tier, Some(SecurityTier::Restricted));
                }
            }
        }
    }

    #[test]
    fn test_risks_satisfy_matrix() {
        let mut ctx = ctx(2000);
        risks(&mut ctx).unwrap();
        let risks = ctx.engine.list_entities(Some(EntityKind::Risk), None);
        assert!(!risks.is_empty());
        for entity in risks {
            if let EntityBody::Risk(body) = &entity.body {
                assert_eq!(body.inherent_level, inherent_risk(body.likelihood, body.impact));
                assert!(body.residual_level <= body.inherent_level);
            }
        }
    }

    #[test]
    fn test_threat_actor_attribution_is_fixed() {
        let mut a = ctx(5000);
        threat_actors(&mut a).unwrap();
        let actors = a.engine.list_entities(Some(EntityKind::ThreatActor), None);
        assert!(actors.len() >= 4);
        let apt28 = actors.iter().find(|e| e.name == "APT28").unwrap();
        if let EntityBody::ThreatActor(body) = &apt28.body {
            assert_eq!(body.origin.as_deref(), Some("Russia"));
            assert!(body.known_aliases.contains(&"Fancy Bear".to_string()));
        }
    }

    #[test]
    fn test_department_subdivision_at_scale() {
        let mut ctx = ctx(14_000);
        departments(&mut ctx).unwrap();
        let departments = ctx.engine.list_entities(Some(EntityKind::Department), None);
        let engineering = departments
            .iter()
            .find(|d| d.name == "Engineering")
            .unwrap();
        if let EntityBody::Department(body) = &engineering.body {
            assert!(body.parent_department_id.is_none());
        }
        let children: Vec<_> = departments
            .iter()
            .filter(|d| match &d.body {
                EntityBody::Department(body) => {
                    body.parent_department_id.as_deref() == Some(engineering.id.as_str())
                }
                _ => false,
            })
            .collect();
        assert!(children.len() >= 5, "got {} children", children.len());
        // Children carry nearly all of the computed headcount.
        let child_total: u32 = children
            .iter()
            .map(|d| match &d.body {
                EntityBody::Department(body) => body.headcount,
                _ => 0,
            })
            .sum();
        assert!(child_total > 4000);
    }

    #[test]
    fn test_no_subdivision_for_small_org() {
        let mut ctx = ctx(200);
        departments(&mut ctx).unwrap();
        for entity in ctx.engine.list_entities(Some(EntityKind::Department), None) {
            if let EntityBody::Department(body) = &entity.body {
                assert!(body.parent_department_id.is_none());
            }
        }
    }

    #[test]
    fn test_role_expansion_thresholds() {
        let mut ctx = ctx(14_000);
        departments(&mut ctx).unwrap();
        roles(&mut ctx).unwrap();
        let roles = ctx.engine.list_entities(Some(EntityKind::Role), None);
        assert!(roles.iter().any(|r| r.name.starts_with("Senior ")));
        assert!(roles.iter().any(|r| r.name.starts_with("Staff ")));
        // Management titles never get seniority variants.
        for role in &roles {
            assert!(!role.name.starts_with("Junior Engineering Manager"));
            assert!(!role.name.starts_with("Senior Engineering Manager"));
        }
    }

    #[test]
    fn test_people_distribution_sums_to_sample() {
        let mut ctx = ctx(1000);
        departments(&mut ctx).unwrap();
        people(&mut ctx).unwrap();
        let persons = ctx.engine.list_entities(Some(EntityKind::Person), None);
        assert_eq!(persons.len(), person_count(1000) as usize);
        assert_eq!(ctx.person_assignments.len(), persons.len());
        // Every assignment target is a real department.
        for (_, dept_id) in &ctx.person_assignments {
            assert!(ctx.engine.get_entity(dept_id).is_ok());
        }
    }

    #[test]
    fn test_data_flows_encrypt_sensitive_classifications() {
        let mut ctx = ctx(3000);
        data_assets(&mut ctx).unwrap();
        data_flows(&mut ctx).unwrap();
        for entity in ctx.engine.list_entities(Some(EntityKind::DataFlow), None) {
            if let EntityBody::DataFlow(body) = &entity.body {
                if body.classification.is_some_and(|c| c.requires_encryption()) {
                    assert!(body.encryption_in_transit);
                }
            }
        }
    }

    #[test]
    fn test_vulnerability_patch_correlation() {
        let mut ctx = ctx(3000);
        vulnerabilities(&mut ctx).unwrap();
        for entity in ctx.engine.list_entities(Some(EntityKind::Vulnerability), None) {
            if let EntityBody::Vulnerability(body) = &entity.body {
                if matches!(body.status, Some(VulnStatus::Patched | VulnStatus::InRemediation)) {
                    assert!(body.patch_available);
                }
            }
        }
    }
}
