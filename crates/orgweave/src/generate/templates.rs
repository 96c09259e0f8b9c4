//! Coordinated template tables for the synthetic generators.
//!
//! A template is an atomic bundle of correlated field values: drawing
//! one template pins every field in it, so a generated system never ends
//! up with, say, a PostgreSQL stack on a network appliance. Generators
//! draw bundles with the seeded RNG and interpolate entity-specific
//! values into the descriptions.

use crate::model::{Criticality, DataClassification, FacilityKind, RiskLevel, Severity, SystemKind};
use crate::scaling::Industry;

pub const FIRST_NAMES: &[&str] = &[
    "Ava", "Liam", "Maya", "Noah", "Zoe", "Ethan", "Priya", "Lucas", "Ines", "Mateo", "Sofia",
    "James", "Leila", "Oliver", "Nina", "Elias", "Grace", "Hugo", "Amara", "Felix", "Jade",
    "Marcus", "Yuki", "Daniel", "Carmen", "Tomas", "Aisha", "Viktor", "Elena", "Omar", "Hannah",
    "Diego", "Freya", "Samuel", "Alma", "Ravi", "Clara", "Jonas", "Mei", "Adrian",
];

pub const LAST_NAMES: &[&str] = &[
    "Alvarez", "Baker", "Chen", "Dubois", "Eriksen", "Fischer", "Garcia", "Haddad", "Ivanov",
    "Jansen", "Kowalski", "Larsen", "Moreau", "Nakamura", "Okafor", "Patel", "Quinn", "Rossi",
    "Sato", "Tanaka", "Ueda", "Varga", "Weber", "Xu", "Yilmaz", "Zhang", "Andersson", "Brennan",
    "Costa", "Dimitrov", "Engel", "Ferreira", "Gallo", "Hoffmann", "Iqbal", "Johansson", "Khan",
    "Lindqvist", "Marino", "Novak",
];

/// City bundles for locations and sites.
pub struct CityTemplate {
    pub city: &'static str,
    pub country: &'static str,
    pub region: &'static str,
}

pub const CITIES: &[CityTemplate] = &[
    CityTemplate { city: "San Francisco", country: "United States", region: "AMER" },
    CityTemplate { city: "New York", country: "United States", region: "AMER" },
    CityTemplate { city: "Austin", country: "United States", region: "AMER" },
    CityTemplate { city: "Toronto", country: "Canada", region: "AMER" },
    CityTemplate { city: "Sao Paulo", country: "Brazil", region: "AMER" },
    CityTemplate { city: "London", country: "United Kingdom", region: "EMEA" },
    CityTemplate { city: "Dublin", country: "Ireland", region: "EMEA" },
    CityTemplate { city: "Amsterdam", country: "Netherlands", region: "EMEA" },
    CityTemplate { city: "Berlin", country: "Germany", region: "EMEA" },
    CityTemplate { city: "Zurich", country: "Switzerland", region: "EMEA" },
    CityTemplate { city: "Tel Aviv", country: "Israel", region: "EMEA" },
    CityTemplate { city: "Singapore", country: "Singapore", region: "APAC" },
    CityTemplate { city: "Sydney", country: "Australia", region: "APAC" },
    CityTemplate { city: "Tokyo", country: "Japan", region: "APAC" },
    CityTemplate { city: "Bengaluru", country: "India", region: "APAC" },
    CityTemplate { city: "Seoul", country: "South Korea", region: "APAC" },
];

/// Root department bundle. `share` apportions the employee count;
/// `sub_departments` is the subdivision template set for that
/// department (3-10 children each, per industry).
pub struct DepartmentTemplate {
    pub name: &'static str,
    pub function: &'static str,
    pub share: f64,
    pub sub_departments: &'static [&'static str],
}

pub const TECHNOLOGY_DEPARTMENTS: &[DepartmentTemplate] = &[
    DepartmentTemplate {
        name: "Engineering",
        function: "engineering",
        share: 0.35,
        sub_departments: &[
            "Platform Engineering",
            "Product Engineering",
            "Infrastructure",
            "Site Reliability",
            "Security Engineering",
            "Data Engineering",
            "QA & Release",
            "Developer Experience",
        ],
    },
    DepartmentTemplate {
        name: "Sales",
        function: "sales",
        share: 0.16,
        sub_departments: &[
            "Enterprise Sales",
            "Mid-Market Sales",
            "Sales Development",
            "Sales Engineering",
            "Partnerships",
        ],
    },
    DepartmentTemplate {
        name: "Marketing",
        function: "marketing",
        share: 0.08,
        sub_departments: &["Demand Generation", "Product Marketing", "Brand & Communications", "Events"],
    },
    DepartmentTemplate {
        name: "Customer Success",
        function: "customer_success",
        share: 0.12,
        sub_departments: &["Onboarding", "Technical Support", "Renewals", "Professional Services"],
    },
    DepartmentTemplate {
        name: "Product",
        function: "product",
        share: 0.07,
        sub_departments: &["Product Management", "Product Design", "User Research"],
    },
    DepartmentTemplate {
        name: "Finance",
        function: "finance",
        share: 0.06,
        sub_departments: &["Accounting", "Financial Planning", "Procurement", "Payroll"],
    },
    DepartmentTemplate {
        name: "People Operations",
        function: "hr",
        share: 0.05,
        sub_departments: &["Talent Acquisition", "People Partners", "Total Rewards", "Learning & Development"],
    },
    DepartmentTemplate {
        name: "IT",
        function: "it",
        share: 0.06,
        sub_departments: &["Corporate IT", "Identity & Access", "End User Computing", "IT Service Desk"],
    },
    DepartmentTemplate {
        name: "Legal",
        function: "legal",
        share: 0.03,
        sub_departments: &["Commercial Legal", "Privacy & Compliance", "Intellectual Property"],
    },
    DepartmentTemplate {
        name: "Security",
        function: "security",
        share: 0.02,
        sub_departments: &["Security Operations", "Governance Risk & Compliance", "Product Security"],
    },
];

pub const FINANCIAL_DEPARTMENTS: &[DepartmentTemplate] = &[
    DepartmentTemplate {
        name: "Retail Banking",
        function: "retail_banking",
        share: 0.22,
        sub_departments: &["Branch Network", "Digital Banking", "Consumer Lending", "Cards & Payments", "Deposits"],
    },
    DepartmentTemplate {
        name: "Corporate Banking",
        function: "corporate_banking",
        share: 0.14,
        sub_departments: &["Commercial Lending", "Trade Finance", "Treasury Services", "Capital Markets"],
    },
    DepartmentTemplate {
        name: "Risk Management",
        function: "risk",
        share: 0.1,
        sub_departments: &["Credit Risk", "Market Risk", "Operational Risk", "Model Risk"],
    },
    DepartmentTemplate {
        name: "Compliance",
        function: "compliance",
        share: 0.07,
        sub_departments: &["Financial Crime", "Regulatory Affairs", "Surveillance"],
    },
    DepartmentTemplate {
        name: "Technology",
        function: "engineering",
        share: 0.2,
        sub_departments: &[
            "Core Banking Systems",
            "Payments Engineering",
            "Data Platforms",
            "Cybersecurity",
            "Infrastructure & Cloud",
            "Quality Engineering",
        ],
    },
    DepartmentTemplate {
        name: "Operations",
        function: "operations",
        share: 0.13,
        sub_departments: &["Payment Operations", "Loan Servicing", "Client Onboarding", "Reconciliation"],
    },
    DepartmentTemplate {
        name: "Finance",
        function: "finance",
        share: 0.06,
        sub_departments: &["Financial Control", "Regulatory Reporting", "Tax", "Treasury"],
    },
    DepartmentTemplate {
        name: "Human Resources",
        function: "hr",
        share: 0.05,
        sub_departments: &["Talent", "Reward", "Employee Relations"],
    },
    DepartmentTemplate {
        name: "Legal",
        function: "legal",
        share: 0.03,
        sub_departments: &["Corporate Legal", "Litigation", "Contracts"],
    },
];

pub const HEALTHCARE_DEPARTMENTS: &[DepartmentTemplate] = &[
    DepartmentTemplate {
        name: "Clinical Operations",
        function: "clinical",
        share: 0.3,
        sub_departments: &["Nursing", "Physician Services", "Pharmacy", "Laboratory", "Imaging", "Emergency Services"],
    },
    DepartmentTemplate {
        name: "Patient Services",
        function: "patient_services",
        share: 0.14,
        sub_departments: &["Admissions", "Scheduling", "Patient Billing", "Care Coordination"],
    },
    DepartmentTemplate {
        name: "Revenue Cycle",
        function: "finance",
        share: 0.09,
        sub_departments: &["Coding", "Claims", "Collections"],
    },
    DepartmentTemplate {
        name: "Health Information",
        function: "data",
        share: 0.07,
        sub_departments: &["Medical Records", "Clinical Data", "Release of Information"],
    },
    DepartmentTemplate {
        name: "Information Technology",
        function: "engineering",
        share: 0.12,
        sub_departments: &["EHR Systems", "Clinical Engineering", "Infrastructure", "Security", "Interoperability"],
    },
    DepartmentTemplate {
        name: "Quality & Safety",
        function: "quality",
        share: 0.06,
        sub_departments: &["Patient Safety", "Accreditation", "Infection Prevention"],
    },
    DepartmentTemplate {
        name: "Compliance",
        function: "compliance",
        share: 0.05,
        sub_departments: &["Privacy Office", "Regulatory Compliance", "Audit"],
    },
    DepartmentTemplate {
        name: "Administration",
        function: "operations",
        share: 0.1,
        sub_departments: &["Facilities", "Supply Chain", "Food Services", "Environmental Services"],
    },
    DepartmentTemplate {
        name: "Human Resources",
        function: "hr",
        share: 0.07,
        sub_departments: &["Recruitment", "Credentialing", "Benefits"],
    },
];

#[must_use]
pub fn departments_for(industry: Industry) -> &'static [DepartmentTemplate] {
    match industry {
        Industry::Technology => TECHNOLOGY_DEPARTMENTS,
        Industry::FinancialServices => FINANCIAL_DEPARTMENTS,
        Industry::Healthcare => HEALTHCARE_DEPARTMENTS,
    }
}

/// Base role bundle per department function.
pub struct RoleTemplate {
    pub title: &'static str,
    pub level: &'static str,
    pub family: &'static str,
}

#[must_use]
pub fn roles_for(function: &str) -> &'static [RoleTemplate] {
    match function {
        "engineering" => &[
            RoleTemplate { title: "Software Engineer", level: "ic", family: "engineering" },
            RoleTemplate { title: "Engineering Manager", level: "manager", family: "engineering" },
            RoleTemplate { title: "Systems Architect", level: "ic", family: "engineering" },
        ],
        "sales" => &[
            RoleTemplate { title: "Account Executive", level: "ic", family: "sales" },
            RoleTemplate { title: "Sales Manager", level: "manager", family: "sales" },
            RoleTemplate { title: "Solutions Consultant", level: "ic", family: "sales" },
        ],
        "marketing" => &[
            RoleTemplate { title: "Marketing Specialist", level: "ic", family: "marketing" },
            RoleTemplate { title: "Marketing Director", level: "director", family: "marketing" },
        ],
        "finance" => &[
            RoleTemplate { title: "Financial Analyst", level: "ic", family: "finance" },
            RoleTemplate { title: "Controller", level: "manager", family: "finance" },
            RoleTemplate { title: "Accountant", level: "ic", family: "finance" },
        ],
        "hr" => &[
            RoleTemplate { title: "People Partner", level: "ic", family: "hr" },
            RoleTemplate { title: "Recruiter", level: "ic", family: "hr" },
            RoleTemplate { title: "HR Manager", level: "manager", family: "hr" },
        ],
        "legal" => &[
            RoleTemplate { title: "Counsel", level: "ic", family: "legal" },
            RoleTemplate { title: "Paralegal", level: "ic", family: "legal" },
        ],
        "security" => &[
            RoleTemplate { title: "Security Analyst", level: "ic", family: "security" },
            RoleTemplate { title: "Security Engineer", level: "ic", family: "security" },
            RoleTemplate { title: "CISO", level: "c_level", family: "security" },
        ],
        "it" => &[
            RoleTemplate { title: "IT Support Specialist", level: "ic", family: "it" },
            RoleTemplate { title: "Systems Administrator", level: "ic", family: "it" },
            RoleTemplate { title: "IT Manager", level: "manager", family: "it" },
        ],
        "clinical" => &[
            RoleTemplate { title: "Registered Nurse", level: "ic", family: "clinical" },
            RoleTemplate { title: "Physician", level: "ic", family: "clinical" },
            RoleTemplate { title: "Charge Nurse", level: "manager", family: "clinical" },
        ],
        "risk" | "compliance" | "quality" => &[
            RoleTemplate { title: "Risk Analyst", level: "ic", family: "risk" },
            RoleTemplate { title: "Compliance Officer", level: "ic", family: "risk" },
            RoleTemplate { title: "Risk Manager", level: "manager", family: "risk" },
        ],
        _ => &[
            RoleTemplate { title: "Operations Analyst", level: "ic", family: "operations" },
            RoleTemplate { title: "Operations Manager", level: "manager", family: "operations" },
            RoleTemplate { title: "Program Coordinator", level: "ic", family: "operations" },
        ],
    }
}

/// Titles containing these markers are management-track and exempt from
/// seniority expansion.
pub const MANAGEMENT_MARKERS: &[&str] = &["Manager", "Director", "VP", "Chief", "CISO", "Head of"];

/// A coordinated system bundle: one draw pins name, archetype, OS, tech
/// stack, ports, criticality, environment, and description together.
pub struct SystemTemplate {
    pub name: &'static str,
    pub kind: SystemKind,
    pub os: &'static str,
    pub stack: &'static [&'static str],
    pub ports: &'static [u16],
    pub criticality: Criticality,
    pub internet_facing: bool,
    pub description: &'static str,
}

pub const SYSTEM_TEMPLATES: &[SystemTemplate] = &[
    SystemTemplate {
        name: "Customer Portal",
        kind: SystemKind::Application,
        os: "Ubuntu 22.04",
        stack: &["React", "Node.js", "PostgreSQL"],
        ports: &[443],
        criticality: Criticality::Critical,
        internet_facing: true,
        description: "Public web portal where customers sign in, manage subscriptions, and raise support requests",
    },
    SystemTemplate {
        name: "Billing Engine",
        kind: SystemKind::Application,
        os: "Debian 12",
        stack: &["Java", "Spring Boot", "Oracle"],
        ports: &[8443],
        criticality: Criticality::Critical,
        internet_facing: false,
        description: "Computes invoices, proration, and dunning for every active contract",
    },
    SystemTemplate {
        name: "Identity Provider",
        kind: SystemKind::Application,
        os: "Amazon Linux 2023",
        stack: &["Go", "Redis", "PostgreSQL"],
        ports: &[443, 636],
        criticality: Criticality::Critical,
        internet_facing: true,
        description: "Single sign-on and MFA front door for workforce and customer identities",
    },
    SystemTemplate {
        name: "Data Warehouse",
        kind: SystemKind::Database,
        os: "Managed",
        stack: &["Snowflake", "dbt"],
        ports: &[443],
        criticality: Criticality::High,
        internet_facing: false,
        description: "Analytical store consolidating product, finance, and operational marts",
    },
    SystemTemplate {
        name: "Orders Database",
        kind: SystemKind::Database,
        os: "Ubuntu 22.04",
        stack: &["PostgreSQL", "pgbouncer"],
        ports: &[5432],
        criticality: Criticality::Critical,
        internet_facing: false,
        description: "Primary transactional store for orders and entitlements",
    },
    SystemTemplate {
        name: "Document Store",
        kind: SystemKind::Database,
        os: "Rocky Linux 9",
        stack: &["MongoDB"],
        ports: &[27017],
        criticality: Criticality::Medium,
        internet_facing: false,
        description: "Schema-flexible store backing content and case-management workloads",
    },
    SystemTemplate {
        name: "Perimeter Firewall",
        kind: SystemKind::Appliance,
        os: "PAN-OS 11",
        stack: &["Panorama"],
        ports: &[443],
        criticality: Criticality::Critical,
        internet_facing: true,
        description: "Next-generation firewall terminating and inspecting all ingress traffic",
    },
    SystemTemplate {
        name: "Load Balancer",
        kind: SystemKind::Appliance,
        os: "F5 TMOS",
        stack: &["iRules"],
        ports: &[443, 80],
        criticality: Criticality::High,
        internet_facing: true,
        description: "Distributes inbound application traffic across service pools",
    },
    SystemTemplate {
        name: "VPN Concentrator",
        kind: SystemKind::Appliance,
        os: "Cisco ASA 9.18",
        stack: &["AnyConnect"],
        ports: &[443],
        criticality: Criticality::High,
        internet_facing: true,
        description: "Remote-access gateway for the workforce and third-party support staff",
    },
    SystemTemplate {
        name: "Message Broker",
        kind: SystemKind::Middleware,
        os: "Debian 12",
        stack: &["Kafka", "ZooKeeper"],
        ports: &[9092],
        criticality: Criticality::High,
        internet_facing: false,
        description: "Event backbone carrying order, billing, and audit streams between services",
    },
    SystemTemplate {
        name: "API Gateway",
        kind: SystemKind::Middleware,
        os: "Container",
        stack: &["Kong", "Nginx"],
        ports: &[443],
        criticality: Criticality::High,
        internet_facing: true,
        description: "Routes, authenticates, and rate-limits partner and mobile API traffic",
    },
    SystemTemplate {
        name: "Job Scheduler",
        kind: SystemKind::Middleware,
        os: "Ubuntu 22.04",
        stack: &["Airflow", "Celery"],
        ports: &[8080],
        criticality: Criticality::Medium,
        internet_facing: false,
        description: "Orchestrates nightly batch pipelines and report generation",
    },
    SystemTemplate {
        name: "CRM",
        kind: SystemKind::Saas,
        os: "SaaS",
        stack: &["Salesforce"],
        ports: &[443],
        criticality: Criticality::High,
        internet_facing: true,
        description: "System of record for accounts, opportunities, and renewal pipeline",
    },
    SystemTemplate {
        name: "HRIS",
        kind: SystemKind::Saas,
        os: "SaaS",
        stack: &["Workday"],
        ports: &[443],
        criticality: Criticality::High,
        internet_facing: true,
        description: "Human-resources system of record for workers, compensation, and org structure",
    },
    SystemTemplate {
        name: "ERP",
        kind: SystemKind::Saas,
        os: "SaaS",
        stack: &["NetSuite"],
        ports: &[443],
        criticality: Criticality::Critical,
        internet_facing: true,
        description: "Finance backbone covering general ledger, procurement, and close",
    },
    SystemTemplate {
        name: "Service Desk",
        kind: SystemKind::Saas,
        os: "SaaS",
        stack: &["ServiceNow"],
        ports: &[443],
        criticality: Criticality::Medium,
        internet_facing: true,
        description: "Ticketing and change-management workflow for IT and facilities",
    },
    SystemTemplate {
        name: "Kubernetes Cluster",
        kind: SystemKind::Infrastructure,
        os: "Talos Linux",
        stack: &["Kubernetes", "Istio", "ArgoCD"],
        ports: &[6443],
        criticality: Criticality::Critical,
        internet_facing: false,
        description: "Shared container platform hosting stateless production services",
    },
    SystemTemplate {
        name: "Object Storage",
        kind: SystemKind::Infrastructure,
        os: "Managed",
        stack: &["S3"],
        ports: &[443],
        criticality: Criticality::High,
        internet_facing: false,
        description: "Durable blob store for backups, exports, and data-lake landing zones",
    },
    SystemTemplate {
        name: "CI Pipeline",
        kind: SystemKind::Infrastructure,
        os: "Container",
        stack: &["GitLab CI", "Docker"],
        ports: &[443],
        criticality: Criticality::Medium,
        internet_facing: false,
        description: "Builds, tests, and signs every deployable artifact",
    },
    SystemTemplate {
        name: "Monitoring Stack",
        kind: SystemKind::Infrastructure,
        os: "Ubuntu 22.04",
        stack: &["Prometheus", "Grafana", "Loki"],
        ports: &[9090, 3000],
        criticality: Criticality::High,
        internet_facing: false,
        description: "Metrics, logs, and alerting for the production estate",
    },
    SystemTemplate {
        name: "Backup Appliance",
        kind: SystemKind::Appliance,
        os: "Data Domain OS",
        stack: &["DDBoost"],
        ports: &[2049],
        criticality: Criticality::High,
        internet_facing: false,
        description: "Deduplicating backup target with immutable retention locks",
    },
    SystemTemplate {
        name: "Payments Switch",
        kind: SystemKind::Application,
        os: "RHEL 9",
        stack: &["C++", "Oracle"],
        ports: &[8583],
        criticality: Criticality::Critical,
        internet_facing: false,
        description: "Authorises and routes card transactions to scheme networks",
    },
    SystemTemplate {
        name: "EHR Platform",
        kind: SystemKind::Application,
        os: "RHEL 9",
        stack: &["Java", "Oracle", "HL7"],
        ports: &[8443],
        criticality: Criticality::Critical,
        internet_facing: false,
        description: "Electronic health record system used across clinical departments",
    },
    SystemTemplate {
        name: "Analytics Sandbox",
        kind: SystemKind::Application,
        os: "Ubuntu 22.04",
        stack: &["Python", "JupyterHub", "Spark"],
        ports: &[8000],
        criticality: Criticality::Low,
        internet_facing: false,
        description: "Self-service exploration environment for analysts and data scientists",
    },
];

/// Web frameworks that must never appear on an appliance's stack.
pub const WEB_FRAMEWORKS: &[&str] = &[
    "React", "Angular", "Vue", "Django", "Rails", "Spring Boot", "Express", "Laravel", "Flask",
    "Next.js",
];

pub struct NetworkTemplate {
    pub name: &'static str,
    pub zone: &'static str,
    pub cidr: &'static str,
    pub internet_facing: bool,
}

pub const NETWORK_TEMPLATES: &[NetworkTemplate] = &[
    NetworkTemplate { name: "Corporate LAN", zone: "internal", cidr: "10.10.0.0/16", internet_facing: false },
    NetworkTemplate { name: "Production VPC", zone: "restricted", cidr: "10.20.0.0/16", internet_facing: false },
    NetworkTemplate { name: "DMZ", zone: "external", cidr: "192.168.100.0/24", internet_facing: true },
    NetworkTemplate { name: "Management Network", zone: "restricted", cidr: "10.30.0.0/20", internet_facing: false },
    NetworkTemplate { name: "Guest WiFi", zone: "external", cidr: "172.16.0.0/22", internet_facing: true },
    NetworkTemplate { name: "Partner Extranet", zone: "external", cidr: "10.40.0.0/24", internet_facing: true },
];

pub struct IntegrationTemplate {
    pub name: &'static str,
    pub style: &'static str,
    pub protocol: &'static str,
    pub direction: &'static str,
    pub auth: &'static str,
}

pub const INTEGRATION_TEMPLATES: &[IntegrationTemplate] = &[
    IntegrationTemplate { name: "Payments Webhook Feed", style: "api", protocol: "https", direction: "inbound", auth: "hmac" },
    IntegrationTemplate { name: "Ledger Sync", style: "etl", protocol: "sftp", direction: "outbound", auth: "ssh_key" },
    IntegrationTemplate { name: "Event Stream Bridge", style: "streaming", protocol: "kafka", direction: "bidirectional", auth: "mtls" },
    IntegrationTemplate { name: "Partner Order Feed", style: "file_transfer", protocol: "sftp", direction: "inbound", auth: "ssh_key" },
    IntegrationTemplate { name: "Identity Provisioning", style: "api", protocol: "https", direction: "outbound", auth: "oauth2" },
    IntegrationTemplate { name: "Telemetry Export", style: "streaming", protocol: "grpc", direction: "outbound", auth: "mtls" },
    IntegrationTemplate { name: "Claims Clearinghouse Link", style: "messaging", protocol: "amqp", direction: "bidirectional", auth: "mtls" },
    IntegrationTemplate { name: "Market Data Feed", style: "streaming", protocol: "https", direction: "inbound", auth: "api_key" },
    IntegrationTemplate { name: "Tax Engine Lookup", style: "api", protocol: "https", direction: "outbound", auth: "oauth2" },
    IntegrationTemplate { name: "Document Signing Callback", style: "api", protocol: "https", direction: "inbound", auth: "hmac" },
];

pub struct DataAssetTemplate {
    pub name: &'static str,
    pub classification: DataClassification,
    pub format: &'static str,
    pub pii: bool,
    pub description: &'static str,
}

pub const DATA_ASSET_TEMPLATES: &[DataAssetTemplate] = &[
    DataAssetTemplate { name: "Customer Master", classification: DataClassification::Confidential, format: "structured", pii: true, description: "Golden record of customer accounts, contacts, and consent state" },
    DataAssetTemplate { name: "Payment Card Tokens", classification: DataClassification::Restricted, format: "structured", pii: true, description: "Tokenised card references and billing descriptors" },
    DataAssetTemplate { name: "Employee Records", classification: DataClassification::Restricted, format: "structured", pii: true, description: "Worker profiles, compensation history, and performance notes" },
    DataAssetTemplate { name: "Product Telemetry", classification: DataClassification::Internal, format: "semi_structured", pii: false, description: "Feature-level usage events sampled from production clients" },
    DataAssetTemplate { name: "Financial Ledger", classification: DataClassification::Confidential, format: "structured", pii: false, description: "Double-entry journal lines feeding statutory reporting" },
    DataAssetTemplate { name: "Support Transcripts", classification: DataClassification::Confidential, format: "unstructured", pii: true, description: "Chat and call transcripts attached to support cases" },
    DataAssetTemplate { name: "Marketing Contact List", classification: DataClassification::Internal, format: "structured", pii: true, description: "Opted-in prospect contacts with campaign attribution" },
    DataAssetTemplate { name: "Source Code Repository", classification: DataClassification::Confidential, format: "unstructured", pii: false, description: "Monorepo holding application and infrastructure code" },
    DataAssetTemplate { name: "Patient Records", classification: DataClassification::Restricted, format: "structured", pii: true, description: "Longitudinal clinical records including diagnoses and medication orders" },
    DataAssetTemplate { name: "Claims History", classification: DataClassification::Restricted, format: "structured", pii: true, description: "Adjudicated claims with payer and provider identifiers" },
    DataAssetTemplate { name: "Trade Positions", classification: DataClassification::Restricted, format: "structured", pii: false, description: "Intraday positions and exposure snapshots by desk" },
    DataAssetTemplate { name: "Vendor Contracts Archive", classification: DataClassification::Confidential, format: "unstructured", pii: false, description: "Executed agreements, amendments, and security addenda" },
    DataAssetTemplate { name: "Audit Logs", classification: DataClassification::Internal, format: "semi_structured", pii: false, description: "Immutable trail of privileged actions across the estate" },
    DataAssetTemplate { name: "Public Price List", classification: DataClassification::Public, format: "structured", pii: false, description: "Published per-SKU list prices and regional adjustments" },
    DataAssetTemplate { name: "Incident Postmortems", classification: DataClassification::Internal, format: "unstructured", pii: false, description: "Narrative analyses of production incidents and follow-ups" },
    DataAssetTemplate { name: "ML Training Corpus", classification: DataClassification::Internal, format: "semi_structured", pii: false, description: "Curated, de-identified examples used to fit ranking models" },
];

pub const DATA_DOMAINS: &[(&str, &str)] = &[
    ("Customer", "governed"),
    ("Finance", "governed"),
    ("People", "governed"),
    ("Product", "managed"),
    ("Operations", "managed"),
    ("Security", "governed"),
    ("Marketing", "managed"),
    ("Clinical", "governed"),
];

pub struct PolicyTemplate {
    pub name: &'static str,
    pub area: &'static str,
    pub review_cycle: &'static str,
    pub enforcement: &'static str,
}

pub const POLICY_TEMPLATES: &[PolicyTemplate] = &[
    PolicyTemplate { name: "Information Security Policy", area: "security", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Data Classification Policy", area: "security", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Access Control Policy", area: "security", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Acceptable Use Policy", area: "security", review_cycle: "biennial", enforcement: "mandatory" },
    PolicyTemplate { name: "Data Retention Policy", area: "privacy", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Privacy Notice", area: "privacy", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Incident Response Policy", area: "security", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Vendor Risk Policy", area: "operational", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Change Management Policy", area: "operational", review_cycle: "biennial", enforcement: "recommended" },
    PolicyTemplate { name: "Business Continuity Policy", area: "operational", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Remote Work Policy", area: "hr", review_cycle: "biennial", enforcement: "recommended" },
    PolicyTemplate { name: "Expense Policy", area: "financial", review_cycle: "annual", enforcement: "mandatory" },
    PolicyTemplate { name: "Code of Conduct", area: "hr", review_cycle: "biennial", enforcement: "mandatory" },
    PolicyTemplate { name: "Cryptography Standard", area: "security", review_cycle: "annual", enforcement: "mandatory" },
];

pub struct RegulationTemplate {
    pub name: &'static str,
    pub authority: &'static str,
    pub domain: &'static str,
    pub scope: &'static str,
}

pub const REGULATION_TEMPLATES: &[RegulationTemplate] = &[
    RegulationTemplate { name: "GDPR", authority: "European Union", domain: "privacy", scope: "regional" },
    RegulationTemplate { name: "CCPA", authority: "State of California", domain: "privacy", scope: "regional" },
    RegulationTemplate { name: "SOX", authority: "U.S. Congress", domain: "financial", scope: "national" },
    RegulationTemplate { name: "PCI DSS", authority: "PCI Security Standards Council", domain: "security", scope: "global" },
    RegulationTemplate { name: "HIPAA", authority: "U.S. Department of Health", domain: "healthcare", scope: "national" },
    RegulationTemplate { name: "SOC 2", authority: "AICPA", domain: "security", scope: "global" },
    RegulationTemplate { name: "ISO 27001", authority: "ISO", domain: "security", scope: "global" },
    RegulationTemplate { name: "NIS2", authority: "European Union", domain: "security", scope: "regional" },
    RegulationTemplate { name: "DORA", authority: "European Union", domain: "financial", scope: "regional" },
    RegulationTemplate { name: "GLBA", authority: "U.S. Congress", domain: "financial", scope: "national" },
    RegulationTemplate { name: "Basel III", authority: "Basel Committee", domain: "financial", scope: "global" },
    RegulationTemplate { name: "HITRUST", authority: "HITRUST Alliance", domain: "healthcare", scope: "global" },
];

pub struct ControlTemplate {
    pub name: &'static str,
    pub class: &'static str,
    pub automation: &'static str,
    pub frameworks: &'static [&'static str],
}

pub const CONTROL_TEMPLATES: &[ControlTemplate] = &[
    ControlTemplate { name: "Multi-Factor Authentication", class: "preventive", automation: "automated", frameworks: &["ISO 27001 A.9", "NIST AC-7"] },
    ControlTemplate { name: "Endpoint Detection & Response", class: "detective", automation: "automated", frameworks: &["NIST SI-4"] },
    ControlTemplate { name: "Quarterly Access Review", class: "detective", automation: "semi_automated", frameworks: &["SOX ITGC", "ISO 27001 A.9"] },
    ControlTemplate { name: "Database Encryption at Rest", class: "preventive", automation: "automated", frameworks: &["PCI DSS 3.4"] },
    ControlTemplate { name: "TLS Everywhere", class: "preventive", automation: "automated", frameworks: &["PCI DSS 4.1", "NIST SC-8"] },
    ControlTemplate { name: "Privileged Access Management", class: "preventive", automation: "automated", frameworks: &["NIST AC-6"] },
    ControlTemplate { name: "Security Awareness Training", class: "preventive", automation: "manual", frameworks: &["ISO 27001 A.7"] },
    ControlTemplate { name: "Vulnerability Scanning", class: "detective", automation: "automated", frameworks: &["PCI DSS 11.2"] },
    ControlTemplate { name: "Patch Management", class: "corrective", automation: "semi_automated", frameworks: &["NIST SI-2"] },
    ControlTemplate { name: "Backup & Restore Testing", class: "corrective", automation: "semi_automated", frameworks: &["ISO 27001 A.12"] },
    ControlTemplate { name: "Segregation of Duties", class: "preventive", automation: "manual", frameworks: &["SOX ITGC"] },
    ControlTemplate { name: "SIEM Correlation Rules", class: "detective", automation: "automated", frameworks: &["NIST AU-6"] },
    ControlTemplate { name: "Data Loss Prevention", class: "preventive", automation: "automated", frameworks: &["ISO 27001 A.13"] },
    ControlTemplate { name: "Change Advisory Board", class: "preventive", automation: "manual", frameworks: &["ITIL"] },
    ControlTemplate { name: "Web Application Firewall", class: "preventive", automation: "automated", frameworks: &["PCI DSS 6.6"] },
    ControlTemplate { name: "Third-Party Security Assessment", class: "detective", automation: "manual", frameworks: &["ISO 27001 A.15"] },
];

pub struct RiskTemplate {
    pub name: &'static str,
    pub category: &'static str,
    pub likelihood: RiskLevel,
    pub impact: RiskLevel,
    pub treatment: &'static str,
}

pub const RISK_TEMPLATES: &[RiskTemplate] = &[
    RiskTemplate { name: "Ransomware disrupts production", category: "cyber", likelihood: RiskLevel::Medium, impact: RiskLevel::VeryHigh, treatment: "mitigate" },
    RiskTemplate { name: "Customer data breach", category: "cyber", likelihood: RiskLevel::Medium, impact: RiskLevel::VeryHigh, treatment: "mitigate" },
    RiskTemplate { name: "Key vendor insolvency", category: "operational", likelihood: RiskLevel::Low, impact: RiskLevel::High, treatment: "transfer" },
    RiskTemplate { name: "Regulatory fine for privacy violation", category: "compliance", likelihood: RiskLevel::Medium, impact: RiskLevel::High, treatment: "mitigate" },
    RiskTemplate { name: "Prolonged cloud region outage", category: "operational", likelihood: RiskLevel::Low, impact: RiskLevel::High, treatment: "mitigate" },
    RiskTemplate { name: "Insider exfiltration of source code", category: "cyber", likelihood: RiskLevel::Low, impact: RiskLevel::High, treatment: "mitigate" },
    RiskTemplate { name: "Critical talent attrition", category: "strategic", likelihood: RiskLevel::Medium, impact: RiskLevel::Medium, treatment: "accept" },
    RiskTemplate { name: "Payment fraud losses exceed reserve", category: "financial", likelihood: RiskLevel::Medium, impact: RiskLevel::High, treatment: "transfer" },
    RiskTemplate { name: "Unpatched internet-facing service exploited", category: "cyber", likelihood: RiskLevel::High, impact: RiskLevel::High, treatment: "mitigate" },
    RiskTemplate { name: "Data center physical intrusion", category: "operational", likelihood: RiskLevel::VeryLow, impact: RiskLevel::High, treatment: "mitigate" },
    RiskTemplate { name: "Currency exposure on international revenue", category: "financial", likelihood: RiskLevel::High, impact: RiskLevel::Medium, treatment: "transfer" },
    RiskTemplate { name: "Model drift degrades decisioning", category: "operational", likelihood: RiskLevel::Medium, impact: RiskLevel::Medium, treatment: "mitigate" },
    RiskTemplate { name: "Concentration risk on single cloud provider", category: "strategic", likelihood: RiskLevel::Medium, impact: RiskLevel::High, treatment: "accept" },
    RiskTemplate { name: "Audit finding on access reviews", category: "compliance", likelihood: RiskLevel::Medium, impact: RiskLevel::Low, treatment: "mitigate" },
];

pub struct ThreatTemplate {
    pub name: &'static str,
    pub class: &'static str,
    pub severity: Severity,
    pub vector: &'static str,
}

pub const THREAT_TEMPLATES: &[ThreatTemplate] = &[
    ThreatTemplate { name: "Credential Phishing Campaign", class: "phishing", severity: Severity::High, vector: "email" },
    ThreatTemplate { name: "Ransomware Deployment", class: "malware", severity: Severity::Critical, vector: "lateral_movement" },
    ThreatTemplate { name: "Supply Chain Package Tampering", class: "supply_chain", severity: Severity::Critical, vector: "dependency" },
    ThreatTemplate { name: "Volumetric DDoS", class: "ddos", severity: Severity::Medium, vector: "network" },
    ThreatTemplate { name: "Insider Data Theft", class: "insider", severity: Severity::High, vector: "privileged_access" },
    ThreatTemplate { name: "Business Email Compromise", class: "phishing", severity: Severity::High, vector: "email" },
    ThreatTemplate { name: "Credential Stuffing", class: "account_takeover", severity: Severity::Medium, vector: "public_api" },
    ThreatTemplate { name: "Web Shell Implant", class: "malware", severity: Severity::High, vector: "web_application" },
    ThreatTemplate { name: "API Scraping", class: "abuse", severity: Severity::Low, vector: "public_api" },
    ThreatTemplate { name: "Physical Tailgating", class: "physical", severity: Severity::Low, vector: "facility" },
];

/// The twelve named actors with hard-coded attribution.
pub struct ThreatActorTemplate {
    pub name: &'static str,
    pub class: &'static str,
    pub sophistication: &'static str,
    pub origin: &'static str,
    pub aliases: &'static [&'static str],
}

pub const THREAT_ACTORS: &[ThreatActorTemplate] = &[
    ThreatActorTemplate { name: "APT28", class: "nation_state", sophistication: "advanced", origin: "Russia", aliases: &["Fancy Bear", "Sofacy"] },
    ThreatActorTemplate { name: "APT29", class: "nation_state", sophistication: "advanced", origin: "Russia", aliases: &["Cozy Bear", "Midnight Blizzard"] },
    ThreatActorTemplate { name: "Lazarus Group", class: "nation_state", sophistication: "advanced", origin: "North Korea", aliases: &["Hidden Cobra"] },
    ThreatActorTemplate { name: "APT41", class: "nation_state", sophistication: "advanced", origin: "China", aliases: &["Double Dragon", "Wicked Panda"] },
    ThreatActorTemplate { name: "Sandworm", class: "nation_state", sophistication: "advanced", origin: "Russia", aliases: &["Voodoo Bear"] },
    ThreatActorTemplate { name: "Volt Typhoon", class: "nation_state", sophistication: "advanced", origin: "China", aliases: &["Bronze Silhouette"] },
    ThreatActorTemplate { name: "FIN7", class: "cybercrime", sophistication: "high", origin: "Eastern Europe", aliases: &["Carbanak"] },
    ThreatActorTemplate { name: "LockBit", class: "cybercrime", sophistication: "high", origin: "Unattributed", aliases: &["LockBit 3.0"] },
    ThreatActorTemplate { name: "ALPHV", class: "cybercrime", sophistication: "high", origin: "Unattributed", aliases: &["BlackCat"] },
    ThreatActorTemplate { name: "Scattered Spider", class: "cybercrime", sophistication: "high", origin: "US/UK", aliases: &["0ktapus", "UNC3944"] },
    ThreatActorTemplate { name: "Charming Kitten", class: "nation_state", sophistication: "medium", origin: "Iran", aliases: &["APT35", "Phosphorus"] },
    ThreatActorTemplate { name: "Lapsus$", class: "hacktivist", sophistication: "medium", origin: "International", aliases: &["DEV-0537"] },
];

pub struct IncidentTemplate {
    pub name: &'static str,
    pub class: &'static str,
    pub severity: Severity,
    pub root_cause: &'static str,
}

pub const INCIDENT_TEMPLATES: &[IncidentTemplate] = &[
    IncidentTemplate { name: "Phishing-led mailbox compromise", class: "breach", severity: Severity::High, root_cause: "Credential phishing bypassed legacy MFA" },
    IncidentTemplate { name: "Production database outage", class: "outage", severity: Severity::High, root_cause: "Failover misconfiguration during maintenance" },
    IncidentTemplate { name: "Misrouted customer export", class: "data_loss", severity: Severity::Medium, root_cause: "Report job pointed at the wrong tenant bucket" },
    IncidentTemplate { name: "Ransomware on lab segment", class: "ransomware", severity: Severity::Critical, root_cause: "Unpatched jump host exposed to vendor VPN" },
    IncidentTemplate { name: "Public S3 bucket exposure", class: "misconfiguration", severity: Severity::Medium, root_cause: "Terraform default ACL left the bucket public" },
    IncidentTemplate { name: "Payment processor degradation", class: "outage", severity: Severity::Medium, root_cause: "Upstream provider rate-limited settlement calls" },
    IncidentTemplate { name: "Contractor laptop theft", class: "data_loss", severity: Severity::Low, root_cause: "Unencrypted device outside MDM enrollment" },
    IncidentTemplate { name: "API key leak in public repo", class: "breach", severity: Severity::Medium, root_cause: "Secret committed before pre-commit scanning rollout" },
    IncidentTemplate { name: "DDoS against login endpoint", class: "outage", severity: Severity::Medium, root_cause: "Botnet burst exceeded edge mitigation capacity" },
    IncidentTemplate { name: "Expired TLS certificate", class: "outage", severity: Severity::Low, root_cause: "Renewal automation missed a SAN entry" },
];

/// Components vulnerabilities attach to, with plausible CVSS bands.
pub const VULN_COMPONENTS: &[(&str, Severity, f64)] = &[
    ("OpenSSL", Severity::High, 8.1),
    ("Log4j", Severity::Critical, 9.8),
    ("Apache Struts", Severity::Critical, 9.6),
    ("Windows SMB", Severity::High, 8.5),
    ("Jenkins Core", Severity::High, 8.0),
    ("Exchange Server", Severity::Critical, 9.1),
    ("Spring Framework", Severity::High, 7.9),
    ("Citrix Gateway", Severity::Critical, 9.4),
    ("curl", Severity::Medium, 6.5),
    ("nginx", Severity::Medium, 6.1),
    ("Kubernetes ingress", Severity::High, 7.6),
    ("VMware vCenter", Severity::Critical, 9.2),
    ("GitLab CE", Severity::High, 8.2),
    ("Confluence", Severity::Critical, 9.0),
    ("Fortinet FortiOS", Severity::High, 8.4),
];

pub const CAPABILITY_TEMPLATES: &[(&str, &str, Criticality)] = &[
    ("Customer Onboarding", "core", Criticality::High),
    ("Order Management", "core", Criticality::Critical),
    ("Billing & Invoicing", "core", Criticality::Critical),
    ("Identity & Access Management", "enabling", Criticality::Critical),
    ("Data Analytics", "enabling", Criticality::Medium),
    ("Fraud Detection", "core", Criticality::High),
    ("Regulatory Reporting", "supporting", Criticality::High),
    ("Talent Management", "supporting", Criticality::Medium),
    ("Incident Response", "enabling", Criticality::High),
    ("Vendor Management", "supporting", Criticality::Medium),
    ("Product Delivery", "core", Criticality::High),
    ("Customer Support", "core", Criticality::High),
    ("Financial Close", "supporting", Criticality::High),
    ("Marketing Automation", "supporting", Criticality::Low),
];

pub const GEOGRAPHIES: &[(&str, &str, &str)] = &[
    ("United States", "country", "US"),
    ("European Union", "region", "EU"),
    ("United Kingdom", "country", "GB"),
    ("Canada", "country", "CA"),
    ("Germany", "country", "DE"),
    ("Singapore", "country", "SG"),
    ("Australia", "country", "AU"),
    ("Japan", "country", "JP"),
    ("Brazil", "country", "BR"),
    ("India", "country", "IN"),
];

pub const JURISDICTIONS: &[(&str, &str, &str)] = &[
    ("US Federal", "common_law", "high"),
    ("California", "common_law", "high"),
    ("European Union", "civil_law", "high"),
    ("United Kingdom", "common_law", "high"),
    ("Singapore", "common_law", "medium"),
    ("Canada", "common_law", "medium"),
    ("Australia", "common_law", "medium"),
    ("Japan", "civil_law", "medium"),
];

pub const PORTFOLIO_NAMES: &[(&str, &str)] = &[
    ("Core Platform", "mature"),
    ("Growth Products", "growth"),
    ("Emerging Bets", "growth"),
    ("Legacy Estate", "sunset"),
];

pub const PRODUCT_TEMPLATES: &[(&str, &str, Criticality)] = &[
    ("Workspace Suite", "ga", Criticality::Critical),
    ("Analytics Cloud", "ga", Criticality::High),
    ("Mobile Companion", "ga", Criticality::Medium),
    ("Developer API", "ga", Criticality::High),
    ("Insights Add-on", "beta", Criticality::Low),
    ("Compliance Vault", "ga", Criticality::High),
    ("Edge Agent", "beta", Criticality::Medium),
    ("Marketplace", "ga", Criticality::Medium),
    ("Premium Support Plan", "ga", Criticality::Low),
    ("Legacy Desktop Client", "sunset", Criticality::Low),
    ("Payments Module", "ga", Criticality::Critical),
    ("Care Coordination Portal", "ga", Criticality::High),
    ("Wealth Dashboard", "ga", Criticality::High),
    ("Embedded Checkout", "beta", Criticality::Medium),
];

pub const MARKET_SEGMENTS: &[(&str, &str)] = &[
    ("Enterprise", "enterprise"),
    ("Mid-Market", "mid_market"),
    ("Small Business", "smb"),
    ("Public Sector", "enterprise"),
    ("Startups", "smb"),
    ("Regulated Industries", "enterprise"),
];

pub const CUSTOMER_NAME_HEADS: &[&str] = &[
    "Northwind", "Contoso", "Globex", "Initech", "Umbra", "Vertex", "Halcyon", "Meridian",
    "Aurora", "Pinnacle", "Cascade", "Summit", "Harbor", "Atlas", "Beacon", "Crescent",
    "Evergreen", "Fulcrum", "Granite", "Horizon",
];

pub const CUSTOMER_NAME_TAILS: &[&str] = &[
    "Industries", "Logistics", "Health", "Financial", "Retail Group", "Manufacturing", "Labs",
    "Energy", "Insurance", "Media", "Foods", "Systems", "Holdings", "Partners", "Airlines",
    "Robotics",
];

pub struct VendorTemplate {
    pub name: &'static str,
    pub category: &'static str,
    pub tier: &'static str,
    pub data_access: bool,
}

pub const VENDOR_TEMPLATES: &[VendorTemplate] = &[
    VendorTemplate { name: "Amazon Web Services", category: "cloud", tier: "strategic", data_access: true },
    VendorTemplate { name: "Microsoft", category: "software", tier: "strategic", data_access: true },
    VendorTemplate { name: "Salesforce", category: "software", tier: "strategic", data_access: true },
    VendorTemplate { name: "Workday", category: "software", tier: "preferred", data_access: true },
    VendorTemplate { name: "Snowflake", category: "cloud", tier: "preferred", data_access: true },
    VendorTemplate { name: "CrowdStrike", category: "security", tier: "preferred", data_access: true },
    VendorTemplate { name: "Okta", category: "security", tier: "strategic", data_access: true },
    VendorTemplate { name: "Datadog", category: "software", tier: "preferred", data_access: true },
    VendorTemplate { name: "Stripe", category: "payments", tier: "strategic", data_access: true },
    VendorTemplate { name: "Twilio", category: "communications", tier: "approved", data_access: true },
    VendorTemplate { name: "Iron Mountain", category: "logistics", tier: "approved", data_access: false },
    VendorTemplate { name: "Deloitte", category: "consulting", tier: "preferred", data_access: true },
    VendorTemplate { name: "Equinix", category: "colocation", tier: "preferred", data_access: false },
    VendorTemplate { name: "Zscaler", category: "security", tier: "approved", data_access: true },
    VendorTemplate { name: "Adobe", category: "software", tier: "approved", data_access: false },
    VendorTemplate { name: "Atlassian", category: "software", tier: "preferred", data_access: true },
    VendorTemplate { name: "PagerDuty", category: "software", tier: "tactical", data_access: false },
    VendorTemplate { name: "DocuSign", category: "software", tier: "approved", data_access: true },
];

pub const CONTRACT_KINDS: &[&str] = &["msa", "saas_subscription", "sow", "license", "support"];

pub const INITIATIVE_TEMPLATES: &[(&str, &str, &str)] = &[
    ("Zero Trust Rollout", "security", "in_flight"),
    ("Cloud Cost Optimization", "cost_reduction", "in_flight"),
    ("Data Warehouse Consolidation", "transformation", "approved"),
    ("SOC 2 Type II Certification", "compliance", "in_flight"),
    ("Customer Portal Rewrite", "transformation", "proposed"),
    ("AI Assisted Support", "growth", "in_flight"),
    ("Legacy ERP Decommission", "cost_reduction", "approved"),
    ("Privacy Program Uplift", "compliance", "in_flight"),
    ("APAC Market Entry", "growth", "proposed"),
    ("Disaster Recovery Modernization", "transformation", "approved"),
    ("Vendor Consolidation", "cost_reduction", "proposed"),
    ("Passwordless Workforce", "security", "proposed"),
];

#[must_use]
pub fn facility_for_index(index: usize) -> FacilityKind {
    // The first site is always the headquarters; every fourth site after
    // that is a data center.
    if index == 0 {
        FacilityKind::Headquarters
    } else if index % 4 == 0 {
        FacilityKind::DataCenter
    } else {
        FacilityKind::Office
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_shares_sum_to_one() {
        for industry in [
            Industry::Technology,
            Industry::FinancialServices,
            Industry::Healthcare,
        ] {
            let total: f64 = departments_for(industry).iter().map(|d| d.share).sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "{industry} shares sum to {total}"
            );
        }
    }

    #[test]
    fn test_subdivision_sets_have_3_to_10_children() {
        for industry in [
            Industry::Technology,
            Industry::FinancialServices,
            Industry::Healthcare,
        ] {
            for dept in departments_for(industry) {
                assert!(
                    (3..=10).contains(&dept.sub_departments.len()),
                    "{} has {} sub-departments",
                    dept.name,
                    dept.sub_departments.len()
                );
            }
        }
    }

    #[test]
    fn test_twelve_named_threat_actors() {
        assert_eq!(THREAT_ACTORS.len(), 12);
        for actor in THREAT_ACTORS {
            assert!(!actor.origin.is_empty());
            assert!(!actor.aliases.is_empty());
        }
    }

    #[test]
    fn test_appliance_templates_carry_no_web_framework() {
        for template in SYSTEM_TEMPLATES {
            if template.kind == SystemKind::Appliance {
                for tech in template.stack {
                    assert!(
                        !WEB_FRAMEWORKS.contains(tech),
                        "{} carries web framework {tech}",
                        template.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_descriptions_are_domain_specific() {
        let lorem = ["lorem", "ipsum", "dolor", "sit amet", "consectetur"];
        for template in SYSTEM_TEMPLATES {
            let lowered = template.description.to_lowercase();
            for marker in lorem {
                assert!(!lowered.contains(marker));
            }
            assert!(template.description.len() > 20);
        }
    }

    #[test]
    fn test_every_role_function_has_roles() {
        for function in ["engineering", "sales", "finance", "hr", "clinical", "unknown"] {
            assert!(!roles_for(function).is_empty());
        }
    }

    #[test]
    fn test_first_facility_is_headquarters() {
        assert_eq!(facility_for_index(0), FacilityKind::Headquarters);
        assert_eq!(facility_for_index(4), FacilityKind::DataCenter);
        assert_eq!(facility_for_index(1), FacilityKind::Office);
    }
}
