// Ranking weights
pub const CONTEXT_BOOST: i64 = 200_000;
pub const DOMAIN_BOOST: i64 = 100_000;
/// Per-character penalty for words without frequency data.
pub const UNKNOWN_LENGTH_PENALTY: i64 = 10;

// Frequency scaling
/// The most frequent corpus word maps to exactly this score.
pub const FREQUENCY_SCALE_MAX: u32 = 30_000;

// Vocabulary bounds (in chars)
pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_LEN: usize = 25;

// Query behaviour
/// Prefixes shorter than this (after normalization) yield no suggestions.
pub const MIN_PREFIX_LEN: usize = 2;
pub const DEFAULT_LIMIT: usize = 8;
pub const MAX_LIMIT: usize = 15;

// Defaults for the configuration layer
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_WORD_LIST: &str = "/usr/share/dict/words";
pub const CONFIG_ENV_VAR: &str = "PM_AUTOCOMPLETE_CONFIG";

// Product-management vocabulary (boosted in ranking)
pub const DOMAIN_VOCABULARY: &[&str] = &[
    "product", "feature", "requirement", "requirements", "specification",
    "stakeholder", "stakeholders", "roadmap", "backlog", "sprint", "iteration",
    "milestone", "milestones", "deliverable", "deliverables", "deadline", "timeline",
    "priority", "priorities", "critical", "blocker", "dependency", "dependencies",
    "scope", "objective", "objectives", "goal", "goals", "outcome", "outcomes",
    "strategy", "strategic", "initiative", "initiatives", "epic", "epics",
    "user", "users", "customer", "customers", "persona", "personas",
    "segment", "segments", "audience", "target", "market", "marketplace",
    "overview", "summary", "description", "background", "context", "motivation",
    "problem", "solution", "proposed", "approach", "methodology",
    "acceptance", "criteria", "definition", "assumptions", "constraints",
    "risks", "risk", "mitigation", "tradeoff", "tradeoffs",
    "alternative", "alternatives", "recommendation", "recommendations",
    "scenario", "scenarios", "workflow", "workflows",
    "journey", "experience", "onboarding", "retention",
    "engagement", "conversion", "funnel", "acquisition", "activation",
    "behavior", "pattern", "patterns", "insight", "insights",
    "metric", "metrics", "kpi", "kpis", "benchmark", "benchmarks",
    "performance", "measurement", "analytics", "dashboard", "tracking",
    "revenue", "growth", "churn", "adoption", "utilization",
    "throughput", "latency", "uptime", "availability", "reliability",
    "scalability", "efficiency", "productivity", "satisfaction",
    "design", "wireframe", "prototype", "mockup",
    "interface", "usability", "accessibility", "responsive", "navigation",
    "layout", "component", "components", "module", "modules",
    "feedback", "notification", "notifications",
    "api", "endpoint", "endpoints", "integration", "integrations",
    "architecture", "infrastructure", "deployment", "migration",
    "database", "authentication", "authorization", "security", "encryption",
    "configuration", "environment", "monitoring", "logging", "testing",
    "automated", "automation", "continuous", "pipeline",
    "microservice", "microservices", "serverless", "kubernetes",
    "agile", "scrum", "kanban", "waterfall", "lean", "mvp",
    "retrospective", "standup", "review", "planning",
    "estimation", "velocity", "capacity", "bandwidth", "allocation",
    "collaboration", "communication", "documentation", "handoff",
    "launch", "release", "rollout", "beta", "alpha", "production",
    "experiment", "hypothesis", "validation", "verification",
    "budget", "roi", "investment", "profit",
    "competitive", "competitor", "differentiation",
    "positioning", "branding", "pricing", "subscription", "freemium",
    "enterprise", "saas", "platform", "ecosystem",
    "compliance", "regulation", "gdpr", "privacy", "policy",
    "draft", "approved", "rejected", "archived", "deprecated",
    "active", "inactive", "pending", "completed", "cancelled", "blocked",
    "implemented", "delivered", "shipped", "released", "launched",
];

// Trigger word -> words boosted when it immediately precedes the prefix
pub const WORD_ASSOCIATIONS: &[(&str, &[&str])] = &[
    ("the", &[
        "product", "user", "system", "feature", "team", "customer", "application",
        "requirement", "solution", "problem", "design", "interface", "workflow",
    ]),
    ("a", &[
        "new", "user", "feature", "product", "customer", "solution", "requirement",
        "milestone", "stakeholder", "workflow", "metric", "dashboard",
    ]),
    ("an", &[
        "api", "endpoint", "application", "integration", "automated", "alternative",
        "experiment", "iteration", "initiative", "objective", "overview",
    ]),
    ("is", &[
        "required", "expected", "available", "necessary", "important", "critical",
        "optional", "recommended", "planned", "blocked", "completed", "pending",
    ]),
    ("are", &[
        "required", "expected", "available", "necessary", "important", "critical",
        "optional", "recommended", "planned", "blocked", "completed", "pending",
    ]),
    ("should", &[
        "be", "have", "include", "provide", "support", "allow", "enable",
        "display", "handle", "validate", "track", "measure", "implement",
    ]),
    ("must", &[
        "be", "have", "include", "provide", "support", "comply", "validate",
        "handle", "ensure", "maintain", "implement", "satisfy",
    ]),
    ("will", &[
        "be", "have", "include", "provide", "support", "allow", "enable",
        "display", "handle", "track", "measure", "improve", "reduce",
    ]),
    ("can", &[
        "be", "view", "create", "edit", "delete", "access", "manage",
        "configure", "customize", "export", "import", "filter", "search",
    ]),
    ("to", &[
        "the", "create", "manage", "track", "ensure", "provide", "enable",
        "improve", "reduce", "increase", "support", "implement", "define",
    ]),
    ("and", &["the", "should", "will", "must", "can", "also", "their", "other"]),
    ("for", &["the", "each", "all", "every", "this", "example", "users", "customers"]),
    ("with", &["the", "a", "an", "all", "support", "integration", "authentication"]),
    ("as", &["a", "an", "the", "well", "needed", "required", "expected", "defined"]),
    ("user", &[
        "should", "can", "will", "must", "needs", "wants", "experience",
        "story", "journey", "interface", "feedback", "research", "persona",
    ]),
    ("users", &["should", "can", "will", "must", "need", "want", "expect", "prefer"]),
    ("product", &[
        "manager", "owner", "team", "roadmap", "strategy", "vision",
        "requirements", "backlog", "launch", "lifecycle", "market",
    ]),
    ("feature", &[
        "request", "flag", "toggle", "specification", "requirement",
        "priority", "description", "implementation", "release",
    ]),
    ("acceptance", &["criteria", "testing", "test"]),
    ("success", &["metrics", "criteria", "rate", "story", "factor", "factors"]),
    ("key", &[
        "performance", "metrics", "features", "stakeholders", "objectives",
        "results", "findings", "decisions", "requirements", "indicators",
    ]),
    ("non", &["functional", "negotiable", "blocking", "critical"]),
    ("high", &["priority", "level", "impact", "risk", "performance", "availability"]),
    ("low", &["priority", "level", "impact", "risk", "latency", "cost"]),
];
