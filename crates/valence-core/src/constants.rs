//! Shared constants for the Valence analyzer.

/// Valence version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file name, looked up in the analysis root.
pub const CONFIG_FILE_NAME: &str = "valence.toml";

// ---- Bond classification ----

/// Weight of one method call between two components.
pub const DEFAULT_METHOD_CALL_WEIGHT: f64 = 1.0;

/// Weight of one direct field access.
pub const DEFAULT_FIELD_ACCESS_WEIGHT: f64 = 1.5;

/// Weight of an inheritance relationship.
pub const DEFAULT_INHERITANCE_WEIGHT: f64 = 2.0;

/// Weight of one composition (owned part).
pub const DEFAULT_COMPOSITION_WEIGHT: f64 = 1.8;

/// Weight of one aggregation (shared reference).
pub const DEFAULT_AGGREGATION_WEIGHT: f64 = 1.2;

/// Weight of one event subscription.
pub const DEFAULT_EVENT_SUBSCRIPTION_WEIGHT: f64 = 0.4;

/// Weight of one shared configuration key.
pub const DEFAULT_CONFIG_COUPLING_WEIGHT: f64 = 0.3;

/// Raw weighted sum that maps to full strength (1.0).
pub const DEFAULT_STRENGTH_SCALE: f64 = 20.0;

/// Strength at or above which a bond is covalent.
pub const DEFAULT_COVALENT_THRESHOLD: f64 = 0.8;

/// Strength at or above which a bond is ionic.
pub const DEFAULT_IONIC_THRESHOLD: f64 = 0.4;

/// Strength at or above which a bond is a hydrogen bond.
pub const DEFAULT_HYDROGEN_THRESHOLD: f64 = 0.1;

/// Gravitational constant for bond attraction prediction.
pub const DEFAULT_ATTRACTION_CONSTANT: f64 = 0.01;

/// Edge count at which classification switches to rayon.
pub const DEFAULT_PARALLEL_EDGE_THRESHOLD: usize = 1024;

// ---- Structural health ----

/// Connectivity (fan-in + fan-out) above which a component is over-concentrated.
pub const DEFAULT_MAX_CONNECTIVITY: u32 = 20;

/// Responsibility count above which a component is over-concentrated.
pub const DEFAULT_MAX_RESPONSIBILITIES: u32 = 10;

/// Percentile of connectivity used to flag outliers.
pub const DEFAULT_CONNECTIVITY_PERCENTILE: usize = 95;

/// Base toxicity of a circular dependency.
pub const CYCLE_BASE_TOXICITY: f64 = 0.3;

/// Toxicity added per cycle member.
pub const CYCLE_TOXICITY_PER_MEMBER: f64 = 0.1;

/// Base toxicity of an over-concentrated component.
pub const CONCENTRATION_BASE_TOXICITY: f64 = 0.3;

/// Weight of connectivity excess in over-concentration toxicity.
pub const CONCENTRATION_CONNECTIVITY_WEIGHT: f64 = 0.35;

/// Weight of responsibility excess in over-concentration toxicity.
pub const CONCENTRATION_RESPONSIBILITY_WEIGHT: f64 = 0.35;

/// Bonus for components at or above the connectivity percentile.
pub const CONCENTRATION_OUTLIER_BONUS: f64 = 0.1;

/// Toxicity at which a finding becomes Medium severity.
pub const DEFAULT_SEVERITY_MEDIUM: f64 = 0.3;

/// Toxicity at which a finding becomes High severity.
pub const DEFAULT_SEVERITY_HIGH: f64 = 0.6;

/// Toxicity at which a finding becomes Critical severity.
pub const DEFAULT_SEVERITY_CRITICAL: f64 = 0.85;

/// Node count at which cycle detection splits into weak components on rayon.
pub const DEFAULT_PARALLEL_NODE_THRESHOLD: usize = 2048;

// ---- Scoring ----

/// Covalent bonds below this stability count as unstable.
pub const DEFAULT_UNSTABLE_BOND_THRESHOLD: f64 = 0.5;

// ---- Pattern validation ----

/// Trace count at which shape matching switches to rayon.
pub const DEFAULT_PARALLEL_TRACE_THRESHOLD: usize = 256;
