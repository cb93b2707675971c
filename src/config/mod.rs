//! Configuration for the harmonizer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::harmonization::interval::IntervalTable;
use crate::algorithm::harmonization::simulation::DEFAULT_N_SIM;
use crate::error::{HarmonizerError, Result};
use crate::models::FoodType;

/// Column names used when reading codes from and writing results to a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Sea fish code column
    pub sea: String,
    /// River fish code column
    pub river: String,
    /// Frozen fish code column
    pub frozen: String,
    /// Canned fish code column
    pub canned: String,
    /// Optional subject identifier column, used for log messages
    pub subject_id: Option<String>,
    /// Output column for the assigned category
    pub category: String,
    /// Output column for the probability of band A
    pub p_a: String,
    /// Output column for the probability of band B
    pub p_b: String,
    /// Output column for the probability of band C
    pub p_c: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            sea: FoodType::Sea.default_column().to_string(),
            river: FoodType::River.default_column().to_string(),
            frozen: FoodType::Frozen.default_column().to_string(),
            canned: FoodType::Canned.default_column().to_string(),
            subject_id: Some("subject_id".to_string()),
            category: "fish_category".to_string(),
            p_a: "p_a".to_string(),
            p_b: "p_b".to_string(),
            p_c: "p_c".to_string(),
        }
    }
}

impl ColumnConfig {
    /// Input column for one food type
    #[must_use]
    pub fn code_column(&self, food: FoodType) -> &str {
        match food {
            FoodType::Sea => &self.sea,
            FoodType::River => &self.river,
            FoodType::Frozen => &self.frozen,
            FoodType::Canned => &self.canned,
        }
    }

    /// The four output column names: category, `p_a`, `p_b`, `p_c`
    #[must_use]
    pub fn output_columns(&self) -> [&str; 4] {
        [&self.category, &self.p_a, &self.p_b, &self.p_c]
    }
}

/// Configuration for the harmonization process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonizerConfig {
    /// Number of simulation trials per subject
    pub n_sim: usize,

    /// Seed for the batch random stream; drawn from OS entropy when absent
    pub random_seed: Option<u64>,

    /// Whether to use parallel processing
    pub use_parallel: bool,

    /// Minimum batch size before parallel processing is used
    pub parallel_threshold: usize,

    /// Whether to draw a progress bar
    pub show_progress: bool,

    /// Code to consumption interval lookup
    pub interval_table: IntervalTable,

    /// Input and output column names
    pub columns: ColumnConfig,

    /// Assignments with a confidence below this are counted as uncertain in summaries
    pub uncertainty_threshold: f64,
}

impl Default for HarmonizerConfig {
    fn default() -> Self {
        Self {
            n_sim: DEFAULT_N_SIM,
            random_seed: None,
            use_parallel: true,
            parallel_threshold: 1000,
            show_progress: false,
            interval_table: IntervalTable::standard(),
            columns: ColumnConfig::default(),
            uncertainty_threshold: 0.5,
        }
    }
}

impl HarmonizerConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a configuration
    #[must_use]
    pub fn builder() -> HarmonizerConfigBuilder {
        HarmonizerConfigBuilder::new()
    }

    /// Load a configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            HarmonizerError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if self.n_sim == 0 {
            return Err(HarmonizerError::config("n_sim must be positive"));
        }
        if !(0.0..=1.0).contains(&self.uncertainty_threshold) {
            return Err(HarmonizerError::config(format!(
                "uncertainty_threshold must be within [0, 1], got {}",
                self.uncertainty_threshold
            )));
        }

        let outputs = self.columns.output_columns();
        for (i, name) in outputs.iter().enumerate() {
            if outputs[..i].contains(name) {
                return Err(HarmonizerError::config(format!(
                    "Output column '{name}' is configured twice"
                )));
            }
        }
        Ok(())
    }

    /// Convert to a human-readable string representation
    #[must_use]
    pub fn to_string_representation(&self) -> String {
        format!(
            "Harmonizer Config:\n\
             - Simulation trials: {}\n\
             - Random seed: {}\n\
             - Parallel: {} (threshold {})\n\
             - Code columns: {}, {}, {}, {}",
            self.n_sim,
            self.random_seed
                .map_or_else(|| "from entropy".to_string(), |s| s.to_string()),
            self.use_parallel,
            self.parallel_threshold,
            self.columns.sea,
            self.columns.river,
            self.columns.frozen,
            self.columns.canned,
        )
    }
}

/// Builder for constructing a harmonizer configuration
#[derive(Debug, Clone)]
pub struct HarmonizerConfigBuilder {
    config: HarmonizerConfig,
}

impl Default for HarmonizerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HarmonizerConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HarmonizerConfig::default(),
        }
    }

    /// Set the number of simulation trials per subject
    #[must_use]
    pub const fn n_sim(mut self, n_sim: usize) -> Self {
        self.config.n_sim = n_sim;
        self
    }

    /// Set the random seed
    #[must_use]
    pub const fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    /// Set whether to use parallel processing
    #[must_use]
    pub const fn use_parallel(mut self, use_parallel: bool) -> Self {
        self.config.use_parallel = use_parallel;
        self
    }

    /// Set the minimum batch size for parallel processing
    #[must_use]
    pub const fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Set whether to draw a progress bar
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Set the interval table
    #[must_use]
    pub fn interval_table(mut self, table: IntervalTable) -> Self {
        self.config.interval_table = table;
        self
    }

    /// Set the column names
    #[must_use]
    pub fn columns(mut self, columns: ColumnConfig) -> Self {
        self.config.columns = columns;
        self
    }

    /// Set the uncertainty threshold used by summaries
    #[must_use]
    pub const fn uncertainty_threshold(mut self, threshold: f64) -> Self {
        self.config.uncertainty_threshold = threshold;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> HarmonizerConfig {
        self.config
    }
}
