use bon::Builder;

use crate::utils::index_mask;

/// Median lifespan of the reference population in hours (15.5 days)
pub const POPULATION_MEDIAN_HOURS: f64 = 372.0;

/// Standard deviation of the reference lifespan distribution in hours (8/3 days)
pub const POPULATION_SD_HOURS: f64 = 192.0 / 3.0;

/// Intercept of the elastic net predictor in hours
pub const PREDICTION_INTERCEPT: f64 = 103.546_317_432_890_05;

/// Median lifespan in days used to rescale chronological age into biological age
pub const REFERENCE_LIFESPAN_DAYS: f64 = 15.5;

pub const DEFAULT_GENE_PATTERN: &str = "WBG";
pub const DEFAULT_AGE_COLUMN: &str = "Bio_Age";
pub const DEFAULT_COEFFICIENT_COLUMN: &str = "ElasticNet_Coef";
pub const CORRECTED_AGE_COLUMN: &str = "Corrected_Biological_Age";
pub const PREDICTED_AGE_COLUMN: &str = "Predicted_Biological_Age";
pub const SAMPLE_INDEX: &str = "Sample";
pub const GENE_INDEX: &str = "Gene_ID";

/// Parameters of the Gaussian lifespan distribution assumed by the truncation correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncationConfig {
    pub median: f64,
    pub sd: f64,
}
impl Default for TruncationConfig {
    fn default() -> Self {
        Self {
            median: POPULATION_MEDIAN_HOURS,
            sd: POPULATION_SD_HOURS,
        }
    }
}

/// Selects which columns of a sample table hold gene expression values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneFilter {
    All,
    Contains(String),
    Prefix(String),
}

impl GeneFilter {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            GeneFilter::All => true,
            GeneFilter::Contains(pattern) => name.contains(pattern.as_str()),
            GeneFilter::Prefix(pattern) => name.starts_with(pattern.as_str()),
        }
    }

    /// Returns the positions of all matching column names
    pub fn select(&self, columns: &[String]) -> Vec<usize> {
        match self {
            GeneFilter::Contains(pattern) => index_mask(pattern, columns),
            _ => columns
                .iter()
                .enumerate()
                .filter(|(_, name)| self.matches(name))
                .map(|(i, _)| i)
                .collect(),
        }
    }
}
impl Default for GeneFilter {
    fn default() -> Self {
        GeneFilter::Contains(DEFAULT_GENE_PATTERN.to_string())
    }
}

/// Assumed measurement error of the lifespan assays and reported ages
///
/// `lifespan` is relative to the reported lifespan, `age` is absolute in the
/// same unit as the chronological age.
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct MeasurementBias {
    #[builder(default = 0.05)]
    pub lifespan: f64,
    #[builder(default = 0.5)]
    pub age: f64,
}
impl Default for MeasurementBias {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}
impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}
