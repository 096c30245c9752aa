//! bioage: transcriptome-based biological age of *C. elegans* samples
//!
//! This library provides three independent procedures:
//! - Prediction: gene expression (CPM) is binarized against each sample's
//!   own median and scored with a linear elastic net predictor
//!   (`AgePredictor`, `predict`)
//! - Correction: a biological age is corrected for truncation of the
//!   Gaussian lifespan distribution it was drawn from (`correct_table`)
//! - Error propagation: the fold change of biological ages implied by two
//!   reported lifespans carries the propagated measurement error
//!   (`lifespan_fold_change`)
//!
//! Tables are immutable values (`Table`); every procedure returns a new table
//! or scalar.

mod binarize;
mod config;
mod correction;
mod error;
mod io;
mod lifespan;
mod math;
mod predict;
mod results;
mod table;
mod uncertain;
mod utils;

pub use binarize::{binarize, binarize_values};
pub use config::{
    Delimiter, GeneFilter, MeasurementBias, TruncationConfig, CORRECTED_AGE_COLUMN,
    DEFAULT_AGE_COLUMN, DEFAULT_COEFFICIENT_COLUMN, DEFAULT_GENE_PATTERN, GENE_INDEX,
    POPULATION_MEDIAN_HOURS, POPULATION_SD_HOURS, PREDICTED_AGE_COLUMN, PREDICTION_INTERCEPT,
    REFERENCE_LIFESPAN_DAYS, SAMPLE_INDEX,
};
pub use correction::{correct_bio_age, correct_file, correct_table};
pub use error::{BioAgeError, Result};
pub use io::{
    read_coefficients, read_coefficients_from, read_table, read_table_from, write_table,
    write_table_to,
};
pub use lifespan::{biological_age, lifespan_fold_change};
pub use predict::{preprocess, predict, score, AgePredictor, Coefficients, Predictor};
pub use results::{Predictions, SamplePrediction};
pub use table::{Cell, Table};
pub use uncertain::Uncertain;
