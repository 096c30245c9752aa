use std::{f64::consts::SQRT_2, path::Path};

use anyhow::Context;
use log::debug;

use crate::{
    config::{Delimiter, TruncationConfig, CORRECTED_AGE_COLUMN},
    error::Result,
    io::read_table,
    math::truncation_shift,
    table::{Cell, Table},
};

/// Corrects a single biological age (hours) for truncation of the lifespan distribution
///
/// The returned value approximates the median of the population that remains
/// when the sample itself and the right tail beyond it are removed. NaN and
/// infinite inputs propagate through the formula.
pub fn correct_bio_age(y: f64, config: &TruncationConfig) -> f64 {
    let shift = truncation_shift(y, config.median, config.sd);
    y - shift * SQRT_2 * 2.0 * config.sd
}

/// Returns a copy of `table` with a `Corrected_Biological_Age` column
/// computed from `age_column`
///
/// Missing ages yield NaN. Text in the age column is rejected.
pub fn correct_table(table: &Table, age_column: &str, config: &TruncationConfig) -> Result<Table> {
    let ages = table.numeric_column(age_column)?;
    let corrected = ages
        .into_iter()
        .map(|age| Cell::Number(correct_bio_age(age.unwrap_or(f64::NAN), config)))
        .collect::<Vec<_>>();
    debug!(
        "Corrected {} biological ages from column '{}'",
        corrected.len(),
        age_column
    );
    table.with_column(CORRECTED_AGE_COLUMN, corrected)
}

/// Reads a sample table and corrects its biological ages with the
/// reference population parameters
pub fn correct_file<P: AsRef<Path>>(
    path: P,
    delimiter: Delimiter,
    age_column: &str,
) -> anyhow::Result<Table> {
    let table = read_table(path.as_ref(), delimiter)?;
    correct_table(&table, age_column, &TruncationConfig::default()).with_context(|| {
        format!(
            "Failed to correct biological ages in {}",
            path.as_ref().display()
        )
    })
}
