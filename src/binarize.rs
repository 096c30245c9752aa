use log::{debug, warn};
use rayon::prelude::*;

use crate::{
    config::GeneFilter,
    error::Result,
    math::detected_median,
    table::{Cell, Table},
};

/// Flags each value that lies strictly above the row's detected median
///
/// Zeros and missing values are excluded from the median and are never
/// flagged. A value equal to the median maps to 0. If no value is detected
/// the whole row is 0.
pub fn binarize_values(values: &[Option<f64>]) -> Vec<u8> {
    let Some(median) = detected_median(values) else {
        return vec![0; values.len()];
    };
    values
        .iter()
        .map(|value| match value {
            Some(v) if *v != 0.0 && *v > median => 1,
            _ => 0,
        })
        .collect()
}

/// Binarizes the gene columns of a sample table
///
/// Rows are samples. Columns selected by `filter` are replaced with 0/1
/// flags relative to each row's median; every other column is carried over
/// unchanged.
pub fn binarize(table: &Table, filter: &GeneFilter) -> Result<Table> {
    let genes = filter.select(table.columns());
    if genes.is_empty() {
        warn!("No columns matched the gene filter {:?}", filter);
    }
    debug!(
        "Binarizing {} samples over {} gene columns",
        table.n_rows(),
        genes.len()
    );

    let flags = (0..table.n_rows())
        .into_par_iter()
        .map(|row| {
            table
                .numeric_row(row, &genes)
                .map(|values| binarize_values(&values))
        })
        .collect::<Result<Vec<_>>>()?;

    let rows = table
        .rows()
        .iter()
        .zip(flags)
        .map(|(row, row_flags)| {
            let mut row = row.clone();
            for (&column, flag) in genes.iter().zip(row_flags) {
                row[column] = Cell::Number(f64::from(flag));
            }
            row
        })
        .collect();

    Table::new(
        table.index_name(),
        table.index().to_vec(),
        table.columns().to_vec(),
        rows,
    )
}
