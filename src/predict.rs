use std::{collections::HashMap, path::Path};

use anyhow::Context;
use derive_new::new;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    binarize::binarize,
    config::{
        Delimiter, GeneFilter, DEFAULT_COEFFICIENT_COLUMN, PREDICTION_INTERCEPT, SAMPLE_INDEX,
    },
    error::{BioAgeError, Result},
    io::{read_coefficients, read_table},
    math::linear_score,
    results::{Predictions, SamplePrediction},
    table::{Cell, Table},
    utils::first_duplicate,
};

/// Elastic net coefficients keyed by gene identifier
///
/// Each gene resolves to exactly one coefficient. Gene order is the order
/// in which the coefficients were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    name: String,
    genes: Vec<String>,
    weights: Vec<f64>,
}
impl Coefficients {
    pub fn new(name: impl Into<String>, genes: Vec<String>, weights: Vec<f64>) -> Result<Self> {
        if genes.len() != weights.len() {
            return Err(BioAgeError::LengthMismatch {
                expected: genes.len(),
                found: weights.len(),
            });
        }
        if let Some(gene) = first_duplicate(&genes) {
            return Err(BioAgeError::DuplicateGene(gene.clone()));
        }
        Ok(Self {
            name: name.into(),
            genes,
            weights,
        })
    }

    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Result<Self> {
        let (genes, weights): (Vec<String>, Vec<f64>) = pairs
            .into_iter()
            .map(|(gene, weight)| (gene.into(), weight))
            .unzip();
        Self::new(DEFAULT_COEFFICIENT_COLUMN, genes, weights)
    }

    /// Column name under which the coefficients are attached
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn get(&self, gene: &str) -> Option<f64> {
        self.genes
            .iter()
            .position(|g| g == gene)
            .map(|i| self.weights[i])
    }
}

/// A linear predictor of biological age over binarized gene expression
#[derive(Debug, Clone, PartialEq, new)]
pub struct Predictor {
    coefficients: Coefficients,
    intercept: f64,
}
impl Predictor {
    pub fn with_default_intercept(coefficients: Coefficients) -> Self {
        Self::new(coefficients, PREDICTION_INTERCEPT)
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Builds the scoring frame from a gene-by-sample expression table
///
/// The expression table is binarized per sample, restricted to the
/// predictor genes and returned with genes as rows, samples as columns and
/// a trailing coefficient column. A predictor gene that is not among the
/// filtered expression columns is a `MissingGene` error.
pub fn preprocess(
    expression: &Table,
    coefficients: &Coefficients,
    filter: &GeneFilter,
) -> Result<Table> {
    let samples = expression.transpose(SAMPLE_INDEX)?;
    let binary = binarize(&samples, filter)?;

    let available = filter
        .select(binary.columns())
        .into_iter()
        .map(|position| (binary.columns()[position].as_str(), position))
        .collect::<HashMap<_, _>>();
    let positions = coefficients
        .genes()
        .iter()
        .map(|gene| {
            available
                .get(gene.as_str())
                .copied()
                .ok_or_else(|| BioAgeError::MissingGene(gene.clone()))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "Selected {} predictor genes out of {} expression genes",
        positions.len(),
        available.len()
    );

    let frame = binary
        .select_positions(&positions)
        .transpose(expression.index_name())?;
    let weights = coefficients
        .weights()
        .iter()
        .map(|w| Cell::Number(*w))
        .collect();
    frame.append_column(coefficients.name(), weights)
}

/// Scores every sample column of a frame produced by [`preprocess`]
///
/// The last column holds the coefficients. Missing flags count as 0.
pub fn score(frame: &Table, intercept: f64) -> Result<Predictions> {
    let coefficient_column = frame
        .n_cols()
        .checked_sub(1)
        .ok_or_else(|| BioAgeError::MissingColumn(DEFAULT_COEFFICIENT_COLUMN.to_string()))?;
    let weights = frame
        .numeric_column(&frame.columns()[coefficient_column])?
        .into_iter()
        .map(|w| w.unwrap_or(f64::NAN))
        .collect::<Vec<_>>();

    let predictions = frame.columns()[..coefficient_column]
        .par_iter()
        .map(|sample| -> Result<SamplePrediction> {
            let flags = frame
                .numeric_column(sample)?
                .into_iter()
                .map(|flag| flag.unwrap_or(0.0))
                .collect::<Vec<_>>();
            Ok(SamplePrediction::builder()
                .sample(sample.clone())
                .age(linear_score(&flags, &weights, intercept))
                .build())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Predictions::from_vec(predictions))
}

/// Predicts biological age for every sample of an expression table
pub struct AgePredictor<'a> {
    expression: &'a Table,
    predictor: &'a Predictor,
    filter: GeneFilter,
}
impl<'a> AgePredictor<'a> {
    pub fn new(expression: &'a Table, predictor: &'a Predictor, filter: GeneFilter) -> Self {
        Self {
            expression,
            predictor,
            filter,
        }
    }

    /// Run the prediction
    ///
    /// 1. Binarize each sample against its own median
    /// 2. Restrict to the predictor genes and attach their coefficients
    /// 3. Sum the coefficients of the flagged genes and add the intercept
    pub fn run(&self) -> Result<Predictions> {
        let frame = preprocess(
            self.expression,
            self.predictor.coefficients(),
            &self.filter,
        )?;
        score(&frame, self.predictor.intercept())
    }
}

/// Reads an expression file and a comma-delimited coefficient file and
/// predicts the biological age of each sample with the default intercept
pub fn predict<P: AsRef<Path>, Q: AsRef<Path>>(
    expression_path: P,
    coefficient_path: Q,
    expression_delimiter: Delimiter,
) -> anyhow::Result<Predictions> {
    let coefficients = read_coefficients(coefficient_path, Delimiter::Comma)?;
    let expression = read_table(expression_path.as_ref(), expression_delimiter)?;
    info!(
        "Predicting biological age of {} samples from {} predictor genes",
        expression.n_cols(),
        coefficients.len()
    );
    let predictor = Predictor::with_default_intercept(coefficients);
    AgePredictor::new(&expression, &predictor, GeneFilter::default())
        .run()
        .with_context(|| {
            format!(
                "Failed to predict biological age from {}",
                expression_path.as_ref().display()
            )
        })
}
