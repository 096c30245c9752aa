use std::io::{self, Write};

use bon::Builder;

use crate::{
    config::{PREDICTED_AGE_COLUMN, SAMPLE_INDEX},
    error::Result,
    table::{Cell, Table},
};

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SamplePrediction {
    pub sample: String,
    /// Predicted biological age in hours
    pub age: f64,
}

/// Predicted biological ages, one per sample in input column order
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub samples: Vec<String>,
    pub ages: Vec<f64>,
}
impl Predictions {
    pub fn from_vec(predictions: Vec<SamplePrediction>) -> Self {
        let mut samples = vec![];
        let mut ages = vec![];
        for prediction in predictions {
            samples.push(prediction.sample);
            ages.push(prediction.age);
        }
        Self { samples, ages }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, sample: &str) -> Option<f64> {
        self.samples
            .iter()
            .position(|s| s == sample)
            .map(|i| self.ages[i])
    }

    /// Converts the predictions into a `Sample`-indexed table
    pub fn to_table(&self) -> Result<Table> {
        Table::new(
            SAMPLE_INDEX,
            self.samples.clone(),
            vec![PREDICTED_AGE_COLUMN.to_string()],
            self.ages.iter().map(|age| vec![Cell::Number(*age)]).collect(),
        )
    }

    /// Writes the predictions as tab-separated lines with a header
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}\t{}", SAMPLE_INDEX, PREDICTED_AGE_COLUMN)?;
        for (sample, age) in self.samples.iter().zip(self.ages.iter()) {
            writeln!(writer, "{}\t{}", sample, age)?;
        }
        Ok(())
    }

    pub fn pprint(&self) -> io::Result<()> {
        self.write(io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictions() -> Predictions {
        Predictions::from_vec(vec![
            SamplePrediction::builder()
                .sample("SRR1".to_string())
                .age(250.0)
                .build(),
            SamplePrediction::builder()
                .sample("SRR2".to_string())
                .age(120.5)
                .build(),
        ])
    }

    #[test]
    fn test_from_vec_keeps_order() {
        let predictions = predictions();
        assert_eq!(predictions.samples, vec!["SRR1", "SRR2"]);
        assert_eq!(predictions.ages, vec![250.0, 120.5]);
        assert_eq!(predictions.get("SRR2"), Some(120.5));
        assert_eq!(predictions.get("SRR3"), None);
    }

    #[test]
    fn test_write() {
        let mut buffer = Vec::new();
        predictions().write(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Sample\tPredicted_Biological_Age\nSRR1\t250\nSRR2\t120.5\n"
        );
        predictions().pprint().unwrap();
    }

    #[test]
    fn test_to_table() {
        let table = predictions().to_table().unwrap();
        assert_eq!(table.index_name(), SAMPLE_INDEX);
        assert_eq!(table.columns(), &[PREDICTED_AGE_COLUMN.to_string()]);
        assert_eq!(table.cell(1, 0), &Cell::Number(120.5));
    }
}
