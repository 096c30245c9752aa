use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use log::info;

use crate::{
    config::Delimiter,
    predict::Coefficients,
    table::{Cell, Table},
};

/// Reads a delimited table whose first column holds the row identifiers
pub fn read_table<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let table = read_table_from(file, delimiter)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!(
        "Read {} rows and {} columns from {}",
        table.n_rows(),
        table.n_cols(),
        path.display()
    );
    Ok(table)
}

pub fn read_table_from<R: Read>(reader: R, delimiter: Delimiter) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut header_fields = headers.iter();
    let index_name = header_fields
        .next()
        .ok_or_else(|| anyhow!("The table has no header"))?
        .trim()
        .to_string();
    let columns = header_fields
        .map(|name| name.trim().to_string())
        .collect::<Vec<_>>();

    let mut index = Vec::new();
    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read record {}", line + 1))?;
        let mut fields = record.iter();
        let Some(id) = fields.next() else {
            bail!("Record {} is empty", line + 1);
        };
        index.push(id.trim().to_string());
        rows.push(fields.map(Cell::parse).collect());
    }

    Ok(Table::new(index_name, index, columns, rows)?)
}

/// Reads a two-column gene/coefficient table
///
/// The header of the second column becomes the coefficient name.
pub fn read_coefficients<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Coefficients> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let coefficients = read_coefficients_from(file, delimiter)
        .with_context(|| format!("Failed to parse coefficients from {}", path.display()))?;
    info!(
        "Read {} predictor coefficients from {}",
        coefficients.len(),
        path.display()
    );
    Ok(coefficients)
}

pub fn read_coefficients_from<R: Read>(reader: R, delimiter: Delimiter) -> Result<Coefficients> {
    let table = read_table_from(reader, delimiter)?;
    let Some(name) = table.columns().first() else {
        bail!("The coefficient table has no coefficient column");
    };
    let weights = table
        .numeric_column(name)?
        .into_iter()
        .zip(table.index())
        .map(|(weight, gene)| weight.ok_or_else(|| anyhow!("Gene '{}' has no coefficient", gene)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Coefficients::new(
        name.clone(),
        table.index().to_vec(),
        weights,
    )?)
}

pub fn write_table_to<W: Write>(table: &Table, writer: W, delimiter: Delimiter) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_writer(writer);

    writer.write_record(
        std::iter::once(table.index_name()).chain(table.columns().iter().map(String::as_str)),
    )?;
    for (id, row) in table.index().iter().zip(table.rows()) {
        writer.write_record(
            std::iter::once(id.clone()).chain(row.iter().map(|cell| cell.to_string())),
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_table<P: AsRef<Path>>(table: &Table, path: P, delimiter: Delimiter) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_table_to(table, file, delimiter)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BioAgeError;

    const SAMPLES: &str = "\
Sample,Strain,WBGene00000001,WBGene00000002,Bio_Age
s1,N2,1.5,0,250
s2,daf-2,,3.25,NA
";

    #[test]
    fn test_read_table() {
        let table = read_table_from(SAMPLES.as_bytes(), Delimiter::Comma).unwrap();
        assert_eq!(table.index_name(), "Sample");
        assert_eq!(table.index(), &["s1".to_string(), "s2".to_string()]);
        assert_eq!(table.n_cols(), 4);
        assert_eq!(table.cell(0, 0), &Cell::Text("N2".to_string()));
        assert_eq!(table.cell(0, 1), &Cell::Number(1.5));
        assert_eq!(table.cell(1, 1), &Cell::Missing);
        assert_eq!(table.cell(1, 3), &Cell::Missing);
    }

    #[test]
    fn test_read_tab_delimited() {
        let raw = "Gene_ID\tSRR1\tSRR2\nWBGene1\t2.97\t1.42\nWBGene2\t0\t0\n";
        let table = read_table_from(raw.as_bytes(), Delimiter::Tab).unwrap();
        assert_eq!(table.index_name(), "Gene_ID");
        assert_eq!(table.columns(), &["SRR1".to_string(), "SRR2".to_string()]);
        assert_eq!(table.cell(0, 1), &Cell::Number(1.42));
    }

    #[test]
    fn test_read_ragged_table_fails() {
        let raw = "Sample,a,b\ns1,1\n";
        assert!(read_table_from(raw.as_bytes(), Delimiter::Comma).is_err());
    }

    #[test]
    fn test_read_duplicate_columns_fails() {
        let raw = "Sample,a,a\ns1,1,2\n";
        let err = read_table_from(raw.as_bytes(), Delimiter::Comma).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BioAgeError>(),
            Some(&BioAgeError::DuplicateColumn("a".to_string()))
        );
    }

    #[test]
    fn test_read_coefficients() {
        let raw = "WormBaseID,ElasticNet_Coef\nWBGene00012747,-3.9183849126\nWBGene00011554,-3.6615313969\n";
        let coefficients = read_coefficients_from(raw.as_bytes(), Delimiter::Comma).unwrap();
        assert_eq!(coefficients.name(), "ElasticNet_Coef");
        assert_eq!(coefficients.len(), 2);
        assert_eq!(coefficients.get("WBGene00011554"), Some(-3.6615313969));
    }

    #[test]
    fn test_read_coefficients_rejects_text() {
        let raw = "WormBaseID,ElasticNet_Coef\nWBGene1,high\n";
        let err = read_coefficients_from(raw.as_bytes(), Delimiter::Comma).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BioAgeError>(),
            Some(BioAgeError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_read_coefficients_rejects_duplicates() {
        let raw = "WormBaseID,ElasticNet_Coef\nWBGene1,1.0\nWBGene1,2.0\n";
        let err = read_coefficients_from(raw.as_bytes(), Delimiter::Comma).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BioAgeError>(),
            Some(&BioAgeError::DuplicateGene("WBGene1".to_string()))
        );
    }

    #[test]
    fn test_read_coefficients_rejects_missing() {
        let raw = "WormBaseID,ElasticNet_Coef\nWBGene1,\n";
        assert!(read_coefficients_from(raw.as_bytes(), Delimiter::Comma).is_err());
    }

    #[test]
    fn test_write_table() {
        let table = read_table_from(SAMPLES.as_bytes(), Delimiter::Comma).unwrap();
        let mut buffer = Vec::new();
        write_table_to(&table, &mut buffer, Delimiter::Tab).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        assert_eq!(
            written,
            "Sample\tStrain\tWBGene00000001\tWBGene00000002\tBio_Age\n\
             s1\tN2\t1.5\t0\t250\n\
             s2\tdaf-2\t\t3.25\t\n"
        );
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        let table = read_table_from(SAMPLES.as_bytes(), Delimiter::Comma).unwrap();
        write_table(&table, &path, Delimiter::Comma).unwrap();
        assert_eq!(read_table(&path, Delimiter::Comma).unwrap(), table);
    }

    #[test]
    fn test_missing_file() {
        let err = read_table("does/not/exist.csv", Delimiter::Comma).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
