//! CSV Data Loader Module
//! Reads the height statistics CSV into a DataFrame using Polars and
//! validates the expected column set.

use polars::prelude::*;
use thiserror::Error;

pub const COL_COUNTRY: &str = "Country";
pub const COL_SEX: &str = "Sex";
pub const COL_YEAR: &str = "Year";
pub const COL_AGE_GROUP: &str = "Age group";
pub const COL_MEAN_HEIGHT: &str = "Mean height";
/// Optional column; when present it is rendered as error bars.
pub const COL_STANDARD_ERROR: &str = "standard error";

/// Columns that must be present after header trimming.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_COUNTRY,
    COL_SEX,
    COL_YEAR,
    COL_AGE_GROUP,
    COL_MEAN_HEIGHT,
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Required columns missing: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

/// Load the height CSV and return a DataFrame with trimmed column names.
///
/// Column headers may carry incidental surrounding whitespace; they are
/// trimmed before the required-column check so that `" Mean height "`
/// matches `"Mean height"`.
pub fn load_height_csv(file_path: &str) -> Result<DataFrame, LoadError> {
    // Use lazy evaluation for memory efficiency, then collect
    let mut df = LazyCsvReader::new(file_path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    trim_column_names(&mut df)?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|have| have == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns { missing });
    }

    Ok(df)
}

/// Strip surrounding whitespace from every column name.
fn trim_column_names(df: &mut DataFrame) -> Result<(), PolarsError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for name in names {
        let trimmed = name.trim();
        if trimmed != name {
            df.rename(&name, trimmed.into())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file.flush().expect("flush csv");
        file
    }

    #[test]
    fn load_preserves_rows_and_values() {
        let file = write_csv(
            "Country,Sex,Year,Age group,Mean height,standard error\n\
             China,Boys,2019,5,110.2,0.3\n\
             China,Girls,2019,5,109.8,0.2\n",
        );

        let df = load_height_csv(file.path().to_str().unwrap()).expect("load must succeed");
        assert_eq!(df.height(), 2);

        let means = df
            .column(COL_MEAN_HEIGHT)
            .unwrap()
            .cast(&DataType::Float64)
            .unwrap();
        let means = means.f64().unwrap();
        assert_eq!(means.get(0), Some(110.2));
        assert_eq!(means.get(1), Some(109.8));
    }

    #[test]
    fn load_trims_whitespace_in_column_names() {
        let file = write_csv(
            " Country , Sex ,Year , Age group ,Mean height \n\
             China,Boys,2019,5,110.2\n",
        );

        let df = load_height_csv(file.path().to_str().unwrap()).expect("load must succeed");
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for required in REQUIRED_COLUMNS {
            assert!(
                columns.iter().any(|c| c == required),
                "column {required:?} missing from {columns:?}"
            );
        }
    }

    #[test]
    fn load_rejects_missing_required_columns() {
        let file = write_csv(
            "Country,Sex,Year,Age group\n\
             China,Boys,2019,5\n",
        );

        let err = load_height_csv(file.path().to_str().unwrap())
            .expect_err("missing Mean height must fail");
        match err {
            LoadError::MissingColumns { missing } => {
                assert_eq!(missing, vec![COL_MEAN_HEIGHT.to_string()]);
            }
            other => panic!("expected MissingColumns, got {other}"),
        }
    }

    #[test]
    fn load_fails_for_missing_file() {
        let err = load_height_csv("definitely/not/here.csv").expect_err("missing file must fail");
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
