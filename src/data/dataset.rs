//! Height Dataset Module
//! Typed access to the loaded height table: records, distinct years, and
//! the per-(country, year) slices the chart is built from.

use super::loader::{
    self, LoadError, COL_AGE_GROUP, COL_COUNTRY, COL_MEAN_HEIGHT, COL_SEX, COL_STANDARD_ERROR,
    COL_YEAR,
};
use polars::prelude::*;

/// Sex of a height record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Boys,
    Girls,
}

impl Sex {
    pub fn label(self) -> &'static str {
        match self {
            Sex::Boys => "Boys",
            Sex::Girls => "Girls",
        }
    }

    pub fn parse(label: &str) -> Option<Sex> {
        match label {
            "Boys" => Some(Sex::Boys),
            "Girls" => Some(Sex::Girls),
            _ => None,
        }
    }
}

/// One row of the height table.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightRecord {
    pub country: String,
    pub sex: Sex,
    pub year: i32,
    pub age_group: String,
    pub mean_height: f64,
    pub standard_error: Option<f64>,
}

/// Sort key for age-group labels: leading integer first, label second, so
/// numeric ages order as numbers ("10" after "5") and non-numeric labels
/// fall back to lexicographic order.
pub fn age_group_sort_key(label: &str) -> (i64, String) {
    let digits: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let leading = digits.parse::<i64>().unwrap_or(i64::MAX);
    (leading, label.to_string())
}

/// The immutable in-memory height table, loaded once at startup.
pub struct HeightDataset {
    df: DataFrame,
}

impl HeightDataset {
    /// Load the dataset, failing on read errors or missing columns.
    pub fn load(file_path: &str) -> Result<Self, LoadError> {
        Ok(Self {
            df: loader::load_height_csv(file_path)?,
        })
    }

    /// Load the dataset, degrading to an empty table on any failure.
    ///
    /// The failure is reported to the log sink; callers see an empty
    /// dataset and render the no-data placeholder for every filter.
    pub fn load_or_empty(file_path: &str) -> Self {
        match Self::load(file_path) {
            Ok(dataset) => {
                tracing::info!(
                    rows = dataset.row_count(),
                    "loaded height dataset from {file_path}"
                );
                dataset
            }
            Err(e) => {
                tracing::error!("failed to load height dataset from {file_path}: {e}");
                Self::empty()
            }
        }
    }

    /// An empty table carrying the expected schema.
    pub fn empty() -> Self {
        let df = DataFrame::new(vec![
            Column::new(COL_COUNTRY.into(), Vec::<String>::new()),
            Column::new(COL_SEX.into(), Vec::<String>::new()),
            Column::new(COL_YEAR.into(), Vec::<i64>::new()),
            Column::new(COL_AGE_GROUP.into(), Vec::<String>::new()),
            Column::new(COL_MEAN_HEIGHT.into(), Vec::<f64>::new()),
        ])
        .unwrap_or_default();
        Self { df }
    }

    pub(crate) fn from_frame(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Whether the optional standard-error column is present.
    pub fn has_standard_error(&self) -> bool {
        self.df
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == COL_STANDARD_ERROR)
    }

    /// Distinct years present in the table, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .df
            .column(COL_YEAR)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                unique
                    .as_materialized_series()
                    .iter()
                    .filter_map(|val| {
                        if val.is_null() {
                            None
                        } else {
                            val.to_string().trim_matches('"').parse::<i32>().ok()
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// All records matching a (country, year) pair.
    ///
    /// Rows with a null or non-finite mean height, or a sex label that is
    /// neither `Boys` nor `Girls`, are skipped.
    pub fn records_for(&self, country: &str, year: i32) -> Result<Vec<HeightRecord>, PolarsError> {
        if self.df.height() == 0 {
            return Ok(Vec::new());
        }

        let filtered = self
            .df
            .clone()
            .lazy()
            .filter(
                col(COL_COUNTRY)
                    .eq(lit(country))
                    .and(col(COL_YEAR).cast(DataType::Int64).eq(lit(year as i64))),
            )
            .collect()?;

        let country_col = filtered.column(COL_COUNTRY)?;
        let sex_col = filtered.column(COL_SEX)?;
        let age_col = filtered.column(COL_AGE_GROUP)?;
        let mean_col = filtered.column(COL_MEAN_HEIGHT)?.cast(&DataType::Float64)?;
        let mean_ca = mean_col.f64()?;
        let err_col = match filtered.column(COL_STANDARD_ERROR) {
            Ok(col) => Some(col.cast(&DataType::Float64)?),
            Err(_) => None,
        };
        let err_ca = match err_col.as_ref() {
            Some(col) => Some(col.f64()?),
            None => None,
        };

        let mut records = Vec::with_capacity(filtered.height());
        for i in 0..filtered.height() {
            let Some(mean_height) = mean_ca.get(i).filter(|v| v.is_finite()) else {
                continue;
            };
            let (Ok(country_val), Ok(sex_val), Ok(age_val)) =
                (country_col.get(i), sex_col.get(i), age_col.get(i))
            else {
                continue;
            };
            if country_val.is_null() || sex_val.is_null() || age_val.is_null() {
                continue;
            }

            let sex_label = any_value_to_string(&sex_val);
            let Some(sex) = Sex::parse(&sex_label) else {
                tracing::debug!("skipping row with unrecognized sex label {sex_label:?}");
                continue;
            };

            let standard_error = err_ca
                .and_then(|ca| ca.get(i))
                .filter(|v| v.is_finite());

            records.push(HeightRecord {
                country: any_value_to_string(&country_val),
                sex,
                year,
                age_group: any_value_to_string(&age_val),
                mean_height,
                standard_error,
            });
        }

        Ok(records)
    }
}

fn any_value_to_string(val: &AnyValue) -> String {
    val.to_string().trim_matches('"').to_string()
}
