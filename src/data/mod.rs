//! Data module - CSV loading and dataset access

mod dataset;
mod loader;

pub use dataset::{age_group_sort_key, HeightDataset, HeightRecord, Sex};
pub use loader::{LoadError, COL_AGE_GROUP, COL_COUNTRY, COL_MEAN_HEIGHT, COL_SEX, COL_STANDARD_ERROR, COL_YEAR};
