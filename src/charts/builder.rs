//! Chart Builder Module
//! Pure chart-description construction: from the dataset and the current
//! filter selection to a drawable description, with no drawing state.

use crate::data::{age_group_sort_key, HeightDataset, Sex};
use polars::prelude::PolarsError;
use thiserror::Error;

/// The dataset is filtered to this country before charting.
pub const COUNTRY: &str = "China";

/// Width of one bar in category-axis units.
pub const BAR_WIDTH: f64 = 0.35;

/// Vertical gap between a bar top and its value label.
pub const LABEL_GAP: f64 = 1.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart data query failed: {0}")]
    Query(#[from] PolarsError),
}

/// Which sexes the chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SexFilter {
    #[default]
    All,
    Boys,
    Girls,
}

impl SexFilter {
    pub fn includes(self, sex: Sex) -> bool {
        match self {
            SexFilter::All => true,
            SexFilter::Boys => sex == Sex::Boys,
            SexFilter::Girls => sex == Sex::Girls,
        }
    }
}

/// The (sex, year) pair supplied by the UI controls on each change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub sex: SexFilter,
    pub year: i32,
}

/// One bar of the chart, already positioned on the category axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub age_group: String,
    /// Center of the bar: age-group index offset by half a bar width.
    pub x: f64,
    pub mean_height: f64,
    pub standard_error: Option<f64>,
    /// Rounded mean height, drawn above the bar.
    pub label: String,
}

/// All bars for one sex.
#[derive(Debug, Clone, PartialEq)]
pub struct SexSeries {
    pub sex: Sex,
    pub bars: Vec<ChartBar>,
}

/// Complete description of a rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub year: i32,
    /// Category axis, ascending.
    pub age_groups: Vec<String>,
    pub series: Vec<SexSeries>,
    pub y_min: f64,
    pub y_max: f64,
}

/// Result of a chart update.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    /// No rows matched the selection; show the placeholder.
    NoData,
    Chart(ChartSpec),
}

/// Build the chart description for the current selection.
///
/// Rows are filtered to [`COUNTRY`] and the selected year. The y-range spans
/// the mean heights of both sexes in that slice, so toggling the sex filter
/// does not rescale the axis. Duplicate (sex, age group) rows are not
/// validated; the first record after the age-group sort wins.
pub fn build_chart(
    dataset: &HeightDataset,
    selection: FilterSelection,
) -> Result<ChartOutcome, RenderError> {
    let mut records = dataset.records_for(COUNTRY, selection.year)?;
    if records.is_empty() {
        return Ok(ChartOutcome::NoData);
    }

    records.sort_by(|a, b| age_group_sort_key(&a.age_group).cmp(&age_group_sort_key(&b.age_group)));

    let mut age_groups: Vec<String> = Vec::new();
    for record in &records {
        if !age_groups.contains(&record.age_group) {
            age_groups.push(record.age_group.clone());
        }
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for record in &records {
        lo = lo.min(record.mean_height);
        hi = hi.max(record.mean_height);
    }

    let mut series = Vec::new();
    for sex in [Sex::Boys, Sex::Girls] {
        if !selection.sex.includes(sex) {
            continue;
        }
        // Side-by-side grouped bars; the offset is kept even when a single
        // sex is shown.
        let offset = match sex {
            Sex::Boys => -BAR_WIDTH / 2.0,
            Sex::Girls => BAR_WIDTH / 2.0,
        };

        let mut bars = Vec::new();
        for (idx, age_group) in age_groups.iter().enumerate() {
            let Some(record) = records
                .iter()
                .find(|r| r.sex == sex && &r.age_group == age_group)
            else {
                continue;
            };
            bars.push(ChartBar {
                age_group: age_group.clone(),
                x: idx as f64 + offset,
                mean_height: record.mean_height,
                standard_error: record.standard_error,
                label: format!("{}", record.mean_height.round() as i64),
            });
        }
        if !bars.is_empty() {
            series.push(SexSeries { sex, bars });
        }
    }

    Ok(ChartOutcome::Chart(ChartSpec {
        title: format!("China child height comparison, {}", selection.year),
        year: selection.year,
        age_groups,
        series,
        y_min: lo * 0.95,
        y_max: hi * 1.05,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        HeightDataset, COL_AGE_GROUP, COL_COUNTRY, COL_MEAN_HEIGHT, COL_SEX, COL_STANDARD_ERROR,
        COL_YEAR,
    };
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn sample_dataset(with_standard_error: bool) -> HeightDataset {
        let mut columns = vec![
            Column::new(
                COL_COUNTRY.into(),
                vec!["China", "China", "China", "China", "India"],
            ),
            Column::new(
                COL_SEX.into(),
                vec!["Boys", "Boys", "Girls", "Girls", "Boys"],
            ),
            Column::new(COL_YEAR.into(), vec![2019i64, 2019, 2019, 2019, 2019]),
            Column::new(COL_AGE_GROUP.into(), vec![5i64, 6, 5, 6, 5]),
            Column::new(
                COL_MEAN_HEIGHT.into(),
                vec![110.2, 116.4, 109.8, 115.9, 108.0],
            ),
        ];
        if with_standard_error {
            columns.push(Column::new(
                COL_STANDARD_ERROR.into(),
                vec![0.3, 0.4, 0.2, 0.5, 0.3],
            ));
        }
        HeightDataset::from_frame(DataFrame::new(columns).expect("sample frame"))
    }

    fn spec_for(sex: SexFilter, year: i32, with_standard_error: bool) -> ChartOutcome {
        build_chart(
            &sample_dataset(with_standard_error),
            FilterSelection { sex, year },
        )
        .expect("build must succeed")
    }

    fn bar_count(spec: &ChartSpec) -> usize {
        spec.series.iter().map(|s| s.bars.len()).sum()
    }

    #[test]
    fn all_filter_yields_grouped_bars_for_both_sexes() {
        let ChartOutcome::Chart(spec) = spec_for(SexFilter::All, 2019, true) else {
            panic!("expected a chart");
        };

        assert_eq!(spec.age_groups, vec!["5", "6"]);
        assert_eq!(spec.series.len(), 2);
        assert_eq!(bar_count(&spec), 4);

        let boys = &spec.series[0];
        let girls = &spec.series[1];
        assert_eq!(boys.sex, crate::data::Sex::Boys);
        assert_eq!(girls.sex, crate::data::Sex::Girls);
        // Side-by-side offsets around the category index
        assert_relative_eq!(boys.bars[0].x, -BAR_WIDTH / 2.0);
        assert_relative_eq!(girls.bars[0].x, BAR_WIDTH / 2.0);
        assert_relative_eq!(boys.bars[1].x, 1.0 - BAR_WIDTH / 2.0);
    }

    #[test]
    fn boys_filter_yields_rounded_labels() {
        let ChartOutcome::Chart(spec) = spec_for(SexFilter::Boys, 2019, true) else {
            panic!("expected a chart");
        };

        assert_eq!(spec.series.len(), 1);
        let labels: Vec<&str> = spec.series[0].bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["110", "116"]);
    }

    #[test]
    fn y_axis_bounds_scale_to_the_full_year_slice() {
        // Bounds come from both sexes even when only boys are shown
        let ChartOutcome::Chart(spec) = spec_for(SexFilter::Boys, 2019, true) else {
            panic!("expected a chart");
        };

        assert_relative_eq!(spec.y_min, 109.8 * 0.95);
        assert_relative_eq!(spec.y_max, 116.4 * 1.05);
    }

    #[test]
    fn unmatched_year_renders_placeholder() {
        assert_eq!(spec_for(SexFilter::All, 1999, true), ChartOutcome::NoData);
    }

    #[test]
    fn empty_dataset_renders_placeholder() {
        let outcome = build_chart(
            &HeightDataset::empty(),
            FilterSelection {
                sex: SexFilter::All,
                year: 2019,
            },
        )
        .expect("build must succeed");
        assert_eq!(outcome, ChartOutcome::NoData);
    }

    #[test]
    fn missing_standard_error_column_drops_error_bars() {
        let ChartOutcome::Chart(spec) = spec_for(SexFilter::All, 2019, false) else {
            panic!("expected a chart");
        };

        assert!(spec
            .series
            .iter()
            .flat_map(|s| &s.bars)
            .all(|b| b.standard_error.is_none()));
    }

    #[test]
    fn sex_filter_membership() {
        use crate::data::Sex;
        assert!(SexFilter::All.includes(Sex::Boys));
        assert!(SexFilter::All.includes(Sex::Girls));
        assert!(SexFilter::Boys.includes(Sex::Boys));
        assert!(!SexFilter::Boys.includes(Sex::Girls));
        assert!(!SexFilter::Girls.includes(Sex::Boys));
    }
}
