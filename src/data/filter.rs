//! Categorical filtering of the loaded dataset.
//! Pure functions of (DataFrame, FilterSelection); no state is kept here.

use polars::prelude::*;

use super::columns;

/// User-chosen constraints on the three categorical dimensions.
/// `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub industry: Option<String>,
    pub country: Option<String>,
    pub company_size: Option<String>,
}

/// Apply the selection conjunctively: a record survives only if it matches
/// every constrained dimension. A fully unconstrained selection returns the
/// dataset unchanged.
pub fn apply_filters(
    df: &DataFrame,
    selection: &FilterSelection,
) -> Result<DataFrame, PolarsError> {
    let mut lf = df.clone().lazy();

    if let Some(industry) = &selection.industry {
        lf = lf.filter(col(columns::INDUSTRY).eq(lit(industry.as_str())));
    }
    if let Some(country) = &selection.country {
        lf = lf.filter(col(columns::COUNTRY).eq(lit(country.as_str())));
    }
    if let Some(size) = &selection.company_size {
        lf = lf.filter(col(columns::COMPANY_SIZE).eq(lit(size.as_str())));
    }

    lf.collect()
}

/// Distinct non-null values of a categorical column, sorted ascending.
/// The UI prepends its "All" sentinel to this list.
pub fn filter_options(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .ok()
        .and_then(|col| col.unique().ok())
        .map(|unique| {
            let series = unique.as_materialized_series();
            let mut values: Vec<String> = (0..series.len())
                .filter_map(|i| {
                    let val = series.get(i).ok()?;
                    if val.is_null() {
                        None
                    } else {
                        Some(val.to_string().trim_matches('"').to_string())
                    }
                })
                .collect();
            values.sort();
            values
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample_df() -> DataFrame {
        df!(
            columns::COMPANY_ID => ["C1", "C2", "C3"],
            columns::INDUSTRY => ["A", "A", "B"],
            columns::COUNTRY => ["USA", "Mexico", "USA"],
            columns::COMPANY_SIZE => ["Large", "Small", "Medium"],
        )
        .unwrap()
    }

    #[test]
    fn unconstrained_selection_returns_full_dataset() {
        let df = sample_df();
        let view = apply_filters(&df, &FilterSelection::default()).unwrap();
        assert!(view.equals(&df));
    }

    #[test]
    fn industry_filter_keeps_only_matching_records() {
        let df = sample_df();
        let selection = FilterSelection {
            industry: Some("A".to_string()),
            ..Default::default()
        };
        let view = apply_filters(&df, &selection).unwrap();
        assert_eq!(view.height(), 2);
        assert_eq!(filter_options(&view, columns::INDUSTRY), vec!["A"]);
    }

    #[test]
    fn absent_category_yields_empty_view() {
        let df = sample_df();
        let selection = FilterSelection {
            industry: Some("C".to_string()),
            ..Default::default()
        };
        let view = apply_filters(&df, &selection).unwrap();
        assert_eq!(view.height(), 0);
    }

    #[test]
    fn dimensions_combine_conjunctively() {
        let df = sample_df();
        let selection = FilterSelection {
            industry: Some("A".to_string()),
            country: Some("USA".to_string()),
            ..Default::default()
        };
        let view = apply_filters(&df, &selection).unwrap();
        assert_eq!(view.height(), 1);
        assert_eq!(filter_options(&view, columns::COMPANY_ID), vec!["C1"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let df = sample_df();
        let selection = FilterSelection {
            country: Some("USA".to_string()),
            ..Default::default()
        };
        let once = apply_filters(&df, &selection).unwrap();
        let twice = apply_filters(&once, &selection).unwrap();
        assert!(once.equals(&twice));
    }

    #[test]
    fn filtered_view_is_subset_of_dataset() {
        let df = sample_df();
        let all_ids = filter_options(&df, columns::COMPANY_ID);
        for industry in ["A", "B", "C"] {
            let selection = FilterSelection {
                industry: Some(industry.to_string()),
                ..Default::default()
            };
            let view = apply_filters(&df, &selection).unwrap();
            assert!(view.height() <= df.height());
            for id in filter_options(&view, columns::COMPANY_ID) {
                assert!(all_ids.contains(&id));
            }
        }
    }

    #[test]
    fn options_are_distinct_and_sorted() {
        let df = sample_df();
        assert_eq!(filter_options(&df, columns::INDUSTRY), vec!["A", "B"]);
        assert_eq!(filter_options(&df, columns::COUNTRY), vec!["Mexico", "USA"]);
    }
}
