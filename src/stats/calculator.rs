//! Aggregation Calculator Module
//! Descriptive aggregates computed over the filtered view: counts, means,
//! grouped means, top-N ranking and the Pearson correlation matrix.
//! Everything here is a pure function of its inputs; an empty view yields
//! empty vectors or `None`, never an error.

use std::collections::BTreeMap;

use polars::prelude::*;
use statrs::statistics::Statistics;

use crate::data::columns;

/// Number of records in the ranking table.
pub const TOP_N: usize = 10;

/// Mean of a numeric field for one category value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub label: String,
    pub mean: f64,
}

/// One row of the top-N ranking table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCompany {
    pub company_id: String,
    pub industry: String,
    pub country: String,
    pub value: f64,
}

/// Pairwise Pearson correlations. A cell is `None` when a pair has fewer
/// than two complete rows or one of the columns has zero variance.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Number of records in the view.
pub fn record_count(df: &DataFrame) -> usize {
    df.height()
}

/// Mean of a numeric column, ignoring nulls. `None` over zero rows.
pub fn column_mean(df: &DataFrame, column: &str) -> Result<Option<f64>, PolarsError> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.mean())
}

/// Mean of `value_col` per distinct value of `group_col`, sorted descending
/// by the mean. Groups whose mean is undefined are dropped.
pub fn grouped_mean(
    df: &DataFrame,
    group_col: &str,
    value_col: &str,
) -> Result<Vec<GroupMean>, PolarsError> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let grouped = df
        .clone()
        .lazy()
        .group_by([col(group_col)])
        .agg([col(value_col).cast(DataType::Float64).mean().alias("avg")])
        .sort(
            ["avg"],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true),
        )
        .collect()?;

    let labels = grouped.column(group_col)?;
    let means = grouped.column("avg")?.f64()?;

    let mut out = Vec::with_capacity(grouped.height());
    for i in 0..grouped.height() {
        let (Ok(label), Some(mean)) = (labels.get(i), means.get(i)) else {
            continue;
        };
        if label.is_null() || mean.is_nan() {
            continue;
        }
        out.push(GroupMean {
            label: label.to_string().trim_matches('"').to_string(),
            mean,
        });
    }
    Ok(out)
}

/// Top-N records by a numeric field, descending. Ties keep their original
/// input order; records with a null value are excluded.
pub fn top_companies(
    df: &DataFrame,
    value_col: &str,
    n: usize,
) -> Result<Vec<RankedCompany>, PolarsError> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let sorted = df.sort(
        [value_col],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_maintain_order(true)
            .with_nulls_last(true),
    )?;
    let top = sorted.head(Some(n));

    let ids = top.column(columns::COMPANY_ID)?;
    let industries = top.column(columns::INDUSTRY)?;
    let countries = top.column(columns::COUNTRY)?;
    let values_cast = top.column(value_col)?.cast(&DataType::Float64)?;
    let values = values_cast.f64()?;

    let mut out = Vec::with_capacity(top.height());
    for i in 0..top.height() {
        let (Ok(id), Ok(industry), Ok(country), Some(value)) =
            (ids.get(i), industries.get(i), countries.get(i), values.get(i))
        else {
            continue;
        };
        out.push(RankedCompany {
            company_id: id.to_string().trim_matches('"').to_string(),
            industry: industry.to_string().trim_matches('"').to_string(),
            country: country.to_string().trim_matches('"').to_string(),
            value,
        });
    }
    Ok(out)
}

/// Pairwise Pearson correlation matrix over the given numeric columns.
pub fn correlation_matrix(
    df: &DataFrame,
    cols: &[&str],
) -> Result<CorrelationMatrix, PolarsError> {
    let series: Vec<Vec<Option<f64>>> = cols
        .iter()
        .map(|c| numeric_column(df, c))
        .collect::<Result<_, _>>()?;

    let k = cols.len();
    let mut cells = vec![vec![None; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = pairwise_pearson(&series[i], &series[j], i == j);
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: cols.iter().map(|c| c.to_string()).collect(),
        cells,
    })
}

/// Scatter input: (x, y) points of two numeric columns grouped by a
/// categorical column, categories sorted ascending.
pub fn points_by_category(
    df: &DataFrame,
    category_col: &str,
    x_col: &str,
    y_col: &str,
) -> Result<Vec<(String, Vec<[f64; 2]>)>, PolarsError> {
    let categories = df.column(category_col)?;
    let xs_cast = df.column(x_col)?.cast(&DataType::Float64)?;
    let xs = xs_cast.f64()?;
    let ys_cast = df.column(y_col)?.cast(&DataType::Float64)?;
    let ys = ys_cast.f64()?;

    let mut groups: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for i in 0..df.height() {
        let (Ok(cat), Some(x), Some(y)) = (categories.get(i), xs.get(i), ys.get(i)) else {
            continue;
        };
        if cat.is_null() || !x.is_finite() || !y.is_finite() {
            continue;
        }
        groups
            .entry(cat.to_string().trim_matches('"').to_string())
            .or_default()
            .push([x, y]);
    }
    Ok(groups.into_iter().collect())
}

/// Box plot input: values of a numeric column grouped by a categorical
/// column, categories sorted ascending.
pub fn values_by_category(
    df: &DataFrame,
    category_col: &str,
    value_col: &str,
) -> Result<Vec<(String, Vec<f64>)>, PolarsError> {
    let categories = df.column(category_col)?;
    let values_cast = df.column(value_col)?.cast(&DataType::Float64)?;
    let values = values_cast.f64()?;

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for i in 0..df.height() {
        let (Ok(cat), Some(value)) = (categories.get(i), values.get(i)) else {
            continue;
        };
        if cat.is_null() || !value.is_finite() {
            continue;
        }
        groups
            .entry(cat.to_string().trim_matches('"').to_string())
            .or_default()
            .push(value);
    }
    Ok(groups.into_iter().collect())
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, PolarsError> {
    let cast = df.column(name)?.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Pearson correlation over the rows where both columns have a finite value.
fn pairwise_pearson(a: &[Option<f64>], b: &[Option<f64>], diagonal: bool) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .unzip();

    if xs.len() < 2 {
        return None;
    }
    let std_x = xs.as_slice().std_dev();
    let std_y = ys.as_slice().std_dev();
    if !(std_x > 0.0) || !(std_y > 0.0) {
        return None;
    }
    if diagonal {
        return Some(1.0);
    }
    let cov = xs.as_slice().covariance(ys.as_slice());
    Some((cov / (std_x * std_y)).clamp(-1.0, 1.0))
}
