//! Statistics module - aggregation over the filtered dataset

mod calculator;

pub use calculator::{
    column_mean, correlation_matrix, grouped_mean, points_by_category, record_count,
    top_companies, values_by_category, CorrelationMatrix, GroupMean, RankedCompany, TOP_N,
};
