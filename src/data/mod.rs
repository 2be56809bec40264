//! Data module - remote dataset loading and filtering

mod filter;
mod loader;

pub use filter::{apply_filters, filter_options, FilterSelection};
pub use loader::{DatasetLoader, LoaderError, DATASET_URL};

/// Column names of the solvency dataset.
pub mod columns {
    pub const COMPANY_ID: &str = "Company_ID";
    pub const INDUSTRY: &str = "Industry";
    pub const COUNTRY: &str = "Country";
    pub const COMPANY_SIZE: &str = "Company_Size";
    pub const TOTAL_REVENUE: &str = "Total_Revenue";
    pub const CURRENT_ASSETS: &str = "Current_Assets";
    pub const CURRENT_LIABILITIES: &str = "Current_Liabilities";
    pub const CURRENT_RATIO: &str = "Current_Ratio";
    pub const DEBT_TO_EQUITY: &str = "Debt_to_Equity_Ratio";
    pub const INTEREST_COVERAGE: &str = "Interest_Coverage_Ratio";

    /// Columns a well-formed dataset must carry.
    pub const REQUIRED: [&str; 10] = [
        COMPANY_ID,
        INDUSTRY,
        COUNTRY,
        COMPANY_SIZE,
        TOTAL_REVENUE,
        CURRENT_ASSETS,
        CURRENT_LIABILITIES,
        CURRENT_RATIO,
        DEBT_TO_EQUITY,
        INTEREST_COVERAGE,
    ];

    /// Ratio columns entering the correlation matrix.
    pub const RATIOS: [&str; 3] = [CURRENT_RATIO, DEBT_TO_EQUITY, INTEREST_COVERAGE];
}
