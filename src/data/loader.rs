//! Remote Dataset Loader Module
//! Fetches the solvency CSV over HTTPS and parses it with Polars.
//! The result is memoized for the lifetime of the process.

use std::io::Cursor;

use log::{debug, info};
use polars::prelude::*;
use thiserror::Error;

use super::columns;

/// Raw CSV location of the cleaned solvency dataset.
pub const DATASET_URL: &str =
    "https://raw.githubusercontent.com/SamRamos12B/DashboardSolvencia/refs/heads/main/Datos_proyecto_limpio.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Dataset request returned HTTP {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Dataset contains no rows")]
    NoData,
}

/// Loads the dataset once and keeps it cached for the process lifetime.
/// A failed load caches nothing; there is no invalidation.
pub struct DatasetLoader {
    url: String,
    df: Option<DataFrame>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(DATASET_URL)
    }
}

impl DatasetLoader {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            df: None,
        }
    }

    /// Memoized accessor: fetch and parse on first call, return the cached
    /// DataFrame afterwards without touching the network again.
    pub fn load(&mut self) -> Result<&DataFrame, LoaderError> {
        if self.df.is_none() {
            self.df = Some(Self::fetch_dataframe(&self.url)?);
        }
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// One fetch + parse + validation pass, no caching involved.
    pub fn fetch_dataframe(url: &str) -> Result<DataFrame, LoaderError> {
        let body = Self::fetch_csv(url)?;
        let df = Self::parse_csv(&body)?;
        info!("loaded dataset: {} rows, {} columns", df.height(), df.width());
        Ok(df)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get the dataset URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set DataFrame directly (used when loading on a background thread).
    pub fn set_dataframe(&mut self, df: DataFrame) {
        self.df = Some(df);
    }

    fn fetch_csv(url: &str) -> Result<String, LoaderError> {
        debug!("requesting dataset from {url}");

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("solvency_dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = client.get(url).send()?;

        if !response.status().is_success() {
            return Err(LoaderError::HttpStatus(response.status()));
        }

        let body = response.text()?;
        if body.trim().is_empty() {
            return Err(LoaderError::NoData);
        }
        Ok(body)
    }

    fn parse_csv(body: &str) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(Cursor::new(body.as_bytes().to_vec()))
            .finish()?;

        for name in columns::REQUIRED {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }
        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_CSV: &str = "\
Company_ID,Industry,Country,Company_Size,Total_Revenue,Current_Assets,Current_Liabilities,Current_Ratio,Debt_to_Equity_Ratio,Interest_Coverage_Ratio
C1,Tech,USA,Large,1000,500,250,2.0,0.5,8.0
C2,Tech,Mexico,Small,200,100,100,1.0,1.2,3.0
C3,Retail,USA,Medium,400,150,300,0.5,2.0,1.5
";

    async fn mock_csv_server(response: ResponseTemplate, expected_requests: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.csv"))
            .respond_with(response)
            .expect(expected_requests)
            .mount(&server)
            .await;
        server
    }

    // reqwest's blocking client must not run inside the tokio test runtime,
    // so loader calls are driven from a plain OS thread.
    fn load_on_thread(url: String) -> (DatasetLoader, Result<usize, LoaderError>) {
        thread::spawn(move || {
            let mut loader = DatasetLoader::new(url);
            let result = loader.load().map(|df| df.height());
            (loader, result)
        })
        .join()
        .unwrap()
    }

    #[test]
    fn parse_csv_reads_all_rows() {
        let df = DatasetLoader::parse_csv(SAMPLE_CSV).unwrap();
        assert_eq!(df.height(), 3);
        assert!(df.column(columns::INTEREST_COVERAGE).is_ok());
    }

    #[test]
    fn parse_csv_rejects_missing_columns() {
        let result = DatasetLoader::parse_csv("Company_ID,Industry\nC1,Tech\n");
        assert!(matches!(result, Err(LoaderError::MissingColumn(_))));
    }

    #[test]
    fn parse_csv_rejects_header_only_payload() {
        let header = SAMPLE_CSV.lines().next().unwrap();
        let result = DatasetLoader::parse_csv(&format!("{header}\n"));
        assert!(matches!(result, Err(LoaderError::NoData)));
    }

    #[tokio::test]
    async fn load_surfaces_error_on_http_404_and_caches_nothing() {
        let server = mock_csv_server(ResponseTemplate::new(404), 1).await;
        let url = format!("{}/data.csv", server.uri());

        let (loader, result) = load_on_thread(url);

        assert!(matches!(result, Err(LoaderError::HttpStatus(status)) if status == 404));
        assert!(loader.dataframe().is_none());
    }

    #[tokio::test]
    async fn load_rejects_empty_body() {
        let server = mock_csv_server(ResponseTemplate::new(200).set_body_string(""), 1).await;
        let url = format!("{}/data.csv", server.uri());

        let (loader, result) = load_on_thread(url);

        assert!(matches!(result, Err(LoaderError::NoData)));
        assert!(loader.dataframe().is_none());
    }

    #[tokio::test]
    async fn load_is_memoized_after_first_success() {
        // expect(1) makes the mock server fail verification on a second fetch
        let server =
            mock_csv_server(ResponseTemplate::new(200).set_body_string(SAMPLE_CSV), 1).await;
        let url = format!("{}/data.csv", server.uri());

        let (first, second) = thread::spawn(move || {
            let mut loader = DatasetLoader::new(url);
            let first = loader.load().map(|df| df.height());
            let second = loader.load().map(|df| df.height());
            (first, second)
        })
        .join()
        .unwrap();

        assert_eq!(first.unwrap(), 3);
        assert_eq!(second.unwrap(), 3);
    }
}
