use crate::error::LoadError;
use async_trait::async_trait;
use configuration::{SourceKind, SourceSettings};
use core_types::RawRow;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// The contract every record transport fulfils: one call, the whole row set or an error.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches every row the source currently holds.
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, LoadError>;

    /// Human-readable description for logs, e.g. the file path or URL.
    fn describe(&self) -> String;
}

/// A delimited-text export on the local filesystem.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for CsvSource {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, LoadError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_delimited(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parses delimited text with a header row into raw rows.
///
/// Every cell is kept as text. Blank lines are skipped, but a line of empty cells
/// (`,,,`) is a row and keeps its position. Rows shorter than the header simply lack the
/// trailing columns.
pub fn parse_delimited(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// The box store's query endpoint, filtered server-side by ticker and dataset.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    ticker: Option<String>,
    dataset: Option<String>,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ticker: None,
            dataset: None,
        })
    }

    pub fn with_ticker(mut self, ticker: Option<String>) -> Self {
        self.ticker = ticker.filter(|t| !t.is_empty());
        self
    }

    pub fn with_dataset(mut self, dataset: Option<String>) -> Self {
        self.dataset = dataset.filter(|d| !d.is_empty());
        self
    }

    /// Lists the tickers the store holds boxes for.
    pub async fn fetch_tickers(&self) -> Result<Vec<String>, LoadError> {
        let url = format!("{}/tickers/", self.base_url);
        let body = self.get_json(&url, &[]).await?;
        let tickers: Vec<Option<String>> = serde_json::from_value(body)?;
        Ok(tickers.into_iter().flatten().collect())
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, LoadError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, LoadError> {
        let url = format!("{}/get-data/", self.base_url);
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(ticker) = &self.ticker {
            query.push(("ticker", ticker.as_str()));
        }
        if let Some(dataset) = &self.dataset {
            query.push(("dataset", dataset.as_str()));
        }

        let body = self.get_json(&url, &query).await?;
        let rows: Vec<RawRow> = serde_json::from_value(body)?;
        Ok(rows)
    }

    fn describe(&self) -> String {
        match &self.ticker {
            Some(ticker) => format!("{}/get-data/?ticker={}", self.base_url, ticker),
            None => format!("{}/get-data/", self.base_url),
        }
    }
}

/// Builds the source described by the `[source]` settings.
pub fn source_from_settings(settings: &SourceSettings) -> Result<Arc<dyn RecordSource>, LoadError> {
    match settings.kind {
        SourceKind::Csv => {
            let path = settings.csv_path.clone().ok_or_else(|| {
                LoadError::Configuration("a CSV source needs a path".to_string())
            })?;
            Ok(Arc::new(CsvSource::new(path)))
        }
        SourceKind::Http => {
            let base_url = settings.base_url.clone().ok_or_else(|| {
                LoadError::Configuration("an HTTP source needs a base URL".to_string())
            })?;
            let source = HttpSource::new(base_url, Duration::from_secs(settings.timeout_secs))?
                .with_ticker(settings.ticker.clone())
                .with_dataset(settings.dataset.clone());
            Ok(Arc::new(source))
        }
    }
}
