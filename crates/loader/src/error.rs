use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read the source file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("The HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("The box store answered with status {0}")]
    Status(u16),

    #[error("Failed to deserialize the response body: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid source configuration: {0}")]
    Configuration(String),
}
