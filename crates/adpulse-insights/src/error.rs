use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open data file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column missing: {0}")]
    MissingColumn(String),

    #[error("unparseable date \"{value}\" in data row {row}")]
    InvalidDate { row: usize, value: String },
}
