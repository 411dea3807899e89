use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("failed to read catalog `{}`: {source}", path.display())]
  CatalogRead { path: PathBuf, source: csv::Error },
  #[error("failed to write catalog `{}`: {source}", path.display())]
  CatalogWrite { path: PathBuf, source: csv::Error },
  #[error("failed to build http client: {source}")]
  HttpClient {
    #[from]
    source: reqwest::Error,
  },
  #[error("input catalog `{}` does not exist", path.display())]
  InputNotFound { path: PathBuf },
  #[error("title threshold must be between 0.0 and 1.0, got {0}")]
  InvalidThreshold(f64),
  #[error("no column containing urls found in `{}`", path.display())]
  MissingUrlColumn { path: PathBuf },
  #[error("failed to write report `{}`: {source}", path.display())]
  ReportWrite {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("failed to serialize report: {source}")]
  ReportSerialize {
    #[from]
    source: serde_json::Error,
  },
}
