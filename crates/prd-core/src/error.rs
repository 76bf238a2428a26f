use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrdError {
    #[error("no API token configured: run 'prdgen token set <TOKEN>' or set PRDGEN_TOKEN")]
    MissingToken,

    #[error("home directory not found: set HOME or PRDGEN_HOME")]
    HomeNotFound,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrdError>;
