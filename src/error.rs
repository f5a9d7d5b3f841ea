use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("request to {url} failed with status {status}")]
    Status { status: u16, url: String },
    #[error("response is missing `{path}`")]
    MissingKey { path: String },
    #[error("`{path}` is not {expected}")]
    UnexpectedShape { path: String, expected: &'static str },
    #[error("{product} response contained no entries")]
    EmptySequence { product: String },
    #[error("no API token configured; set IEX_TOKEN or pass a token explicitly")]
    MissingToken,
    #[error("this request needs a symbol but the client was created without one")]
    MissingSymbol,
    #[error("unknown product `{0}`")]
    UnknownProduct(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn missing_key<T: Into<String>>(path: T) -> Self {
        AppError::MissingKey { path: path.into() }
    }

    /// Network failures and non-success statuses from either transport.
    pub fn is_transport(&self) -> bool {
        match self {
            AppError::Http(_) | AppError::Status { .. } => true,
            AppError::Other(err) => err
                .chain()
                .any(|cause| cause.downcast_ref::<reqwest::Error>().is_some()),
            _ => false,
        }
    }

    /// The provider answered, but not with the structure the product expects.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            AppError::MissingKey { .. }
                | AppError::UnexpectedShape { .. }
                | AppError::EmptySequence { .. }
        )
    }
}
