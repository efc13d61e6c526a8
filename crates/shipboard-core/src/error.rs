use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShipboardError {
    #[error("not initialized: run 'shipboard init'")]
    NotInitialized,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("release not found: {0}")]
    ReleaseNotFound(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("tenant not found: {0}")]
    TenantNotFound(String),

    #[error("member '{member}' is not on any team of release '{release}'")]
    MemberNotFound { release: String, member: String },

    #[error("feature '{feature}' not found in release '{release}'")]
    FeatureNotFound { release: String, feature: String },

    #[error("invalid status '{0}': expected cancelled, complete, deployed or clear")]
    InvalidStatus(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShipboardError>;
