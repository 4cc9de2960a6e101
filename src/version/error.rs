use reqwest::StatusCode;
use thiserror::Error;

/// Coarse class of an HTTP status, for branching without string matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatusClass {
    Success,
    Redirection,
    ClientError,
    ServerError,
    Other,
}

impl From<StatusCode> for HttpStatusClass {
    fn from(status: StatusCode) -> Self {
        if status.is_success() {
            HttpStatusClass::Success
        } else if status.is_redirection() {
            HttpStatusClass::Redirection
        } else if status.is_client_error() {
            HttpStatusClass::ClientError
        } else if status.is_server_error() {
            HttpStatusClass::ServerError
        } else {
            HttpStatusClass::Other
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The registry answered 404/410, or its listing has no entry for the package
    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RegistryError {
    /// HTTP status class behind this error, when the registry answered at all
    pub fn status_class(&self) -> Option<HttpStatusClass> {
        match self {
            RegistryError::Status { status, .. } => Some((*status).into()),
            RegistryError::NotFound(_) => Some(HttpStatusClass::ClientError),
            RegistryError::Network(e) => e.status().map(HttpStatusClass::from),
            RegistryError::InvalidResponse(_) => None,
        }
    }
}

/// Why some versions of a package could not be confirmed
#[derive(Debug, Error)]
pub enum VersionsError {
    /// The registry answered, and some versions are not among its releases
    #[error(
        "missing versions {missing:?} of {package:?} in {ecosystem:?} (unparsable registry versions: {invalid:?}; known versions: {known:?})"
    )]
    Missing {
        package: String,
        ecosystem: String,
        /// Versions from the record that are absent or unparsable
        missing: Vec<String>,
        /// Registry versions the comparator could not parse
        invalid: Vec<String>,
        known: Vec<String>,
    },

    /// The registry could not be asked
    #[error("unable to verify versions of {package:?} in {ecosystem:?}: {source}")]
    Unreachable {
        package: String,
        ecosystem: String,
        #[source]
        source: RegistryError,
    },
}
