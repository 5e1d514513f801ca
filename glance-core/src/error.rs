use thiserror::Error;

/// Failure to resolve the host's position.
///
/// Non-fatal: a manual city search stays available after any of these.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The lookup service answered but declined to locate this host.
    #[error("location lookup refused: {0}")]
    Refused(String),

    /// The lookup service could not be reached or answered with an error.
    #[error("location service unavailable: {0}")]
    Unavailable(String),
}

impl LocationError {
    /// Message shown to the user; always points them at manual entry.
    pub fn user_message(&self) -> &'static str {
        "Could not determine your location. Please enter a city manually."
    }
}

/// Failure during a weather fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to the weather API failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body did not match the expected response schema.
    #[error("malformed response from the weather API: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Message shown to the user. Transport and status failures collapse
    /// into one generic message; a malformed body gets its own.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::MalformedResponse(_) => {
                "Received a malformed response from the weather service"
            }
            FetchError::Network(_) | FetchError::Status { .. } => "Failed to fetch weather data",
        }
    }
}
