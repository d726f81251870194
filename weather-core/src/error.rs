use reqwest::StatusCode;

/// Prompt shown when the user submits an empty search.
pub const EMPTY_INPUT_MESSAGE: &str = "Yo, type in a city!";

const GENERIC_MESSAGE: &str = "An error occurred while fetching the weather data.";

/// Every way a lookup can end without a report.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("empty city name")]
    EmptyInput,
    #[error("location not found")]
    InvalidLocation,
    #[error("API key rejected")]
    InvalidCredential,
    #[error("request failed with status {0}")]
    Http(StatusCode),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl LookupError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => LookupError::InvalidLocation,
            StatusCode::UNAUTHORIZED => LookupError::InvalidCredential,
            other => LookupError::Http(other),
        }
    }

    /// Text shown in the widget's error paragraph.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
            LookupError::InvalidLocation => {
                "Whoops, make sure you have entered a valid location.".to_string()
            }
            LookupError::InvalidCredential => {
                "There was an issue fetching the weather data. Please check your API key and try again."
                    .to_string()
            }
            LookupError::Http(status) => format!(
                "An error occurred while fetching the weather data (status {}).",
                status.as_u16()
            ),
            LookupError::Transport(_) | LookupError::Decode(_) => GENERIC_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport(err.to_string())
    }
}
