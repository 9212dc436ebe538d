use thiserror::Error;

/// Failures of the response contract: the model's text did not honor the
/// JSON shape the prompt asked for.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("no JSON object found in model response")]
    NoJsonFound { text: String },

    #[error("model response is not valid JSON: {message}")]
    MalformedJson { message: String, fragment: String },

    #[error("model response is missing required field `{0}`")]
    MissingField(String),

    #[error("model response does not match the {schema} schema: {message}")]
    SchemaMismatch {
        schema: &'static str,
        message: String,
    },

    #[error("field `{field}` is {value}, expected {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Failures reported by a model gateway, already classified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("API key rejected: {0}")]
    Auth(String),

    #[error("quota exceeded: {0}")]
    Quota(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("model gateway error: {0}")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("no API key configured")]
    ConfigurationRequired,

    #[error("{0} already in progress")]
    Busy(&'static str),

    #[error("no idea to evaluate")]
    NoIdea,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl From<rusqlite::Error> for CoreError {
    fn from(e: rusqlite::Error) -> Self {
        CoreError::Database(e.to_string())
    }
}

/// User-facing classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigurationRequired,
    AuthError,
    QuotaExceeded,
    NetworkError,
    NoJsonFound,
    MalformedJson,
    MissingField,
    InvalidResponse,
    Busy,
    NoIdea,
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigurationRequired => write!(f, "configuration_required"),
            Self::AuthError => write!(f, "auth_error"),
            Self::QuotaExceeded => write!(f, "quota_exceeded"),
            Self::NetworkError => write!(f, "network_error"),
            Self::NoJsonFound => write!(f, "no_json_found"),
            Self::MalformedJson => write!(f, "malformed_json"),
            Self::MissingField => write!(f, "missing_field"),
            Self::InvalidResponse => write!(f, "invalid_response"),
            Self::Busy => write!(f, "busy"),
            Self::NoIdea => write!(f, "no_idea"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl ErrorKind {
    /// Short message suitable for the session's error slot.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConfigurationRequired => "Set a Gemini API key to get started.",
            Self::AuthError => "The API key was rejected. Check it and set it again.",
            Self::QuotaExceeded => "API quota exceeded. Try again later.",
            Self::NetworkError => "Could not reach the model. Check your connection and retry.",
            Self::NoJsonFound => "The model did not return JSON. Please retry.",
            Self::MalformedJson => "The model returned malformed JSON. Please retry.",
            Self::MissingField => "The model response was incomplete. Please retry.",
            Self::InvalidResponse => "The model response had invalid values. Please retry.",
            Self::Busy => "A request is already in progress.",
            Self::NoIdea => "Generate an idea before evaluating.",
            Self::Unknown => "Something went wrong. Please retry.",
        }
    }

    /// Whether retrying the same action may succeed without user changes.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::ConfigurationRequired | Self::AuthError | Self::NoIdea
        )
    }
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ConfigurationRequired => ErrorKind::ConfigurationRequired,
            CoreError::Busy(_) => ErrorKind::Busy,
            CoreError::NoIdea => ErrorKind::NoIdea,
            CoreError::Gateway(GatewayError::Auth(_)) => ErrorKind::AuthError,
            CoreError::Gateway(GatewayError::Quota(_)) => ErrorKind::QuotaExceeded,
            CoreError::Gateway(GatewayError::Network(_)) => ErrorKind::NetworkError,
            CoreError::Gateway(GatewayError::Unknown(_)) => ErrorKind::Unknown,
            CoreError::Contract(ContractError::NoJsonFound { .. }) => ErrorKind::NoJsonFound,
            CoreError::Contract(ContractError::MalformedJson { .. }) => ErrorKind::MalformedJson,
            CoreError::Contract(ContractError::MissingField(_)) => ErrorKind::MissingField,
            CoreError::Contract(ContractError::SchemaMismatch { .. })
            | CoreError::Contract(ContractError::OutOfRange { .. }) => ErrorKind::InvalidResponse,
            CoreError::Io(_) | CoreError::Database(_) | CoreError::Config(_) => ErrorKind::Unknown,
        }
    }

    /// Longer diagnostic text: the error itself plus whatever context the
    /// variant carries (the offending model text, for contract failures).
    pub fn diagnostic(&self) -> String {
        match self {
            CoreError::Contract(ContractError::NoJsonFound { text }) => {
                format!("{self}\nresponse text: {}", truncate_for_error(text, 1500))
            }
            CoreError::Contract(ContractError::MalformedJson { fragment, .. }) => {
                format!("{self}\noffending JSON: {}", truncate_for_error(fragment, 1500))
            }
            _ => self.to_string(),
        }
    }
}

/// Truncate at a char boundary no later than `max` bytes.
pub fn truncate_for_error(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut i = max;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        &s[..i]
    }
}
