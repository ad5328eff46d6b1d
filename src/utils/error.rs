use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration parse error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Script error at line {line}: {message}")]
    ScriptError { line: usize, message: String },

    #[error("Submission failed: {message}")]
    SubmissionError { message: String },

    #[error("Component initialization failed: {component}: {message}")]
    InitError { component: String, message: String },
}

impl SiteError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::IoError(_) => "Could not read or write a file".to_string(),
            SiteError::ConfigValidationError { field, .. } => {
                format!("The site configuration could not be parsed ({})", field)
            }
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            SiteError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            SiteError::ScriptError { line, .. } => {
                format!("The event script has an error on line {}", line)
            }
            SiteError::SubmissionError { message } => message.clone(),
            SiteError::InitError { component, .. } => {
                format!("The {} component could not start", component)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SiteError::IoError(_) => "Check that the path exists and is readable",
            SiteError::ScriptError { .. } => {
                "Each script line must be an event object or {\"wait_ms\": n}"
            }
            SiteError::ConfigValidationError { .. } => "Make sure the file is valid TOML",
            SiteError::InvalidConfigValueError { .. } | SiteError::MissingConfigError { .. } => {
                "Fix the highlighted value in the site configuration"
            }
            SiteError::SubmissionError { .. } => "Try submitting the form again later",
            SiteError::InitError { .. } => "Check the page layout for the failing component",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
