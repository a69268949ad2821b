use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("There is no URL template with identifier '{0}'")]
    TemplateNotFound(String),

    #[error("Invalid pattern part: '{0}'")]
    InvalidPattern(String),

    #[error("No value supplied for URL parameter '{0}'")]
    MissingParameter(String),

    #[error("The URL '{0}' is not a valid Weather Underground URL")]
    InvalidUrl(String),

    #[error("URL '{url}' did not match the pattern of '{template}'")]
    NoMatch { template: String, url: String },
}
