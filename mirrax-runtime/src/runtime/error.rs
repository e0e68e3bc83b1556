use std::{error, fmt};

#[derive(Debug)]
pub enum Error {
    /// IO error.
    Io(std::io::Error),
    /// Configuration parse error.
    Config(toml::de::Error),
    /// Duplicate component identifier in the seed dataset.
    DuplicateComponent(String),
    /// Malformed component in the seed dataset.
    InvalidComponent(String),
    /// Vision backend client error.
    Vision(reqwest::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::DuplicateComponent(id) => write!(f, "Duplicate component: {}", id),
            Error::InvalidComponent(id) => write!(f, "Invalid component: {}", id),
            Error::Vision(e) => write!(f, "Vision backend error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
