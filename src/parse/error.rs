use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    Structure(String),
    DateParse(String),
    Pattern(String),
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::Pattern(e.to_string())
    }
}

impl From<chrono::ParseError> for Error {
    fn from(e: chrono::ParseError) -> Self {
        Self::DateParse(e.to_string())
    }
}

impl Error {
    pub fn structure_error(msg: &str) -> Self {
        Self::Structure(msg.to_string())
    }
    pub fn date_parse_error(msg: &str) -> Self {
        Self::DateParse(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structure(msg) => write!(f, "Unexpected page structure: {msg}"),
            Self::DateParse(msg) => write!(f, "Date Parse Error: {msg}"),
            Self::Pattern(msg) => write!(f, "Invalid dish pattern: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
