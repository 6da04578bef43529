use reqwest::StatusCode;

use crate::parse;
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Parse(parse::Error),
    Request(reqwest::Error),
    Status(StatusCode),
    Url(url::ParseError),
    UnsupportedOption(String),
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::Url(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{e}"),
            Error::Request(e) => write!(f, "Could not fetch the menu: {e}"),
            Error::Status(status) => {
                write!(f, "Could not fetch the menu, the server answered {status}")
            }
            Error::Url(e) => write!(f, "Invalid menu url: {e}"),
            Error::UnsupportedOption(msg) => write!(f, "Unsupported options: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
