use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid rating threshold \"{0}\": must be an integer from 1 to 4")]
    InvalidRating(String),
}
