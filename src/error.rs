use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidProfile(String),

    #[error("question {0:?} not in settings")]
    UnknownQuestion(String),
}
