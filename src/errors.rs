use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("invalid request: {0}")] Validation(String),
    #[error("config error: {0}")] Config(String),
}
