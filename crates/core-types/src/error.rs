use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A request field (`range`, `interval`, ...) held a value outside its vocabulary.
    #[error("Unsupported {0} '{1}'")]
    InvalidInput(String, String),
}
