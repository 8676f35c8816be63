use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("open serial port {0}")]
    Open(String),
    #[error("serial read timeout")]
    ReadTimeout,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
