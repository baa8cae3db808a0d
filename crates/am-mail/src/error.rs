use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("I/O error reading mail arrivals: {0}")]
    Io(#[from] std::io::Error),

    #[error("mail arrival parse error: {0}")]
    Parse(String),

    #[error("mail generator configuration error: {0}")]
    Config(String),
}

pub type MailResult<T> = Result<T, MailError>;
