use thiserror::Error;

#[derive(Error, Debug)]
pub enum VanityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dictionary error ({source_name}): {reason}")]
    Dictionary { source_name: String, reason: String },

    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("PKCS#1 encoding error: {0}")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    #[error("Random source error: {0}")]
    Rng(#[from] rand::Error),

    #[error("Invalid stored key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, VanityError>;
