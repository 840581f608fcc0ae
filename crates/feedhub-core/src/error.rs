use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid color {0:?}, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
