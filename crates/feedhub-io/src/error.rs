use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("preferences file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed preferences: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("no config directory for this user")]
    NoConfigDir,
}
