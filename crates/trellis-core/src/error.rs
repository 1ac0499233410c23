use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{component}: option \"{option}\" provided type \"{provided}\" but expected type \"{expected}\"")]
    InvalidConfig {
        component: &'static str,
        option: &'static str,
        provided: String,
        expected: &'static str,
    },

    #[error("Unparsable selector: {0:?}")]
    SelectorParse(String),

    #[error("Unparsable margin expression: {0:?}")]
    MarginParse(String),

    #[error("Scrollspy requires a link target root")]
    MissingTarget,

    #[error("No element matches {0:?}")]
    NoSuchElement(String),

    #[error("Tab trigger must sit inside a nav or list-group container")]
    OrphanTab,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
