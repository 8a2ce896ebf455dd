use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Topology(#[from] kw_core::Error),
    #[error("unknown palette '{0}'")]
    UnknownPalette(String),
}
