use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExamplesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cannot list directory {path}: {source}")]
    Scan {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("MCP error: {0}")]
    Mcp(String),
}

pub type Result<T> = std::result::Result<T, ExamplesError>;
