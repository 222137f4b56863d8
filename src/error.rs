use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// The document has no `[Events]` format line, so nothing in it can be
    /// trusted to be dialogue.
    #[error("invalid ASS document: missing events format")]
    MissingEventFormat,
}
