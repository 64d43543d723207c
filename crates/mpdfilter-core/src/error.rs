use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("crumb index {index} out of range ({len} crumbs)")]
    CrumbOutOfRange { index: usize, len: usize },
}
