//! LambdaError is the catch-all failure the deployable binaries report.
//! Module-specific errors (queue, result store, key generation) are mapped
//! into it at the HTTP boundary.

#[derive(Debug, thiserror::Error)]
pub enum LambdaError {
    #[error("{0:#}")]
    Unknown(#[source] anyhow::Error),
}
