use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("menu has no items")]
    EmptyMenu,
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("touch point is not a finite coordinate")]
    NonFiniteTouch,
    #[error("container bounds are empty")]
    EmptyBounds,
    #[error("touch point lies outside the container")]
    TouchOutsideBounds,
    #[error("geometry setting {0} is out of range")]
    InvalidGeometry(&'static str),
}

/// Failures that abort a gesture before anything is shown.
///
/// Degenerate geometry never shows up here; it degrades to "no selection".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanError {
    #[error("Invalid fan configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
}
