/// Errors produced while parsing configuration strings.
///
/// None of these ever reach the page: hosts log them and fall back to
/// defaults.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FxError {
    #[error("invalid root margin `{0}`")]
    InvalidMargin(String),
    #[error("invalid timeline offset `{0}`")]
    InvalidOffset(String),
    #[error("unknown easing `{0}`")]
    UnknownEasing(String),
}
