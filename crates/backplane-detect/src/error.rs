/// Errors returned by the backplane detector.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    #[error("no backplane detected (mask has no contour with positive area)")]
    NoBackplaneDetected,
    #[error("insufficient anchors: found {found} usable corner candidates, need 4")]
    InsufficientAnchors { found: usize },
    #[error("degenerate homography: {reason}")]
    DegenerateHomography { reason: &'static str },
}
