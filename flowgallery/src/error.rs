/// Why a directional move was rejected. A rejected move never changes gallery state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("gallery is disabled")]
    Disabled,
    #[error("target index {target} is outside 0..{len}")]
    OutOfRange { target: isize, len: usize },
    #[error("target is already the active item")]
    NoChange,
}
