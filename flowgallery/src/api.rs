use crate::{GalleryOptions, MoveError};

/// The control surface a gallery exposes to page code.
///
/// Hosts keep the full [`crate::Gallery`] to route events; everything else should only see
/// this trait.
pub trait GalleryApi {
    /// Moves one item forward. `animate` defaults to `options().animate`.
    fn next(&mut self, animate: Option<bool>) -> Result<(), MoveError>;

    /// Moves one item back. `animate` defaults to `options().animate`.
    fn prev(&mut self, animate: Option<bool>) -> Result<(), MoveError>;

    /// Makes item `index` active. `animate` defaults to `options().animate`.
    fn jump(&mut self, index: usize, animate: Option<bool>) -> Result<(), MoveError>;

    fn is_enabled(&self) -> bool;

    /// Re-enables moves and resize handling, replaying a resize that arrived while disabled.
    fn enable(&mut self);

    /// Suppresses moves and resize handling. Animations already in flight keep running.
    fn disable(&mut self);

    fn options(&self) -> &GalleryOptions;

    fn active_index(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
