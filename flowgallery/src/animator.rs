use crate::{Style, Target, Timing, TransitionHandle};

/// The rendering side of the gallery: moves list and item boxes around.
///
/// Implementations own whatever represents the boxes (DOM nodes, widgets, plain structs). The
/// gallery never reads geometry back; it only issues targets and waits for completions, which
/// the host reports through [`crate::Gallery::complete`].
///
/// Contract:
/// - `apply` sets the listed properties immediately. A motion in flight on the same target
///   keeps animating its other properties.
/// - `stop` freezes the target where it is. The stopped motion's handle never completes.
/// - `animate` interpolates from the current geometry to `style`. It replaces any motion in
///   flight on the same target, and its handle is reported exactly once when it finishes.
/// - No completion may be reported from inside any of these calls.
pub trait Animator {
    fn apply(&mut self, target: Target, style: &Style);

    fn stop(&mut self, target: Target);

    fn animate(&mut self, target: Target, style: &Style, timing: Timing) -> TransitionHandle;
}
