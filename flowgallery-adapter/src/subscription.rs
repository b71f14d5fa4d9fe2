/// A process-wide event source a mounted gallery listens to.
///
/// Per-item events (clicks, image loads) belong to the gallery's own elements and need no
/// subscription; see [`crate::Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Window or container resizes.
    Resize,
    /// Document-level key presses.
    KeyDown,
}

/// Token returned by [`EventHost::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscriptionId(pub u64);

/// The environment that owns global listeners (a window, an event loop, a test harness).
///
/// [`crate::Controller::mount`] subscribes and [`crate::Controller::unmount`] releases every
/// subscription it took, so instances never accumulate listeners.
pub trait EventHost {
    fn subscribe(&mut self, channel: Channel) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);
}
