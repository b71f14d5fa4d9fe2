#[cfg(feature = "tracing")]
macro_rules! ftrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "flowgallery", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ftrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! fdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "flowgallery", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! fdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! fwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "flowgallery", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! fwarn {
    ($($tt:tt)*) => {};
}
