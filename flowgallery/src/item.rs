use alloc::string::String;

use crate::{Dimension, GalleryOptions, Size};

/// Describes one image slot handed to [`crate::Gallery::new`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSource {
    pub src: String,
    /// Caption text, typically the image's `title`.
    pub caption: Option<String>,
    /// Set when the resource had already finished loading before the gallery was created.
    ///
    /// The inner value is the intrinsic size if the environment can report it.
    pub preloaded: Option<Option<Size>>,
}

impl ImageSource {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            caption: None,
            preloaded: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn preloaded(mut self, natural: Option<Size>) -> Self {
        self.preloaded = Some(natural);
        self
    }
}

/// A notification from the image resource.
///
/// Environments differ in which of `Load` / `ReadyStateChange` they deliver, so both are
/// accepted. `natural` is `None` when the environment cannot report an intrinsic size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadSignal {
    Load { natural: Option<Size> },
    ReadyStateChange { complete: bool, natural: Option<Size> },
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    /// Terminal. The slot stops showing its loading marker but never counts as loaded.
    Failed,
}

/// What the pipeline made of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    Completed(Option<Size>),
    Failed,
    Ignored,
}

/// Tracks one image resource and reports completion at most once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LoadPipeline {
    state: LoadState,
}

impl LoadPipeline {
    pub(crate) fn state(&self) -> LoadState {
        self.state
    }

    pub(crate) fn accept(&mut self, signal: LoadSignal) -> LoadOutcome {
        if self.state != LoadState::Loading {
            return LoadOutcome::Ignored;
        }
        match signal {
            LoadSignal::Load { natural }
            | LoadSignal::ReadyStateChange {
                complete: true,
                natural,
            } => {
                self.state = LoadState::Loaded;
                LoadOutcome::Completed(natural)
            }
            LoadSignal::ReadyStateChange {
                complete: false, ..
            } => LoadOutcome::Ignored,
            LoadSignal::Error => {
                self.state = LoadState::Failed;
                LoadOutcome::Failed
            }
        }
    }
}

/// Thumbnail size for an image of full size `size`.
///
/// - both `auto`: `loading_width` wide, height keeps the aspect ratio
/// - height `auto`: configured width, height keeps the aspect ratio
/// - width `auto`: configured height, width keeps the aspect ratio
/// - neither: both taken verbatim
pub fn derive_thumb_size(size: Size, options: &GalleryOptions) -> Size {
    match (options.thumb_width, options.thumb_height) {
        (Dimension::Auto, Dimension::Auto) => {
            let width = options.loading_width;
            Size::new(width, scale(size.height, width, size.width))
        }
        (Dimension::Px(width), Dimension::Auto) => {
            Size::new(width, scale(size.height, width, size.width))
        }
        (Dimension::Auto, Dimension::Px(height)) => {
            Size::new(scale(size.width, height, size.height), height)
        }
        (Dimension::Px(width), Dimension::Px(height)) => Size::new(width, height),
    }
}

// round(value * num / den), halves rounding up.
fn scale(value: u32, num: u32, den: u32) -> u32 {
    if den == 0 {
        return 0;
    }
    let den = den as u64;
    let scaled = (2 * value as u64 * num as u64 + den) / (2 * den);
    scaled.min(u32::MAX as u64) as u32
}

/// One image slot. Created at gallery construction and kept for the gallery's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    index: usize,
    src: String,
    caption: Option<String>,
    pipeline: LoadPipeline,
    natural: Option<Size>,
    size: Size,
    thumb: Size,
    is_active: bool,
    is_leaving_active: bool,
}

impl Item {
    pub(crate) fn new(index: usize, source: ImageSource, options: &GalleryOptions) -> Self {
        let loading = options.loading_size();
        Self {
            index,
            src: source.src,
            caption: source.caption,
            pipeline: LoadPipeline::default(),
            natural: None,
            size: loading,
            thumb: loading,
            is_active: false,
            is_leaving_active: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn caption_text(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Full size once loaded (after `force_width`/`force_height`), `None` before.
    pub fn natural_size(&self) -> Option<Size> {
        self.natural
    }

    /// Full size used for layout: the natural size once loaded, the loading size before.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn thumb_size(&self) -> Size {
        self.thumb
    }

    pub fn load_state(&self) -> LoadState {
        self.pipeline.state()
    }

    pub fn is_loaded(&self) -> bool {
        self.pipeline.state() == LoadState::Loaded
    }

    /// Whether the slot should carry the loading presentation marker.
    pub fn is_loading(&self) -> bool {
        self.pipeline.state() == LoadState::Loading
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// `true` while this item animates from the active slot into thumbnail form.
    pub fn is_leaving_active(&self) -> bool {
        self.is_leaving_active
    }

    pub(crate) fn accept(&mut self, signal: LoadSignal) -> LoadOutcome {
        self.pipeline.accept(signal)
    }

    /// Records final dimensions. `natural` is the best known intrinsic size; when it is
    /// missing the loading size stays in place.
    pub(crate) fn finish_load(&mut self, natural: Option<Size>, options: &GalleryOptions) {
        let reported = natural.unwrap_or(self.size);
        let size = Size::new(
            options.force_width.unwrap_or(reported.width),
            options.force_height.unwrap_or(reported.height),
        );
        self.natural = Some(size);
        self.size = size;
        self.thumb = if size.is_degenerate() {
            options.loading_size()
        } else {
            derive_thumb_size(size, options)
        };
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
        if active {
            self.is_leaving_active = false;
        }
    }

    pub(crate) fn set_leaving_active(&mut self, leaving: bool) {
        self.is_leaving_active = leaving;
    }
}
