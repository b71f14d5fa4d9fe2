use alloc::string::String;
use alloc::sync::Arc;

use crate::{Easing, Size, Timing};

/// Fallback used when a load notification carries no intrinsic size.
///
/// Receives the image source and should return its pixel size, e.g. by issuing a throwaway
/// request for the same resource. Returning `None` leaves the item at its loading size.
pub type ImageProbe = Arc<dyn Fn(&str) -> Option<Size> + Send + Sync>;

/// Horizontal gap between neighbouring items, in pixels.
pub const ITEM_GAP: f32 = 10.0;

/// A pixel length or `auto`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "DimensionRepr", into = "DimensionRepr")
)]
pub enum Dimension {
    #[default]
    Auto,
    Px(u32),
}

impl Dimension {
    pub fn px(self) -> Option<u32> {
        match self {
            Self::Auto => None,
            Self::Px(v) => Some(v),
        }
    }
}

// `"auto"` or a bare number, as written in per-element metadata.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Px(u32),
    Keyword(AutoKeyword),
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
enum AutoKeyword {
    #[serde(rename = "auto")]
    Auto,
}

#[cfg(feature = "serde")]
impl From<DimensionRepr> for Dimension {
    fn from(repr: DimensionRepr) -> Self {
        match repr {
            DimensionRepr::Px(v) => Self::Px(v),
            DimensionRepr::Keyword(AutoKeyword::Auto) => Self::Auto,
        }
    }
}

#[cfg(feature = "serde")]
impl From<Dimension> for DimensionRepr {
    fn from(d: Dimension) -> Self {
        match d {
            Dimension::Px(v) => Self::Px(v),
            Dimension::Auto => Self::Keyword(AutoKeyword::Auto),
        }
    }
}

/// Width of the element containing the gallery.
#[derive(Clone)]
pub enum ContainerWidth {
    /// A fixed width.
    Value(u32),
    /// A query evaluated on demand: at init, on every move, after each settle and on resize.
    Provider(Arc<dyn Fn() -> u32 + Send + Sync>),
}

impl ContainerWidth {
    pub fn provider(f: impl Fn() -> u32 + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(f))
    }

    pub(crate) fn resolve(&self) -> u32 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl core::fmt::Debug for ContainerWidth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::Gallery`].
///
/// The gallery takes a snapshot at construction; it never changes afterwards.
pub struct GalleryOptions {
    /// Index of the item that is initially active.
    pub active_index: usize,
    /// Default for directional moves that do not say whether to animate.
    pub animate: bool,
    /// Reserved. Wraparound is not implemented; the flag has no effect.
    pub circular: bool,
    pub duration_ms: u64,
    pub easing: Easing,
    /// Enables arrow key navigation.
    pub enable_key_navigation: bool,
    /// Overrides the natural image width once loaded.
    pub force_width: Option<u32>,
    /// Overrides the natural image height once loaded.
    pub force_height: Option<u32>,
    /// Clicking the active item advances to the next one.
    pub forward_on_active_click: bool,
    /// Border around the active image.
    pub image_padding: u32,
    /// Presentation marker for slots whose image is still loading.
    pub loading_class: String,
    /// Placeholder height used until the image reports its size.
    pub loading_height: u32,
    /// Placeholder width used until the image reports its size.
    pub loading_width: u32,
    pub thumb_height: Dimension,
    /// Border around thumbnails.
    pub thumb_padding: u32,
    /// Vertical center of the thumbnail row; `Auto` centers on the active image.
    pub thumb_top_offset: Dimension,
    pub thumb_width: Dimension,
    pub image_probe: Option<ImageProbe>,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            active_index: 0,
            animate: true,
            circular: false,
            duration_ms: 900,
            easing: Easing::Linear,
            enable_key_navigation: true,
            force_width: None,
            force_height: None,
            forward_on_active_click: true,
            image_padding: 0,
            loading_class: String::from("loading"),
            loading_height: 60,
            loading_width: 100,
            thumb_height: Dimension::Auto,
            thumb_padding: 0,
            thumb_top_offset: Dimension::Auto,
            thumb_width: Dimension::Auto,
            image_probe: None,
        }
    }
}

impl Clone for GalleryOptions {
    fn clone(&self) -> Self {
        Self {
            active_index: self.active_index,
            animate: self.animate,
            circular: self.circular,
            duration_ms: self.duration_ms,
            easing: self.easing,
            enable_key_navigation: self.enable_key_navigation,
            force_width: self.force_width,
            force_height: self.force_height,
            forward_on_active_click: self.forward_on_active_click,
            image_padding: self.image_padding,
            loading_class: self.loading_class.clone(),
            loading_height: self.loading_height,
            loading_width: self.loading_width,
            thumb_height: self.thumb_height,
            thumb_padding: self.thumb_padding,
            thumb_top_offset: self.thumb_top_offset,
            thumb_width: self.thumb_width,
            image_probe: self.image_probe.clone(),
        }
    }
}

impl GalleryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers `patch` on top of these options. Fields left `None` in the patch keep their
    /// current value.
    ///
    /// Call once per layer, lowest precedence first: caller config, then per-element metadata.
    pub fn merge(mut self, patch: OptionsPatch) -> Self {
        let OptionsPatch {
            active_index,
            animate,
            circular,
            duration_ms,
            easing,
            enable_key_navigation,
            force_width,
            force_height,
            forward_on_active_click,
            image_padding,
            loading_class,
            loading_height,
            loading_width,
            thumb_height,
            thumb_padding,
            thumb_top_offset,
            thumb_width,
        } = patch;

        self.active_index = active_index.unwrap_or(self.active_index);
        self.animate = animate.unwrap_or(self.animate);
        self.circular = circular.unwrap_or(self.circular);
        self.duration_ms = duration_ms.unwrap_or(self.duration_ms);
        self.easing = easing.unwrap_or(self.easing);
        self.enable_key_navigation = enable_key_navigation.unwrap_or(self.enable_key_navigation);
        self.force_width = force_width.or(self.force_width);
        self.force_height = force_height.or(self.force_height);
        self.forward_on_active_click =
            forward_on_active_click.unwrap_or(self.forward_on_active_click);
        self.image_padding = image_padding.unwrap_or(self.image_padding);
        if let Some(class) = loading_class {
            self.loading_class = class;
        }
        self.loading_height = loading_height.unwrap_or(self.loading_height);
        self.loading_width = loading_width.unwrap_or(self.loading_width);
        self.thumb_height = thumb_height.unwrap_or(self.thumb_height);
        self.thumb_padding = thumb_padding.unwrap_or(self.thumb_padding);
        self.thumb_top_offset = thumb_top_offset.unwrap_or(self.thumb_top_offset);
        self.thumb_width = thumb_width.unwrap_or(self.thumb_width);
        self
    }

    pub fn timing(&self) -> Timing {
        Timing {
            duration_ms: self.duration_ms,
            easing: self.easing,
        }
    }

    /// Full size used for a slot until its image reports a size.
    pub fn loading_size(&self) -> Size {
        Size::new(self.loading_width, self.loading_height)
    }

    pub fn with_active_index(mut self, active_index: usize) -> Self {
        self.active_index = active_index;
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_key_navigation(mut self, enabled: bool) -> Self {
        self.enable_key_navigation = enabled;
        self
    }

    pub fn with_forced_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.force_width = width;
        self.force_height = height;
        self
    }

    pub fn with_forward_on_active_click(mut self, forward: bool) -> Self {
        self.forward_on_active_click = forward;
        self
    }

    pub fn with_padding(mut self, image_padding: u32, thumb_padding: u32) -> Self {
        self.image_padding = image_padding;
        self.thumb_padding = thumb_padding;
        self
    }

    pub fn with_loading_class(mut self, loading_class: impl Into<String>) -> Self {
        self.loading_class = loading_class.into();
        self
    }

    pub fn with_loading_size(mut self, width: u32, height: u32) -> Self {
        self.loading_width = width;
        self.loading_height = height;
        self
    }

    pub fn with_thumb_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.thumb_width = width;
        self.thumb_height = height;
        self
    }

    pub fn with_thumb_top_offset(mut self, offset: Dimension) -> Self {
        self.thumb_top_offset = offset;
        self
    }

    pub fn with_image_probe(
        mut self,
        probe: Option<impl Fn(&str) -> Option<Size> + Send + Sync + 'static>,
    ) -> Self {
        self.image_probe = probe.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for GalleryOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GalleryOptions")
            .field("active_index", &self.active_index)
            .field("animate", &self.animate)
            .field("circular", &self.circular)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("enable_key_navigation", &self.enable_key_navigation)
            .field("force_width", &self.force_width)
            .field("force_height", &self.force_height)
            .field("forward_on_active_click", &self.forward_on_active_click)
            .field("image_padding", &self.image_padding)
            .field("loading_class", &self.loading_class)
            .field("loading_height", &self.loading_height)
            .field("loading_width", &self.loading_width)
            .field("thumb_height", &self.thumb_height)
            .field("thumb_padding", &self.thumb_padding)
            .field("thumb_top_offset", &self.thumb_top_offset)
            .field("thumb_width", &self.thumb_width)
            .finish_non_exhaustive()
    }
}

/// One configuration layer. Every field is optional; see [`GalleryOptions::merge`].
///
/// With `feature = "serde"`, this deserializes from camelCase keys, e.g.
/// `{"activeIndex": 3, "thumbWidth": "auto"}`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct OptionsPatch {
    pub active_index: Option<usize>,
    pub animate: Option<bool>,
    pub circular: Option<bool>,
    #[cfg_attr(feature = "serde", serde(rename = "duration"))]
    pub duration_ms: Option<u64>,
    pub easing: Option<Easing>,
    pub enable_key_navigation: Option<bool>,
    pub force_width: Option<u32>,
    pub force_height: Option<u32>,
    pub forward_on_active_click: Option<bool>,
    pub image_padding: Option<u32>,
    pub loading_class: Option<String>,
    pub loading_height: Option<u32>,
    pub loading_width: Option<u32>,
    pub thumb_height: Option<Dimension>,
    pub thumb_padding: Option<u32>,
    pub thumb_top_offset: Option<Dimension>,
    pub thumb_width: Option<Dimension>,
}
