use alloc::string::String;

use crate::{GalleryOptions, Item};

/// Horizontal inset subtracted from the caption width.
const CAPTION_INSET: u32 = 20;

/// The single caption shown under the active image.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Caption {
    pub text: String,
    pub left: f32,
    /// Just below the active image and its padding.
    pub top: f32,
    pub width: u32,
}

/// Places the caption for `active`, or `None` if it has no text or has not loaded.
pub fn place_caption(active: &Item, center_x: f32, options: &GalleryOptions) -> Option<Caption> {
    if !active.is_loaded() {
        return None;
    }
    let text = active.caption_text().filter(|t| !t.is_empty())?;
    let size = active.size();
    let padding = options.image_padding;
    Some(Caption {
        text: String::from(text),
        left: center_x - padding as f32 - size.width as f32 * 0.5,
        top: size.height.saturating_add(padding.saturating_mul(2)) as f32,
        width: size.width.saturating_sub(CAPTION_INSET),
    })
}
