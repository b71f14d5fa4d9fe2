use alloc::vec::Vec;

use crate::{GalleryOptions, ITEM_GAP, Item, Style};

/// Box size of an item whose dimensions change in this layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
}

/// Target position of one item in the settled state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub index: usize,
    pub left: f32,
    pub top: f32,
    /// `Some` for the active item and for an item leaving the active slot. Other thumbnails
    /// keep their settled size and only move.
    pub frame: Option<Frame>,
}

impl Placement {
    pub fn style(&self) -> Style {
        let mut style = Style {
            left: Some(self.left),
            top: Some(self.top),
            ..Style::default()
        };
        if let Some(frame) = self.frame {
            style.width = Some(frame.width as f32);
            style.height = Some(frame.height as f32);
            style.padding = Some(frame.padding as f32);
        }
        style
    }
}

/// Output of [`compute_layout`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub center_x: f32,
    /// Vertical center of the thumbnail row.
    pub center_y: f32,
    /// Active image height plus padding on both sides.
    pub list_height: u32,
    /// One entry per item, in index order.
    pub placements: Vec<Placement>,
}

/// Computes target placements for every item.
///
/// The active item is centered at full size. Thumbnails before it are packed leftward from its
/// left edge and thumbnails after it rightward from its right edge, each separated by
/// [`ITEM_GAP`] plus twice the thumbnail padding.
///
/// Pure: the same inputs always give the same layout. Returns an empty layout when `items` is
/// empty or `active_index` is out of range.
pub fn compute_layout(
    active_index: usize,
    container_width: u32,
    items: &[Item],
    options: &GalleryOptions,
) -> Layout {
    let Some(active) = items.get(active_index) else {
        return Layout::default();
    };

    let center_x = container_width as f32 * 0.5;
    let image_padding = options.image_padding as f32;
    let active_size = active.size();
    let half_active = active_size.width as f32 * 0.5;
    let center_y = match options.thumb_top_offset.px() {
        Some(offset) => offset as f32,
        None => active_size.height as f32 * 0.5,
    };
    let step = ITEM_GAP + 2.0 * options.thumb_padding as f32;

    let thumb = |item: &Item, left: f32| {
        let size = item.thumb_size();
        Placement {
            index: item.index(),
            left,
            top: center_y - size.height as f32 * 0.5,
            frame: item.is_leaving_active().then_some(Frame {
                width: size.width,
                height: size.height,
                padding: options.thumb_padding,
            }),
        }
    };

    let mut placements = Vec::with_capacity(items.len());

    // Walk outward from the active item so each offset is a running sum.
    let left_edge = center_x - half_active - image_padding;
    let mut packed = 0.0f32;
    for (distance, item) in items[..active_index].iter().rev().enumerate() {
        packed += item.thumb_size().width as f32;
        let left = left_edge - (distance + 1) as f32 * step - packed;
        placements.push(thumb(item, left));
    }
    placements.reverse();

    placements.push(Placement {
        index: active_index,
        left: left_edge,
        top: 0.0,
        frame: Some(Frame {
            width: active_size.width,
            height: active_size.height,
            padding: options.image_padding,
        }),
    });

    let right_edge = center_x + half_active + image_padding;
    let mut packed = 0.0f32;
    for (distance, item) in items[active_index + 1..].iter().enumerate() {
        let left = right_edge + (distance + 1) as f32 * step + packed;
        placements.push(thumb(item, left));
        packed += item.thumb_size().width as f32;
    }

    Layout {
        center_x,
        center_y,
        list_height: active_size
            .height
            .saturating_add(options.image_padding.saturating_mul(2)),
        placements,
    }
}
