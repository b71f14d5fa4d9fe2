use alloc::string::String;
use alloc::vec::Vec;

use flowgallery::Caption;

use crate::Geometry;

/// What to draw for one item slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemView {
    pub index: usize,
    pub src: String,
    pub geometry: Geometry,
    pub active: bool,
    /// The configured loading class while the image is still loading.
    pub class: Option<String>,
}

/// A render snapshot produced by [`crate::Controller::scene`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub list_height: f32,
    pub items: Vec<ItemView>,
    pub caption: Option<Caption>,
}

impl Scene {
    pub fn active(&self) -> Option<&ItemView> {
        self.items.iter().find(|it| it.active)
    }
}
