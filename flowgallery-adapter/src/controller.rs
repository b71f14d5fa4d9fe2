use alloc::string::String;
use alloc::vec::Vec;

use flowgallery::{
    ContainerWidth, Gallery, GalleryApi, GalleryOptions, ImageSource, Key, LoadSignal, Target,
};

use crate::{Channel, EventHost, ItemView, Scene, SubscriptionId, TweenAnimator};

/// A host event routed through [`Controller::handle_event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Resize,
    Key(Key),
    Click(usize),
    Image { index: usize, signal: LoadSignal },
}

/// A framework-neutral controller that owns a `flowgallery::Gallery` driven by a
/// [`TweenAnimator`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `mount` / `unmount` around the gallery's lifetime on screen
/// - `handle_event` when UI events occur
/// - `tick(now_ms)` each frame/timer tick, then `scene()` to render
#[derive(Debug)]
pub struct Controller {
    gallery: Gallery<TweenAnimator>,
    subscriptions: Vec<(Channel, SubscriptionId)>,
    mounted: bool,
}

impl Controller {
    pub fn new(
        options: GalleryOptions,
        sources: impl IntoIterator<Item = ImageSource>,
        container: ContainerWidth,
    ) -> Self {
        Self::from_gallery(Gallery::new(
            options,
            sources,
            container,
            TweenAnimator::new(),
        ))
    }

    pub fn from_gallery(gallery: Gallery<TweenAnimator>) -> Self {
        Self {
            gallery,
            subscriptions: Vec::new(),
            mounted: false,
        }
    }

    pub fn gallery(&self) -> &Gallery<TweenAnimator> {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery<TweenAnimator> {
        &mut self.gallery
    }

    pub fn into_gallery(self) -> Gallery<TweenAnimator> {
        self.gallery
    }

    /// The control surface to hand to page code.
    pub fn api(&mut self) -> &mut dyn GalleryApi {
        &mut self.gallery
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_animating(&self) -> bool {
        self.gallery.animator().is_animating()
    }

    /// Subscribes to resize events, and to key presses when key navigation is enabled.
    ///
    /// Mounting twice is a no-op.
    pub fn mount(&mut self, host: &mut impl EventHost) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.subscribe(host, Channel::Resize);
        if self.gallery.options().enable_key_navigation {
            self.subscribe(host, Channel::KeyDown);
        }
    }

    /// Releases every subscription taken by [`Controller::mount`].
    pub fn unmount(&mut self, host: &mut impl EventHost) {
        for (_channel, id) in self.subscriptions.drain(..) {
            fdebug!(channel = ?_channel, id = id.0, "unsubscribe");
            host.unsubscribe(id);
        }
        self.mounted = false;
    }

    fn subscribe(&mut self, host: &mut impl EventHost, channel: Channel) {
        let id = host.subscribe(channel);
        fdebug!(?channel, id = id.0, "subscribe");
        self.subscriptions.push((channel, id));
    }

    fn listens(&self, channel: Channel) -> bool {
        self.subscriptions.iter().any(|(c, _)| *c == channel)
    }

    /// Routes one host event to the gallery.
    ///
    /// Resize and key events are dropped unless the matching channel is subscribed. Returns
    /// `false` if the event was dropped or the gallery rejected it.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Resize => self.listens(Channel::Resize) && self.gallery.on_resize(),
            Event::Key(key) => self.listens(Channel::KeyDown) && self.gallery.key(key),
            Event::Click(index) => self.gallery.click(index),
            Event::Image { index, signal } => {
                self.gallery.on_image_signal(index, signal);
                true
            }
        }
    }

    /// Advances the animator and reports finished motions back to the gallery.
    ///
    /// Returns `true` while any motion is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let finished = self.gallery.animator_mut().tick(now_ms);
        for handle in finished {
            self.gallery.complete(handle);
        }
        self.is_animating()
    }

    /// Snapshot of what to draw right now.
    pub fn scene(&self) -> Scene {
        let animator = self.gallery.animator();
        let loading_class = &self.gallery.options().loading_class;
        let items = self
            .gallery
            .items()
            .iter()
            .map(|item| ItemView {
                index: item.index(),
                src: String::from(item.src()),
                geometry: animator
                    .geometry(Target::Item(item.index()))
                    .unwrap_or_default(),
                active: item.is_active(),
                class: item.is_loading().then(|| loading_class.clone()),
            })
            .collect();
        Scene {
            list_height: animator.geometry(Target::List).map_or(0.0, |g| g.height),
            items,
            caption: self.gallery.caption().cloned(),
        }
    }
}
