use alloc::vec::Vec;
use core::mem;

use crate::item::LoadOutcome;
use crate::{
    Animator, Caption, ContainerWidth, Easing, GalleryApi, GalleryOptions, ImageSource, Item, Key,
    Layout, LoadSignal, MoveError, Phase, Size, Style, Target, Timing, TransitionHandle,
    compute_layout, place_caption,
};

/// Timing of the resize a thumbnail performs once its image has loaded.
const THUMB_RESIZE_TIMING: Timing = Timing {
    duration_ms: 400,
    easing: Easing::SmoothStep,
};

/// What to do when a motion finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Completion {
    /// The active item reached its slot: show the caption and re-check the container width.
    ActiveSettled,
    /// The item that left the active slot reached thumbnail form.
    LeavingSettled(usize),
    Reposition,
    ListResized,
    /// Load-triggered resize of a thumbnail; not part of a layout pass.
    ThumbResized,
}

impl Completion {
    fn is_flow(self) -> bool {
        !matches!(self, Self::ThumbResized)
    }
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    target: Target,
    handle: TransitionHandle,
    completion: Completion,
}

/// A headless cover flow gallery.
///
/// The gallery owns the item slots, container geometry and transition state. It holds no UI
/// objects: the host reports image load signals, resizes, clicks, keys and animation
/// completions, and the gallery drives an [`Animator`] in return.
///
/// Exactly one item is active once construction completes. Moves that would leave
/// `0..len` are rejected, never clamped.
///
/// The outward control surface is [`crate::GalleryApi`]; the inherent methods here are the
/// host-facing side.
#[derive(Debug)]
pub struct Gallery<A> {
    options: GalleryOptions,
    items: Vec<Item>,
    active_index: usize,

    container: ContainerWidth,
    container_width: u32,
    center_x: f32,
    center_y: f32,
    // Tallest padded height seen so far.
    list_height: u32,
    // Height last issued to the list box.
    list_box_height: u32,
    layout: Layout,
    caption: Option<Caption>,

    enabled: bool,
    resize_pending: bool,

    // At most one entry per target.
    in_flight: Vec<InFlight>,
    animator: A,
}

impl<A: Animator> Gallery<A> {
    /// Creates a gallery with one item per source and lays it out immediately.
    ///
    /// Sources that were already loaded complete synchronously, before the initial layout.
    /// An out-of-range `options.active_index` falls back to the last item.
    pub fn new(
        options: GalleryOptions,
        sources: impl IntoIterator<Item = ImageSource>,
        container: ContainerWidth,
        animator: A,
    ) -> Self {
        let mut preloaded = Vec::new();
        let items: Vec<Item> = sources
            .into_iter()
            .enumerate()
            .map(|(index, mut source)| {
                if let Some(natural) = source.preloaded.take() {
                    preloaded.push((index, natural));
                }
                Item::new(index, source, &options)
            })
            .collect();

        let mut active_index = options.active_index;
        if !items.is_empty() && active_index >= items.len() {
            fwarn!(
                active_index,
                len = items.len(),
                "initial active index out of range, using last item"
            );
            active_index = items.len() - 1;
        }

        let container_width = container.resolve();
        fdebug!(
            len = items.len(),
            active_index,
            container_width,
            "Gallery::new"
        );

        let mut gallery = Self {
            options,
            items,
            active_index,
            container,
            container_width,
            center_x: container_width as f32 * 0.5,
            center_y: 0.0,
            list_height: 0,
            list_box_height: 0,
            layout: Layout::default(),
            caption: None,
            enabled: true,
            resize_pending: false,
            in_flight: Vec::new(),
            animator,
        };
        if let Some(item) = gallery.items.get_mut(active_index) {
            item.set_active(true);
        }
        // Thumbnails hold the loading placeholder until their image reports a size.
        let placeholder = Style {
            padding: Some(gallery.options.thumb_padding as f32),
            ..Style::default()
        }
        .with_size(gallery.options.loading_size());
        for index in (0..gallery.items.len()).filter(|&i| i != active_index) {
            gallery.animator.apply(Target::Item(index), &placeholder);
        }
        for (index, natural) in preloaded {
            gallery.on_image_signal(index, LoadSignal::Load { natural });
        }
        gallery.update_flow(false);
        gallery
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn active_item(&self) -> Option<&Item> {
        self.items.get(self.active_index)
    }

    /// The caption currently presented, if any.
    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    /// The layout applied by the most recent layout pass.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    /// Tallest padded image height seen so far.
    pub fn list_height(&self) -> u32 {
        self.list_height
    }

    pub fn phase(&self) -> Phase {
        if self
            .in_flight
            .iter()
            .any(|f| f.completion == Completion::ActiveSettled)
        {
            Phase::Transitioning
        } else {
            Phase::Idle
        }
    }

    /// Returns `true` while `handle` names a motion the gallery still waits for.
    pub fn is_pending(&self, handle: TransitionHandle) -> bool {
        self.in_flight.iter().any(|f| f.handle == handle)
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Moves the active slot by `delta`. `animate` defaults to `options.animate`.
    pub fn move_by(&mut self, delta: isize, animate: Option<bool>) -> Result<(), MoveError> {
        if !self.enabled {
            fdebug!(delta, "move rejected: gallery disabled");
            return Err(MoveError::Disabled);
        }
        let len = self.items.len();
        let start = self.active_index as isize;
        let Some(next) = start
            .checked_add(delta)
            .and_then(|t| usize::try_from(t).ok())
            .filter(|&t| t < len)
        else {
            let target = start.saturating_add(delta);
            fdebug!(delta, target, len, "move rejected: out of range");
            return Err(MoveError::OutOfRange { target, len });
        };
        if delta == 0 {
            return Err(MoveError::NoChange);
        }

        let animate = animate.unwrap_or(self.options.animate);
        let prev = self.active_index;
        ftrace!(from = prev, to = next, animate, "move");

        // Old marker off before the new one is set.
        self.items[prev].set_active(false);
        self.items[prev].set_leaving_active(true);
        self.active_index = next;
        self.items[next].set_active(true);

        self.caption = None;
        self.refresh_container_width();
        self.update_flow(animate);
        Ok(())
    }

    /// Equivalent to `move_by(index - active_index, animate)`.
    ///
    /// An index beyond `isize::MAX` is rejected as out of range.
    pub fn jump_to(&mut self, index: usize, animate: Option<bool>) -> Result<(), MoveError> {
        let delta = isize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(self.active_index as isize))
            .unwrap_or(isize::MAX);
        self.move_by(delta, animate)
    }

    /// Handles a click on an item. Returns `true` if it started a move.
    ///
    /// Clicks on items whose image has not loaded are ignored.
    pub fn click(&mut self, index: usize) -> bool {
        let Some(item) = self.items.get(index) else {
            fwarn!(index, "click on unknown item");
            return false;
        };
        if !item.is_loaded() {
            return false;
        }
        if index != self.active_index {
            self.jump_to(index, None).is_ok()
        } else if self.options.forward_on_active_click {
            self.move_by(1, None).is_ok()
        } else {
            false
        }
    }

    /// Handles a key press. Returns `true` if it started a move.
    ///
    /// Left arrow advances to the next item, right arrow goes back.
    pub fn key(&mut self, key: Key) -> bool {
        if !self.options.enable_key_navigation {
            return false;
        }
        match key {
            Key::ArrowLeft => self.move_by(1, None).is_ok(),
            Key::ArrowRight => self.move_by(-1, None).is_ok(),
            Key::Other => false,
        }
    }

    /// Feeds a load notification for item `index`.
    ///
    /// Completion is processed at most once per item; a failure is terminal.
    pub fn on_image_signal(&mut self, index: usize, signal: LoadSignal) {
        let Some(item) = self.items.get_mut(index) else {
            fwarn!(index, "load signal for unknown item");
            return;
        };
        match item.accept(signal) {
            LoadOutcome::Completed(natural) => self.finish_load(index, natural),
            LoadOutcome::Failed => {
                fwarn!(index, src = self.items[index].src(), "image failed to load");
            }
            LoadOutcome::Ignored => {}
        }
    }

    /// Handles a container resize. While disabled, the resize is remembered and replayed once
    /// on [`crate::GalleryApi::enable`].
    pub fn on_resize(&mut self) -> bool {
        if !self.enabled {
            if !self.resize_pending {
                fdebug!("resize while disabled, deferring");
            }
            self.resize_pending = true;
            return false;
        }
        self.refresh_container_width();
        self.update_flow(false);
        self.show_caption();
        true
    }

    /// Reports that the motion named by `handle` finished.
    ///
    /// Handles of superseded motions are ignored.
    pub fn complete(&mut self, handle: TransitionHandle) {
        let Some(pos) = self.in_flight.iter().position(|f| f.handle == handle) else {
            ftrace!(handle = handle.raw(), "ignoring stale transition handle");
            return;
        };
        let flight = self.in_flight.swap_remove(pos);
        self.run_completion(flight.completion);
    }

    fn finish_load(&mut self, index: usize, reported: Option<Size>) {
        let natural = reported.filter(|s| !s.is_degenerate()).or_else(|| {
            let probe = self.options.image_probe.as_ref()?;
            probe(self.items[index].src()).filter(|s| !s.is_degenerate())
        });
        if natural.is_none() {
            fwarn!(index, "no intrinsic size available, keeping loading size");
        }
        self.items[index].finish_load(natural, &self.options);
        ftrace!(index, size = ?self.items[index].size(), "image loaded");

        if index != self.active_index {
            let item = &self.items[index];
            let thumb = item.thumb_size();
            let mut style = Style::default().with_size(thumb);
            if self.items[self.active_index].is_loaded() {
                style.top = Some(self.center_y - thumb.height as f32 * 0.5);
            }
            let target = Target::Item(index);
            let busy = self.in_flight.iter().any(|f| f.target == target);
            if self.options.animate && !busy {
                let handle = self.animator.animate(target, &style, THUMB_RESIZE_TIMING);
                self.in_flight.push(InFlight {
                    target,
                    handle,
                    completion: Completion::ThumbResized,
                });
            } else {
                self.animator.apply(target, &style);
            }
        }

        let height = self.items[index].size().height;
        self.grow_list_height(height);
        self.update_flow(false);
    }

    fn grow_list_height(&mut self, height: u32) {
        let padded = height.saturating_add(self.options.image_padding.saturating_mul(2));
        if padded <= self.list_height {
            return;
        }
        self.list_height = padded;
        self.list_box_height = padded;
        let style = Style {
            height: Some(padded as f32),
            ..Style::default()
        };
        self.animator.apply(Target::List, &style);
    }

    fn refresh_container_width(&mut self) {
        self.container_width = self.container.resolve();
        self.center_x = self.container_width as f32 * 0.5;
    }

    /// Lays out every item for the current active index and issues the targets.
    ///
    /// Every target is assigned before any completion of this pass runs.
    fn update_flow(&mut self, animate: bool) -> bool {
        if !self.enabled {
            return false;
        }
        let layout = compute_layout(
            self.active_index,
            self.container_width,
            &self.items,
            &self.options,
        );
        if layout.placements.is_empty() {
            return false;
        }
        ftrace!(active = self.active_index, animate, "layout pass");
        self.center_x = layout.center_x;
        self.center_y = layout.center_y;

        let mut settled = Vec::new();
        if layout.list_height != self.list_box_height {
            self.list_box_height = layout.list_height;
            self.list_height = self.list_height.max(layout.list_height);
            let style = Style {
                height: Some(layout.list_height as f32),
                ..Style::default()
            };
            self.dispatch(
                Target::List,
                style,
                Completion::ListResized,
                animate,
                &mut settled,
            );
        }

        for placement in &layout.placements {
            let index = placement.index;
            let completion = if index == self.active_index {
                Completion::ActiveSettled
            } else if self.items[index].is_leaving_active() {
                Completion::LeavingSettled(index)
            } else {
                Completion::Reposition
            };
            self.dispatch(
                Target::Item(index),
                placement.style(),
                completion,
                animate,
                &mut settled,
            );
        }
        self.layout = layout;

        for completion in settled {
            self.run_completion(completion);
        }
        true
    }

    fn dispatch(
        &mut self,
        target: Target,
        mut style: Style,
        completion: Completion,
        animate: bool,
        settled: &mut Vec<Completion>,
    ) {
        let interrupted = if animate {
            self.cancel(target)
        } else {
            let flowing = self
                .in_flight
                .iter()
                .any(|f| f.target == target && f.completion.is_flow());
            flowing && self.cancel(target)
        };

        // A stopped motion may have frozen a thumbnail mid-resize.
        if let (true, Target::Item(index)) = (interrupted, target) {
            if style.width.is_none() {
                style = style.with_size(self.items[index].thumb_size());
            }
        }

        if animate {
            let handle = self
                .animator
                .animate(target, &style, self.options.timing());
            self.in_flight.push(InFlight {
                target,
                handle,
                completion,
            });
        } else {
            self.animator.apply(target, &style);
            settled.push(completion);
        }
    }

    // Stops whatever is in flight on `target` and forgets its handle.
    fn cancel(&mut self, target: Target) -> bool {
        let before = self.in_flight.len();
        self.in_flight.retain(|f| f.target != target);
        if self.in_flight.len() == before {
            return false;
        }
        self.animator.stop(target);
        true
    }

    fn run_completion(&mut self, completion: Completion) {
        match completion {
            Completion::ActiveSettled => self.after_flow(),
            Completion::LeavingSettled(index) => {
                if let Some(item) = self.items.get_mut(index) {
                    item.set_leaving_active(false);
                }
            }
            Completion::Reposition | Completion::ListResized | Completion::ThumbResized => {}
        }
    }

    fn after_flow(&mut self) {
        self.show_caption();

        // Scrollbars may have appeared or disappeared during the transition.
        let width = self.container.resolve();
        if width != self.container_width {
            fdebug!(
                from = self.container_width,
                to = width,
                "container width changed after settle"
            );
            self.refresh_container_width();
            self.update_flow(false);
            self.show_caption();
        }
    }

    fn show_caption(&mut self) {
        let Some(active) = self.items.get(self.active_index) else {
            return;
        };
        if active.is_loaded() {
            self.caption = place_caption(active, self.center_x, &self.options);
        }
    }
}

impl<A: Animator> GalleryApi for Gallery<A> {
    fn next(&mut self, animate: Option<bool>) -> Result<(), MoveError> {
        self.move_by(1, animate)
    }

    fn prev(&mut self, animate: Option<bool>) -> Result<(), MoveError> {
        self.move_by(-1, animate)
    }

    fn jump(&mut self, index: usize, animate: Option<bool>) -> Result<(), MoveError> {
        self.jump_to(index, animate)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self) {
        self.enabled = true;
        if mem::take(&mut self.resize_pending) {
            self.on_resize();
        }
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn options(&self) -> &GalleryOptions {
        &self.options
    }

    fn active_index(&self) -> usize {
        self.active_index
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
