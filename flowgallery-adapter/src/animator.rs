use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use flowgallery::{Animator, Style, Target, Timing, TransitionHandle};

use crate::Tween;

const CHANNELS: usize = 5;

/// Current box geometry of one target, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl Geometry {
    fn to_array(self) -> [f32; CHANNELS] {
        [self.left, self.top, self.width, self.height, self.padding]
    }

    fn from_array([left, top, width, height, padding]: [f32; CHANNELS]) -> Self {
        Self {
            left,
            top,
            width,
            height,
            padding,
        }
    }
}

fn style_channels(style: &Style) -> [Option<f32>; CHANNELS] {
    [
        style.left,
        style.top,
        style.width,
        style.height,
        style.padding,
    ]
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    handle: TransitionHandle,
    start_ms: u64,
    duration_ms: u64,
    // `None` for properties the motion does not (or no longer) drive.
    tweens: [Option<Tween>; CHANNELS],
}

impl Motion {
    fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }
}

/// An [`Animator`] that interpolates geometry with per-property tweens.
///
/// It holds no UI objects. Drive it with [`TweenAnimator::tick`] from a frame loop or timer and
/// read positions back with [`TweenAnimator::geometry`]. Motions started by the gallery begin at
/// the time of the most recent tick.
#[derive(Clone, Debug, Default)]
pub struct TweenAnimator {
    now_ms: u64,
    next_handle: u64,
    geometry: BTreeMap<Target, Geometry>,
    motions: BTreeMap<Target, Motion>,
}

impl TweenAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the most recent tick.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Current geometry of `target`, or `None` if nothing was ever applied to it.
    pub fn geometry(&self, target: Target) -> Option<Geometry> {
        self.geometry.get(&target).copied()
    }

    pub fn is_animating(&self) -> bool {
        !self.motions.is_empty()
    }

    pub fn is_moving(&self, target: Target) -> bool {
        self.motions.contains_key(&target)
    }

    /// Advances every motion to `now_ms` and returns the handles of motions that finished,
    /// in target order. Time never runs backwards; an earlier `now_ms` is treated as a repeat.
    pub fn tick(&mut self, now_ms: u64) -> Vec<TransitionHandle> {
        self.now_ms = self.now_ms.max(now_ms);
        let now_ms = self.now_ms;

        let mut finished = Vec::new();
        let geometry = &mut self.geometry;
        self.motions.retain(|target, motion| {
            let current = geometry.entry(*target).or_default();
            let mut values = current.to_array();
            for (value, tween) in values.iter_mut().zip(motion.tweens.iter()) {
                if let Some(tween) = tween {
                    *value = tween.sample(now_ms);
                }
            }
            *current = Geometry::from_array(values);

            if motion.is_done(now_ms) {
                finished.push(motion.handle);
                false
            } else {
                true
            }
        });
        finished
    }
}

impl Animator for TweenAnimator {
    fn apply(&mut self, target: Target, style: &Style) {
        let current = self.geometry.entry(target).or_default();
        let mut values = current.to_array();
        let motion = self.motions.get_mut(&target);
        let mut tweens = motion.map(|m| &mut m.tweens);
        for (channel, value) in style_channels(style).into_iter().enumerate() {
            let Some(value) = value else {
                continue;
            };
            values[channel] = value;
            if let Some(tweens) = tweens.as_deref_mut() {
                tweens[channel] = None;
            }
        }
        *current = Geometry::from_array(values);
    }

    fn stop(&mut self, target: Target) {
        // Geometry already holds the values of the last tick.
        self.motions.remove(&target);
    }

    fn animate(&mut self, target: Target, style: &Style, timing: Timing) -> TransitionHandle {
        self.next_handle += 1;
        let handle = TransitionHandle::from_raw(self.next_handle);

        let from = self.geometry.entry(target).or_default().to_array();
        let mut tweens = [None; CHANNELS];
        for (channel, value) in style_channels(style).into_iter().enumerate() {
            if let Some(to) = value {
                tweens[channel] = Some(Tween::new(
                    from[channel],
                    to,
                    self.now_ms,
                    timing.duration_ms,
                    timing.easing,
                ));
            }
        }

        self.motions.insert(
            target,
            Motion {
                handle,
                start_ms: self.now_ms,
                duration_ms: timing.duration_ms.max(1),
                tweens,
            },
        );
        handle
    }
}
