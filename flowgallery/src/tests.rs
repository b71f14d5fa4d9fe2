use crate::*;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Apply(Target, Style),
    Stop(Target),
    Animate(Target, Style, TransitionHandle),
}

/// Records every call and keeps handles alive until the test completes them.
#[derive(Debug, Default)]
struct Recorder {
    next: u64,
    ops: Vec<Op>,
    live: Vec<(Target, TransitionHandle)>,
}

impl Animator for Recorder {
    fn apply(&mut self, target: Target, style: &Style) {
        self.ops.push(Op::Apply(target, *style));
    }

    fn stop(&mut self, target: Target) {
        self.ops.push(Op::Stop(target));
        self.live.retain(|(t, _)| *t != target);
    }

    fn animate(&mut self, target: Target, style: &Style, _timing: Timing) -> TransitionHandle {
        self.live.retain(|(t, _)| *t != target);
        self.next += 1;
        let handle = TransitionHandle::from_raw(self.next);
        self.ops.push(Op::Animate(target, *style, handle));
        self.live.push((target, handle));
        handle
    }
}

impl Recorder {
    fn applies_to(&self, target: Target) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Apply(t, _) if *t == target))
            .count()
    }
}

/// Finishes every live motion, including ones started by completions.
fn settle(g: &mut Gallery<Recorder>) {
    loop {
        let live = core::mem::take(&mut g.animator_mut().live);
        if live.is_empty() {
            return;
        }
        for (_, handle) in live {
            g.complete(handle);
        }
    }
}

fn loaded_sources(sizes: &[(u32, u32)]) -> Vec<ImageSource> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| {
            ImageSource::new(alloc::format!("img{i}.jpg"))
                .with_caption(alloc::format!("caption {i}"))
                .preloaded(Some(Size::new(w, h)))
        })
        .collect()
}

fn gallery(options: GalleryOptions, sizes: &[(u32, u32)], width: u32) -> Gallery<Recorder> {
    let mut g = Gallery::new(
        options,
        loaded_sources(sizes),
        ContainerWidth::Value(width),
        Recorder::default(),
    );
    settle(&mut g);
    g
}

fn lefts(layout: &Layout) -> Vec<f32> {
    layout.placements.iter().map(|p| p.left).collect()
}

fn assert_single_active<A: Animator>(g: &Gallery<A>) {
    let active: Vec<usize> = g
        .items()
        .iter()
        .filter(|it| it.is_active())
        .map(|it| it.index())
        .collect();
    assert_eq!(active, alloc::vec![g.active_index()]);
}

#[test]
fn thumb_size_follows_auto_policy() {
    let size = Size::new(800, 600);

    let opts = GalleryOptions::default();
    assert_eq!(derive_thumb_size(size, &opts), Size::new(100, 75));

    let opts = GalleryOptions::default().with_thumb_size(Dimension::Px(200), Dimension::Auto);
    assert_eq!(derive_thumb_size(size, &opts), Size::new(200, 150));

    let opts = GalleryOptions::default().with_thumb_size(Dimension::Auto, Dimension::Px(90));
    assert_eq!(derive_thumb_size(size, &opts), Size::new(120, 90));

    // No aspect preservation when both are fixed.
    let opts = GalleryOptions::default().with_thumb_size(Dimension::Px(50), Dimension::Px(50));
    assert_eq!(derive_thumb_size(size, &opts), Size::new(50, 50));
}

#[test]
fn thumb_size_rounds_half_up_and_is_idempotent() {
    let opts = GalleryOptions::default();
    // 333 * 100 / 200 = 166.5
    let size = Size::new(200, 333);
    let first = derive_thumb_size(size, &opts);
    assert_eq!(first, Size::new(100, 167));
    for _ in 0..3 {
        assert_eq!(derive_thumb_size(size, &opts), first);
    }
}

#[test]
fn unloaded_active_item_uses_loading_size() {
    let g = Gallery::new(
        GalleryOptions::default(),
        (0..3).map(|i| ImageSource::new(alloc::format!("{i}.jpg"))),
        ContainerWidth::Value(1000),
        Recorder::default(),
    );
    let layout = g.layout();
    assert_eq!(layout.placements[0].left, 450.0);
    assert_eq!(
        layout.placements[0].frame,
        Some(Frame {
            width: 100,
            height: 60,
            padding: 0
        })
    );
    assert_eq!(layout.list_height, 60);
    assert!(g.item(0).unwrap().natural_size().is_none());
    assert!(g.caption().is_none());
}

#[test]
fn scenario_active_loads_first_then_thumbnails() {
    let mut g = Gallery::new(
        GalleryOptions::default(),
        (0..5).map(|i| ImageSource::new(alloc::format!("{i}.jpg"))),
        ContainerWidth::Value(1000),
        Recorder::default(),
    );

    g.on_image_signal(
        0,
        LoadSignal::Load {
            natural: Some(Size::new(800, 600)),
        },
    );
    let layout = g.layout().clone();
    assert_eq!(layout.placements[0].left, 100.0);
    assert_eq!(
        layout.placements[0].frame,
        Some(Frame {
            width: 800,
            height: 600,
            padding: 0
        })
    );
    // Loading-width thumbnails packed right of the active edge (500 + 400).
    assert_eq!(lefts(&layout)[1..], [910.0, 1020.0, 1130.0, 1240.0]);
    assert!(layout.placements[1..].iter().all(|p| p.top == 270.0));
    assert!(layout.placements[1..].iter().all(|p| p.frame.is_none()));

    for i in 1..5 {
        g.on_image_signal(
            i,
            LoadSignal::Load {
                natural: Some(Size::new(800, 600)),
            },
        );
    }
    let layout = g.layout();
    assert_eq!(lefts(layout)[1..], [910.0, 1020.0, 1130.0, 1240.0]);
    assert!(layout.placements[1..].iter().all(|p| p.top == 262.5));
    assert_eq!(g.item(3).unwrap().thumb_size(), Size::new(100, 75));
    assert_eq!(g.list_height(), 600);
}

#[test]
fn thumbnails_pack_outward_on_both_sides() {
    let g = gallery(
        GalleryOptions::default().with_active_index(2),
        &[(200, 100), (200, 100), (200, 100), (200, 100)],
        1000,
    );
    let layout = g.layout();
    assert_eq!(lefts(layout), [180.0, 290.0, 400.0, 610.0]);
    assert_eq!(layout.center_y, 50.0);
    assert!(layout.placements.iter().all(|p| p.index == 2 || p.top == 25.0));
}

#[test]
fn padding_widens_gaps_and_list_height() {
    let g = gallery(
        GalleryOptions::default()
            .with_active_index(1)
            .with_padding(5, 2),
        &[(200, 100), (400, 300), (100, 100)],
        1000,
    );
    let layout = g.layout();
    assert_eq!(lefts(layout), [181.0, 295.0, 719.0]);
    assert_eq!(layout.placements[0].top, 125.0);
    assert_eq!(layout.placements[2].top, 100.0);
    assert_eq!(layout.list_height, 310);
    assert_eq!(g.list_height(), 310);
}

#[test]
fn fixed_thumb_top_offset_overrides_centering() {
    let g = gallery(
        GalleryOptions::default().with_thumb_top_offset(Dimension::Px(40)),
        &[(400, 300), (200, 100)],
        1000,
    );
    let layout = g.layout();
    assert_eq!(layout.center_y, 40.0);
    assert_eq!(layout.placements[1].top, 15.0);
}

#[test]
fn layout_is_pure() {
    let g = gallery(
        GalleryOptions::default().with_active_index(1),
        &[(300, 200), (640, 480), (120, 90)],
        900,
    );
    let a = compute_layout(1, 900, g.items(), g.options());
    let b = compute_layout(1, 900, g.items(), g.options());
    assert_eq!(a, b);
    assert_eq!(&a, g.layout());

    assert_eq!(compute_layout(7, 900, g.items(), g.options()), Layout::default());
    assert_eq!(compute_layout(0, 900, &[], g.options()), Layout::default());
}

#[test]
fn valid_moves_land_and_invalid_moves_are_rejected() {
    let sizes = [(100, 100); 5];
    for start in 0..5usize {
        for delta in -6isize..=6 {
            let mut g = gallery(
                GalleryOptions::default()
                    .with_active_index(start)
                    .with_animate(false),
                &sizes,
                800,
            );
            let target = start as isize + delta;
            let result = g.move_by(delta, None);
            if delta == 0 {
                assert_eq!(result, Err(MoveError::NoChange));
                assert_eq!(g.active_index(), start);
            } else if (0..5).contains(&target) {
                assert_eq!(result, Ok(()));
                assert_eq!(g.active_index(), target as usize);
            } else {
                assert_eq!(result, Err(MoveError::OutOfRange { target, len: 5 }));
                assert_eq!(g.active_index(), start);
            }
            assert_single_active(&g);
            assert!(g.items().iter().all(|it| !it.is_leaving_active()));
        }
    }
}

#[test]
fn jump_is_a_relative_move() {
    for target in 0..6usize {
        let opts = || {
            GalleryOptions::default()
                .with_active_index(2)
                .with_animate(false)
        };
        let mut a = gallery(opts(), &[(100, 100); 5], 800);
        let mut b = gallery(opts(), &[(100, 100); 5], 800);
        let ra = a.jump(target, None);
        let rb = b.move_by(target as isize - 2, None);
        assert_eq!(ra, rb);
        assert_eq!(a.active_index(), b.active_index());
        assert_eq!(a.layout(), b.layout());
    }
}

#[test]
fn animated_move_flags_leaving_item_until_its_own_completion() {
    let mut g = gallery(GalleryOptions::default(), &[(400, 300); 3], 1000);
    g.animator_mut().ops.clear();

    assert_eq!(g.next(None), Ok(()));
    assert_eq!(g.phase(), Phase::Transitioning);
    assert!(g.caption().is_none());
    assert!(g.item(0).unwrap().is_leaving_active());
    assert_single_active(&g);

    let leaving = g
        .animator()
        .live
        .iter()
        .find(|(t, _)| *t == Target::Item(0))
        .map(|(_, h)| *h)
        .unwrap();
    let active = g
        .animator()
        .live
        .iter()
        .find(|(t, _)| *t == Target::Item(1))
        .map(|(_, h)| *h)
        .unwrap();

    // The active item can settle first; the leaving flag waits for its own motion.
    g.complete(active);
    assert_eq!(g.phase(), Phase::Idle);
    assert_eq!(g.caption().map(|c| c.text.as_str()), Some("caption 1"));
    assert!(g.item(0).unwrap().is_leaving_active());

    g.complete(leaving);
    assert!(!g.item(0).unwrap().is_leaving_active());

    // The leaving item shrank to thumbnail size with thumbnail padding.
    let shrink = g.animator().ops.iter().find_map(|op| match op {
        Op::Animate(Target::Item(0), style, _) => Some(*style),
        _ => None,
    });
    let shrink = shrink.unwrap();
    assert_eq!(shrink.width, Some(100.0));
    assert_eq!(shrink.height, Some(75.0));
    assert_eq!(shrink.padding, Some(0.0));
}

#[test]
fn rapid_moves_supersede_in_flight_motion() {
    let mut g = gallery(GalleryOptions::default(), &[(800, 600); 4], 1200);

    assert_eq!(g.next(None), Ok(()));
    let first: Vec<TransitionHandle> = g.animator().live.iter().map(|(_, h)| *h).collect();
    g.animator_mut().ops.clear();

    assert_eq!(g.next(None), Ok(()));
    assert_eq!(g.active_index(), 2);
    assert_single_active(&g);
    assert!(g.item(0).unwrap().is_leaving_active());
    assert!(g.item(1).unwrap().is_leaving_active());
    assert!(first.iter().all(|h| !g.is_pending(*h)));

    // Every new target is preceded by a stop on the same target.
    let mut last: BTreeMap<Target, &Op> = BTreeMap::new();
    for op in &g.animator().ops {
        match op {
            Op::Animate(t, _, _) => {
                assert!(matches!(last.get(t), Some(Op::Stop(s)) if s == t));
                last.insert(*t, op);
            }
            Op::Stop(t) | Op::Apply(t, _) => {
                last.insert(*t, op);
            }
        }
    }

    // Stale completions from the superseded move change nothing.
    for h in first {
        g.complete(h);
    }
    assert!(g.item(1).unwrap().is_leaving_active());
    assert_eq!(g.phase(), Phase::Transitioning);

    settle(&mut g);
    assert_eq!(g.phase(), Phase::Idle);
    assert_eq!(g.active_index(), 2);
    assert_single_active(&g);
    assert!(g.items().iter().all(|it| !it.is_leaving_active()));
}

#[test]
fn moving_back_onto_a_leaving_item_clears_its_flag() {
    let mut g = gallery(GalleryOptions::default(), &[(300, 200); 3], 1000);
    assert_eq!(g.next(None), Ok(()));
    assert_eq!(g.prev(None), Ok(()));
    assert!(!g.item(0).unwrap().is_leaving_active());
    assert!(g.item(1).unwrap().is_leaving_active());
    settle(&mut g);
    assert!(g.items().iter().all(|it| !it.is_leaving_active()));
}

#[test]
fn resize_while_disabled_is_replayed_once_with_new_width() {
    let width = Arc::new(AtomicU32::new(1000));
    let source = Arc::clone(&width);
    let mut g = Gallery::new(
        GalleryOptions::default().with_animate(false),
        loaded_sources(&[(400, 300); 3]),
        ContainerWidth::provider(move || source.load(Ordering::Relaxed)),
        Recorder::default(),
    );

    g.disable();
    assert!(!g.is_enabled());
    width.store(600, Ordering::Relaxed);
    assert!(!g.on_resize());
    assert!(!g.on_resize());
    assert_eq!(g.container_width(), 1000);
    assert_eq!(g.next(None), Err(MoveError::Disabled));

    g.animator_mut().ops.clear();
    g.enable();
    assert_eq!(g.container_width(), 600);
    assert_eq!(g.layout().center_x, 300.0);
    assert_eq!(g.animator().applies_to(Target::Item(0)), 1);

    g.animator_mut().ops.clear();
    g.disable();
    g.enable();
    assert!(g.animator().ops.is_empty());
}

#[test]
fn resize_relayouts_immediately_and_keeps_caption() {
    let width = Arc::new(AtomicU32::new(1000));
    let source = Arc::clone(&width);
    let mut g = Gallery::new(
        GalleryOptions::default(),
        loaded_sources(&[(400, 300); 2]),
        ContainerWidth::provider(move || source.load(Ordering::Relaxed)),
        Recorder::default(),
    );
    settle(&mut g);
    assert_eq!(g.caption().unwrap().left, 300.0);

    width.store(800, Ordering::Relaxed);
    assert!(g.on_resize());
    assert_eq!(g.layout().placements[0].left, 200.0);
    assert_eq!(g.caption().unwrap().left, 200.0);
    assert_eq!(g.phase(), Phase::Idle);
}

#[test]
fn width_change_during_transition_triggers_second_pass_on_settle() {
    let width = Arc::new(AtomicU32::new(1000));
    let source = Arc::clone(&width);
    let mut g = Gallery::new(
        GalleryOptions::default().with_padding(4, 0),
        loaded_sources(&[(400, 300); 3]),
        ContainerWidth::provider(move || source.load(Ordering::Relaxed)),
        Recorder::default(),
    );
    settle(&mut g);

    assert_eq!(g.next(None), Ok(()));
    // A scrollbar appears while the move animates.
    width.store(980, Ordering::Relaxed);
    g.animator_mut().ops.clear();
    settle(&mut g);

    assert_eq!(g.container_width(), 980);
    assert_eq!(g.layout().center_x, 490.0);
    assert!(g.animator().applies_to(Target::Item(1)) >= 1);

    let caption = g.caption().unwrap();
    assert_eq!(caption.text, "caption 1");
    assert_eq!(caption.left, 490.0 - 4.0 - 200.0);
    assert_eq!(caption.top, 308.0);
    assert_eq!(caption.width, 380);
}

#[test]
fn clicking_active_item_honours_forward_option() {
    let mut g = gallery(
        GalleryOptions::default().with_animate(false),
        &[(100, 100); 3],
        500,
    );
    assert!(g.click(0));
    assert_eq!(g.active_index(), 1);
    assert!(g.click(1));
    assert_eq!(g.active_index(), 2);
    // Already at the end: the forward move is rejected.
    assert!(!g.click(2));
    assert!(g.click(0));
    assert_eq!(g.active_index(), 0);

    let mut g = gallery(
        GalleryOptions::default()
            .with_animate(false)
            .with_forward_on_active_click(false),
        &[(100, 100); 3],
        500,
    );
    assert!(!g.click(0));
    assert_eq!(g.active_index(), 0);
    assert!(g.click(2));
    assert_eq!(g.active_index(), 2);
    assert!(!g.click(9));
}

#[test]
fn clicks_on_unloaded_items_are_ignored() {
    let mut g = Gallery::new(
        GalleryOptions::default().with_animate(false),
        (0..3).map(|i| ImageSource::new(alloc::format!("{i}.jpg"))),
        ContainerWidth::Value(500),
        Recorder::default(),
    );
    assert!(!g.click(2));
    g.on_image_signal(
        2,
        LoadSignal::Load {
            natural: Some(Size::new(50, 50)),
        },
    );
    assert!(g.click(2));
    assert_eq!(g.active_index(), 2);
}

#[test]
fn arrow_keys_map_to_directional_moves() {
    let mut g = gallery(
        GalleryOptions::default()
            .with_active_index(1)
            .with_animate(false),
        &[(100, 100); 3],
        500,
    );
    assert!(g.key(Key::ArrowLeft));
    assert_eq!(g.active_index(), 2);
    assert!(g.key(Key::ArrowRight));
    assert_eq!(g.active_index(), 1);
    assert!(!g.key(Key::Other));
    assert_eq!(g.active_index(), 1);

    let mut g = gallery(
        GalleryOptions::default()
            .with_animate(false)
            .with_key_navigation(false),
        &[(100, 100); 3],
        500,
    );
    assert!(!g.key(Key::ArrowLeft));
    assert_eq!(g.active_index(), 0);
}

#[test]
fn never_loading_image_does_not_block_others() {
    let sources = alloc::vec![
        ImageSource::new("a.jpg").with_caption("a"),
        ImageSource::new("b.jpg").with_caption("b"),
        ImageSource::new("c.jpg").with_caption("c"),
    ];
    let mut g = Gallery::new(
        GalleryOptions::default(),
        sources,
        ContainerWidth::Value(1000),
        Recorder::default(),
    );
    for i in [0, 2] {
        g.on_image_signal(
            i,
            LoadSignal::Load {
                natural: Some(Size::new(400, 300)),
            },
        );
    }
    settle(&mut g);
    assert_eq!(g.caption().map(|c| c.text.as_str()), Some("a"));

    assert_eq!(g.next(None), Ok(()));
    settle(&mut g);
    // Active but never loaded: no caption.
    assert!(g.caption().is_none());
    assert_eq!(g.item(1).unwrap().load_state(), LoadState::Loading);

    assert_eq!(g.next(None), Ok(()));
    settle(&mut g);
    assert_eq!(g.caption().map(|c| c.text.as_str()), Some("c"));
    assert!(!g.item(1).unwrap().is_loaded());
    assert!(g.item(1).unwrap().natural_size().is_none());
    assert!(g.items().iter().all(|it| !it.is_leaving_active()));
}

#[test]
fn load_completion_is_delivered_at_most_once() {
    let mut g = Gallery::new(
        GalleryOptions::default(),
        (0..2).map(|i| ImageSource::new(alloc::format!("{i}.jpg"))),
        ContainerWidth::Value(1000),
        Recorder::default(),
    );

    g.on_image_signal(
        1,
        LoadSignal::ReadyStateChange {
            complete: false,
            natural: None,
        },
    );
    assert!(g.item(1).unwrap().is_loading());

    g.on_image_signal(
        1,
        LoadSignal::ReadyStateChange {
            complete: true,
            natural: Some(Size::new(200, 100)),
        },
    );
    assert!(g.item(1).unwrap().is_loaded());
    let resizes = g
        .animator()
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Animate(Target::Item(1), _, _)))
        .count();
    assert_eq!(resizes, 1);

    g.on_image_signal(
        1,
        LoadSignal::Load {
            natural: Some(Size::new(999, 999)),
        },
    );
    g.on_image_signal(1, LoadSignal::Error);
    assert_eq!(g.item(1).unwrap().size(), Size::new(200, 100));
    assert_eq!(g.item(1).unwrap().load_state(), LoadState::Loaded);

    // Unknown index is ignored.
    g.on_image_signal(5, LoadSignal::Error);
}

#[test]
fn failed_image_stops_loading_but_never_counts_as_loaded() {
    let mut g = Gallery::new(
        GalleryOptions::default(),
        (0..2).map(|i| ImageSource::new(alloc::format!("{i}.jpg"))),
        ContainerWidth::Value(1000),
        Recorder::default(),
    );
    g.on_image_signal(1, LoadSignal::Error);
    let item = g.item(1).unwrap();
    assert_eq!(item.load_state(), LoadState::Failed);
    assert!(!item.is_loading());
    assert!(!item.is_loaded());

    g.on_image_signal(
        1,
        LoadSignal::Load {
            natural: Some(Size::new(10, 10)),
        },
    );
    assert_eq!(g.item(1).unwrap().load_state(), LoadState::Failed);
    assert_eq!(g.item(1).unwrap().size(), Size::new(100, 60));
}

#[test]
fn missing_intrinsic_size_falls_back_to_probe() {
    let opts = GalleryOptions::default().with_image_probe(Some(|src: &str| {
        (src == "probed.jpg").then_some(Size::new(300, 200))
    }));
    let mut g = Gallery::new(
        opts,
        [ImageSource::new("probed.jpg"), ImageSource::new("opaque.jpg")],
        ContainerWidth::Value(1000),
        Recorder::default(),
    );
    g.on_image_signal(0, LoadSignal::Load { natural: None });
    g.on_image_signal(
        1,
        LoadSignal::Load {
            natural: Some(Size::new(0, 0)),
        },
    );

    assert_eq!(g.item(0).unwrap().natural_size(), Some(Size::new(300, 200)));
    assert_eq!(g.item(0).unwrap().thumb_size(), Size::new(100, 67));
    // No size anywhere: loaded, but keeps the placeholder.
    assert!(g.item(1).unwrap().is_loaded());
    assert_eq!(g.item(1).unwrap().size(), Size::new(100, 60));
}

#[test]
fn forced_size_overrides_natural_size() {
    let g = gallery(
        GalleryOptions::default().with_forced_size(Some(500), None),
        &[(800, 600)],
        1000,
    );
    assert_eq!(g.item(0).unwrap().natural_size(), Some(Size::new(500, 600)));
    assert_eq!(g.layout().placements[0].left, 250.0);
}

#[test]
fn preloaded_sources_complete_during_construction() {
    let g = gallery(
        GalleryOptions::default().with_active_index(1),
        &[(640, 480), (320, 240)],
        1000,
    );
    assert!(g.items().iter().all(|it| it.is_loaded()));
    assert_eq!(g.caption().map(|c| c.text.as_str()), Some("caption 1"));
    assert_eq!(g.list_height(), 480);
    assert_eq!(g.layout().list_height, 240);
}

#[test]
fn out_of_range_initial_index_falls_back_to_last_item() {
    let g = gallery(
        GalleryOptions::default().with_active_index(10),
        &[(100, 100); 3],
        500,
    );
    assert_eq!(g.active_index(), 2);
    assert_single_active(&g);
}

#[test]
fn empty_gallery_rejects_every_move() {
    let mut g = gallery(GalleryOptions::default(), &[], 500);
    assert!(g.is_empty());
    assert_eq!(
        g.next(None),
        Err(MoveError::OutOfRange { target: 1, len: 0 })
    );
    assert!(!g.click(0));
    assert!(g.on_resize());
    assert!(g.layout().placements.is_empty());
}

#[test]
fn immediate_move_settles_synchronously() {
    let mut g = gallery(GalleryOptions::default(), &[(400, 300); 3], 1000);
    assert_eq!(g.jump(2, Some(false)), Ok(()));
    assert_eq!(g.phase(), Phase::Idle);
    assert!(g.animator().live.is_empty());
    assert!(g.items().iter().all(|it| !it.is_leaving_active()));
    assert_eq!(g.caption().map(|c| c.text.as_str()), Some("caption 2"));
}

#[test]
fn load_during_transition_settles_it() {
    let mut sources = loaded_sources(&[(400, 300); 2]);
    sources.push(ImageSource::new("late.jpg"));
    let mut g = Gallery::new(
        GalleryOptions::default(),
        sources,
        ContainerWidth::Value(1000),
        Recorder::default(),
    );
    settle(&mut g);

    assert_eq!(g.next(None), Ok(()));
    assert_eq!(g.phase(), Phase::Transitioning);
    g.on_image_signal(
        2,
        LoadSignal::Load {
            natural: Some(Size::new(200, 200)),
        },
    );
    assert_eq!(g.phase(), Phase::Idle);
    assert!(!g.item(0).unwrap().is_leaving_active());
    assert_eq!(g.caption().map(|c| c.text.as_str()), Some("caption 1"));
}

#[test]
fn options_merge_layers_in_order() {
    let config = OptionsPatch {
        thumb_width: Some(Dimension::Px(120)),
        duration_ms: Some(300),
        loading_class: Some(String::from("pending")),
        ..OptionsPatch::default()
    };
    let metadata = OptionsPatch {
        active_index: Some(3),
        thumb_width: Some(Dimension::Auto),
        ..OptionsPatch::default()
    };
    let opts = GalleryOptions::default().merge(config).merge(metadata);
    assert_eq!(opts.active_index, 3);
    assert_eq!(opts.thumb_width, Dimension::Auto);
    assert_eq!(opts.duration_ms, 300);
    assert_eq!(opts.loading_class, "pending");
    assert!(opts.forward_on_active_click);
    assert!(!opts.circular);
}

#[cfg(feature = "serde")]
#[test]
fn options_patch_reads_camel_case_metadata() {
    let config: OptionsPatch =
        serde_json::from_str(r#"{"thumbWidth": 120, "duration": 300, "easing": "swing"}"#)
            .unwrap();
    let metadata: OptionsPatch =
        serde_json::from_str(r#"{"activeIndex": 3, "thumbTopOffset": "auto", "forceWidth": 640}"#)
            .unwrap();
    let opts = GalleryOptions::default().merge(config).merge(metadata);
    assert_eq!(opts.active_index, 3);
    assert_eq!(opts.thumb_width, Dimension::Px(120));
    assert_eq!(opts.thumb_top_offset, Dimension::Auto);
    assert_eq!(opts.duration_ms, 300);
    assert_eq!(opts.easing, Easing::SmoothStep);
    assert_eq!(opts.force_width, Some(640));

    assert!(serde_json::from_str::<OptionsPatch>(r#"{"thumbWidth": "wide"}"#).is_err());
}

#[test]
fn extreme_targets_are_rejected_without_overflow() {
    let mut g = gallery(
        GalleryOptions::default()
            .with_active_index(1)
            .with_animate(false),
        &[(100, 100); 3],
        500,
    );
    let out_of_range =
        |r: Result<(), MoveError>| matches!(r, Err(MoveError::OutOfRange { len: 3, .. }));

    assert!(out_of_range(g.jump(usize::MAX, None)));
    assert!(out_of_range(g.jump(1usize << 63, None)));
    assert!(out_of_range(g.move_by(isize::MAX, None)));
    assert!(out_of_range(g.move_by(isize::MIN, None)));
    assert_eq!(
        g.move_by(isize::MAX, None),
        Err(MoveError::OutOfRange {
            target: isize::MAX,
            len: 3
        })
    );
    assert_eq!(g.active_index(), 1);
    assert_single_active(&g);
    assert!(g.items().iter().all(|it| !it.is_leaving_active()));
}

#[test]
fn thumbnails_start_at_loading_placeholder() {
    let g = Gallery::new(
        GalleryOptions::default().with_padding(0, 2),
        (0..3).map(|i| ImageSource::new(alloc::format!("{i}.jpg"))),
        ContainerWidth::Value(1000),
        Recorder::default(),
    );
    let placeholder = Style {
        width: Some(100.0),
        height: Some(60.0),
        padding: Some(2.0),
        ..Style::default()
    };
    for index in [1, 2] {
        let first = g.animator().ops.iter().find(|op| match op {
            Op::Apply(t, _) | Op::Stop(t) | Op::Animate(t, _, _) => *t == Target::Item(index),
        });
        assert_eq!(first, Some(&Op::Apply(Target::Item(index), placeholder)));
    }
    assert!(
        !g.animator()
            .ops
            .contains(&Op::Apply(Target::Item(0), placeholder))
    );
}
