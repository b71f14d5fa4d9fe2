// Example: headless gallery with an animator that just prints what it is asked to do.
use flowgallery::{
    Animator, ContainerWidth, Gallery, GalleryApi, GalleryOptions, ImageSource, LoadSignal, Size,
    Style, Target, Timing, TransitionHandle,
};

#[derive(Debug, Default)]
struct PrintAnimator {
    next: u64,
    pending: Vec<TransitionHandle>,
}

impl Animator for PrintAnimator {
    fn apply(&mut self, target: Target, style: &Style) {
        println!("apply   {target:?} {style:?}");
    }

    fn stop(&mut self, target: Target) {
        println!("stop    {target:?}");
    }

    fn animate(&mut self, target: Target, style: &Style, timing: Timing) -> TransitionHandle {
        self.next += 1;
        let handle = TransitionHandle::from_raw(self.next);
        println!("animate {target:?} {style:?} over {}ms", timing.duration_ms);
        self.pending.push(handle);
        handle
    }
}

fn main() {
    let sources = (0..4).map(|i| {
        ImageSource::new(format!("photo-{i}.jpg")).with_caption(format!("Photo {i}"))
    });
    let mut g = Gallery::new(
        GalleryOptions::default().with_padding(4, 2),
        sources,
        ContainerWidth::Value(1280),
        PrintAnimator::default(),
    );

    // Images report their intrinsic size as they arrive.
    let sizes = [
        (0, Size::new(800, 600)),
        (1, Size::new(640, 480)),
        (3, Size::new(600, 800)),
    ];
    for (index, size) in sizes {
        g.on_image_signal(index, LoadSignal::Load {
            natural: Some(size),
        });
    }
    g.on_image_signal(2, LoadSignal::Error);
    println!("layout: {:#?}", g.layout());

    if let Err(err) = g.jump(3, None) {
        println!("jump rejected: {err}");
    }
    println!("phase after jump: {:?}", g.phase());

    // Pretend every animation finished.
    for handle in std::mem::take(&mut g.animator_mut().pending) {
        g.complete(handle);
    }
    println!("phase: {:?} caption: {:?}", g.phase(), g.caption());

    match g.next(None) {
        Ok(()) => println!("moved"),
        Err(err) => println!("next rejected: {err}"),
    }
}
