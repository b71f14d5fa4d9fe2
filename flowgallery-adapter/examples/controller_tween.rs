use flowgallery::{ContainerWidth, GalleryOptions, ImageSource, Key, LoadSignal, Size};
use flowgallery_adapter::{Channel, Controller, Event, EventHost, SubscriptionId};

/// Stands in for a window that hands out listener registrations.
#[derive(Default)]
struct Window {
    next: u64,
    listeners: Vec<(Channel, SubscriptionId)>,
}

impl EventHost for Window {
    fn subscribe(&mut self, channel: Channel) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.listeners.push((channel, id));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(_, l)| *l != id);
    }
}

fn main() {
    // Example: controller driving tweened transitions without holding any UI objects.
    //
    // An adapter would:
    // - mount the controller against its window/event loop
    // - forward resize/key/click/image events
    // - call tick(now_ms) in a frame loop and draw scene()
    let mut window = Window::default();
    let sources =
        ["dawn", "noon", "dusk"].map(|name| ImageSource::new(format!("{name}.jpg")).with_caption(name));
    let mut c = Controller::new(
        GalleryOptions::default().with_duration_ms(300),
        sources,
        ContainerWidth::Value(960),
    );
    c.mount(&mut window);
    println!("listeners={:?}", window.listeners);

    for index in 0..3 {
        c.handle_event(Event::Image {
            index,
            signal: LoadSignal::Load {
                natural: Some(Size::new(480, 320)),
            },
        });
    }
    c.handle_event(Event::Key(Key::ArrowLeft));

    let mut now_ms = 0u64;
    while c.tick(now_ms) {
        if now_ms.is_multiple_of(96) {
            let scene = c.scene();
            let active = scene.active().map(|it| (it.index, it.geometry));
            println!("t={now_ms} active={active:?}");
        }
        now_ms += 16;
    }

    let scene = c.scene();
    println!("done at t={now_ms}: caption={:?}", scene.caption);
    for item in &scene.items {
        println!("  #{} {:?} active={}", item.index, item.geometry, item.active);
    }

    c.unmount(&mut window);
    println!("listeners after unmount={:?}", window.listeners);
}
