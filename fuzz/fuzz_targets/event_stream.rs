#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use slot_crop::engine::{CropRect, Geometry};
use slot_crop::ops::events_from_bytes;
use slot_crop::{ImageItem, ImageSlot, SlotBounds, SlotHost, SourceSize};

#[derive(Arbitrary, Debug)]
struct SlotSeed {
    source_width: u16,
    source_height: u16,
    display_width: u16,
    crop: [u16; 4],
    min_width: u16,
    max_width: u16,
    min_side: u8,
}

/// Host that checks every commit it receives
struct CheckingHost;

impl SlotHost for CheckingHost {
    fn preview(&mut self, geometry: &Geometry) {
        assert!(geometry.crop.is_finite());
        assert!(geometry.is_proportional());
    }

    fn commit(&mut self, item: ImageItem) {
        assert!(item.is_consistent(), "inconsistent commit: {item:?}");
    }
}

fn build_item(seed: &SlotSeed) -> ImageItem {
    let source = SourceSize::new(
        u32::from(seed.source_width).max(1),
        u32::from(seed.source_height).max(1),
    );
    let mut item = ImageItem::new("fuzz", "asset://fuzz", source, u32::from(seed.display_width));
    // arbitrary crop, possibly outside the source: the slot repairs it
    item.crop = CropRect::new(
        f64::from(seed.crop[0]),
        f64::from(seed.crop[1]),
        f64::from(seed.crop[2]),
        f64::from(seed.crop[3]),
    );
    item
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(seed) = SlotSeed::arbitrary(&mut u) else {
        return;
    };
    let min_width = u32::from(seed.min_width).max(1);
    let Ok(bounds) = SlotBounds::new(
        min_width,
        u32::from(seed.max_width).max(min_width),
        f64::from(seed.min_side).max(1.0),
    ) else {
        return;
    };

    let mut host = CheckingHost;
    let Ok(mut slot) = ImageSlot::new(build_item(&seed), bounds, &mut host) else {
        return;
    };
    slot.check_invariants().unwrap();

    for event in events_from_bytes(u.take_rest()) {
        slot.handle(event, &mut host);
        if let Err(err) = slot.check_invariants() {
            panic!("invariant broken after {event:?}: {err}");
        }
    }
});
