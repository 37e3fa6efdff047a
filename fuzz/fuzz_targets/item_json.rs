#![no_main]

use libfuzzer_sys::fuzz_target;
use slot_crop::engine::Geometry;
use slot_crop::{ImageItem, ImageSlot, SlotHost, SlotRole};

struct NullHost;

impl SlotHost for NullHost {
    fn preview(&mut self, _geometry: &Geometry) {}
    fn commit(&mut self, _item: ImageItem) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    // Parsing untrusted JSON must never panic
    let Ok(item) = ImageItem::from_json(json) else {
        return;
    };

    // Any parsed item either loads into a consistent slot or is rejected
    for role in [SlotRole::Logo, SlotRole::Header, SlotRole::PartnerLogo, SlotRole::Canvas] {
        if let Ok(slot) = ImageSlot::for_role(item.clone(), role, &mut NullHost) {
            slot.check_invariants().unwrap();
            let saved = slot.committed().to_json().unwrap();
            let reloaded = ImageItem::from_json(&saved).unwrap();
            assert!(reloaded.is_consistent());
        }
    }
});
