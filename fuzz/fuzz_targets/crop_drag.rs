#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use slot_crop::engine::transform::{crop_candidate, display_to_source_delta};
use slot_crop::engine::{commit_crop, CommitOutcome, CropRect, ImageItem, Point, SourceSize};
use slot_crop::{Side, SlotBounds};

#[derive(Arbitrary, Debug)]
struct DragInput {
    source: (u16, u16),
    crop: (u16, u16, u16, u16),
    display_width: u16,
    side: u8,
    delta: (f64, f64),
    scale: f64,
}

fuzz_target!(|input: DragInput| {
    let source = SourceSize::new(
        u32::from(input.source.0).max(1),
        u32::from(input.source.1).max(1),
    );
    let bounds = SlotBounds::default();
    let mut item = ImageItem::new("fuzz", "asset://fuzz", source, u32::from(input.display_width));
    item.crop = CropRect::new(
        f64::from(input.crop.0),
        f64::from(input.crop.1),
        f64::from(input.crop.2),
        f64::from(input.crop.3),
    );
    let item = bounds.conform_item(&item).unwrap_or(item);

    let side = Side::ALL[usize::from(input.side) % 4];
    let delta = Point::new(input.delta.0, input.delta.1);
    if !delta.is_finite() {
        return;
    }
    let delta = display_to_source_delta(delta, input.scale);
    if !delta.is_finite() {
        return;
    }

    let crop = crop_candidate(side, &item.crop, delta, source, &bounds);
    assert!(crop.is_contained_in(source), "{crop:?} escaped {source:?}");

    let committed = commit_crop(&item, &item.geometry(), &crop, &bounds).resolve(&item);
    assert!(committed.is_consistent());
    assert_eq!(
        commit_crop(&committed, &committed.geometry(), &committed.crop, &bounds),
        CommitOutcome::Unchanged
    );
});
