// tests/integration_tests.rs
//
// Integration tests for the public ImageSlot API.
// Each test drives a slot with the same event stream a host would send and
// checks what the host gets back through SlotHost.

use slot_crop::engine::{CropRect, DisplaySize, Geometry, HandleSet, ScreenRect};
use slot_crop::{
    Corner, Handle, ImageItem, ImageSlot, InputEvent, Mode, Point, Side, SlotBounds, SlotHost,
    SlotRole, SourceSize,
};

#[derive(Default)]
struct RecordingHost {
    previews: Vec<Geometry>,
    commits: Vec<ImageItem>,
    modes: Vec<Mode>,
}

impl SlotHost for RecordingHost {
    fn preview(&mut self, geometry: &Geometry) {
        self.previews.push(*geometry);
    }

    fn commit(&mut self, item: ImageItem) {
        self.commits.push(item);
    }

    fn mode_changed(&mut self, mode: Mode) {
        self.modes.push(mode);
    }
}

fn bounds() -> SlotBounds {
    SlotBounds::new(40, 1200, 50.0).unwrap()
}

fn pointer_down(handle: Handle, x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown {
        handle,
        position: Point::new(x, y),
    }
}

fn pointer_move(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMove {
        position: Point::new(x, y),
    }
}

fn pointer_up(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerUp {
        position: Point::new(x, y),
    }
}

fn enter_crop_mode(slot: &mut ImageSlot, host: &mut RecordingHost) {
    slot.handle(InputEvent::Click, host);
    slot.handle(InputEvent::DoubleClick, host);
    assert_eq!(slot.mode(), Mode::Cropping);
}

fn item_with_crop(crop: CropRect, display_width: u32) -> ImageItem {
    let mut item = ImageItem::new(
        "hero",
        "https://cdn.example/hero.jpg",
        SourceSize::new(1000, 500),
        display_width,
    );
    item.crop = crop;
    item.display_height = slot_crop::engine::effective_display_height(display_width, &crop);
    item
}

#[test]
fn test_scenario_a_right_edge_past_source_is_noop() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("hero", "asset://hero", SourceSize::new(1000, 500), 300);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    assert_eq!(slot.geometry().display, DisplaySize::new(300, 150));
    enter_crop_mode(&mut slot, &mut host);

    // scale 0.3: 30 pointer px = +100 source px, clamped back to the source edge
    slot.handle(pointer_down(Handle::Side(Side::Right), 300.0, 75.0), &mut host);
    slot.handle(pointer_move(330.0, 75.0), &mut host);
    assert_eq!(slot.geometry().crop, CropRect::new(0.0, 0.0, 1000.0, 500.0));
    slot.handle(pointer_up(330.0, 75.0), &mut host);
    slot.handle(InputEvent::Confirm, &mut host);

    assert_eq!(slot.mode(), Mode::Idle);
    assert!(host.commits.is_empty(), "no-op crop must not reach the host");
}

#[test]
fn test_scenario_b_bottom_edge_commit() {
    let mut host = RecordingHost::default();
    let item = item_with_crop(CropRect::new(100.0, 50.0, 400.0, 300.0), 309);
    assert_eq!(item.display_height, 232);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    assert!(host.commits.is_empty());
    enter_crop_mode(&mut slot, &mut host);

    let scale = 309.0 / 400.0;
    slot.handle(pointer_down(Handle::Side(Side::Bottom), 150.0, 232.0), &mut host);
    slot.handle(pointer_move(150.0, 232.0 + 60.0 * scale), &mut host);
    slot.handle(pointer_up(150.0, 232.0 + 60.0 * scale), &mut host);
    slot.handle(InputEvent::ExternalClick, &mut host);

    assert_eq!(host.commits.len(), 1);
    let committed = &host.commits[0];
    assert_eq!(committed.crop, CropRect::new(100.0, 50.0, 400.0, 360.0));
    assert_eq!(committed.display_width, 309);
    assert_eq!(committed.display_height, 278);
    assert_eq!(committed.url, "https://cdn.example/hero.jpg");
    assert_eq!(slot.committed(), committed);
}

#[test]
fn test_scenario_c_rapid_drag_stops_at_min_side() {
    let mut host = RecordingHost::default();
    let item = item_with_crop(CropRect::new(0.0, 0.0, 100.0, 100.0), 100);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    enter_crop_mode(&mut slot, &mut host);

    // scale 1: pointer px == source px
    slot.handle(pointer_down(Handle::Side(Side::Right), 100.0, 50.0), &mut host);
    for x in [90.0, 70.0, 40.0, -200.0] {
        slot.handle(pointer_move(x, 50.0), &mut host);
        assert!(slot.geometry().crop.width >= 50.0);
    }
    slot.handle(pointer_up(-200.0, 50.0), &mut host);

    slot.handle(pointer_down(Handle::Side(Side::Bottom), 25.0, 100.0), &mut host);
    slot.handle(pointer_move(25.0, 40.0), &mut host);
    slot.handle(pointer_up(25.0, -500.0), &mut host);
    assert_eq!(slot.geometry().crop, CropRect::new(0.0, 0.0, 50.0, 50.0));

    slot.handle(InputEvent::Confirm, &mut host);
    assert_eq!(host.commits.len(), 1);
    assert_eq!(host.commits[0].crop, CropRect::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(host.commits[0].display_width, 50);
    assert_eq!(host.commits[0].display_height, 50);
}

#[test]
fn test_last_preview_matches_commit() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("hero", "asset://hero", SourceSize::new(1000, 500), 500);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    enter_crop_mode(&mut slot, &mut host);

    // scale 0.5: 100 pointer px = 200 source px, lands on whole pixels
    slot.handle(pointer_down(Handle::Side(Side::Left), 0.0, 125.0), &mut host);
    slot.handle(pointer_move(100.0, 125.0), &mut host);
    slot.handle(pointer_up(100.0, 125.0), &mut host);
    let last_preview = *host.previews.last().unwrap();

    slot.handle(InputEvent::ExternalClick, &mut host);
    let committed = &host.commits[0];
    assert_eq!(committed.crop, last_preview.crop);
    assert_eq!(committed.display_width, last_preview.display.width);
    assert_eq!(committed.display_height, last_preview.display.height);
    assert_eq!(committed.crop, CropRect::new(200.0, 0.0, 800.0, 500.0));
}

#[test]
fn test_several_crop_gestures_commit_once() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("hero", "asset://hero", SourceSize::new(1000, 500), 500);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    enter_crop_mode(&mut slot, &mut host);

    // first gesture: right edge -100 px at scale 0.5 = -200 source px
    slot.handle(pointer_down(Handle::Side(Side::Right), 500.0, 125.0), &mut host);
    slot.handle(pointer_up(400.0, 125.0), &mut host);
    assert_eq!(slot.geometry().crop.width, 800.0);
    assert_eq!(slot.geometry().display.width, 400);

    // on-screen scale is still 0.5 for the second gesture
    slot.handle(pointer_down(Handle::Side(Side::Left), 0.0, 125.0), &mut host);
    slot.handle(pointer_up(50.0, 125.0), &mut host);
    assert_eq!(slot.geometry().crop, CropRect::new(100.0, 0.0, 700.0, 500.0));
    assert_eq!(slot.geometry().display.width, 350);

    assert!(host.commits.is_empty());
    slot.handle(InputEvent::Confirm, &mut host);
    assert_eq!(host.commits.len(), 1);
    assert_eq!(host.commits[0].display_width, 350);
    assert_eq!(host.commits[0].display_height, 250);
}

#[test]
fn test_crop_edge_tracks_pointer_after_width_clamp() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("hero", "asset://hero", SourceSize::new(1000, 500), 300);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    enter_crop_mode(&mut slot, &mut host);

    // -270 px at scale 0.3 = -900 source px; the box would be 30 wide, clamps to 40
    slot.handle(pointer_down(Handle::Side(Side::Right), 300.0, 75.0), &mut host);
    slot.handle(pointer_up(30.0, 75.0), &mut host);
    assert_eq!(slot.geometry().crop.width, 100.0);
    assert_eq!(slot.geometry().display.width, 40);

    // on screen the scale is now 0.4: +40 px = +100 source px
    slot.handle(pointer_down(Handle::Side(Side::Right), 40.0, 75.0), &mut host);
    slot.handle(pointer_up(80.0, 75.0), &mut host);
    assert_eq!(slot.geometry().crop, CropRect::new(0.0, 0.0, 200.0, 500.0));
    assert_eq!(slot.geometry().display, DisplaySize::new(60, 150));

    slot.handle(InputEvent::Confirm, &mut host);
    assert_eq!(host.commits.len(), 1);
    assert_eq!(host.commits[0].crop, CropRect::new(0.0, 0.0, 200.0, 500.0));
    assert_eq!(host.commits[0].display_width, 60);
    assert_eq!(host.commits[0].display_height, 150);
    assert!(slot.check_invariants().is_ok());
}

#[test]
fn test_container_shrink_in_crop_mode_refits_box() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("hero", "asset://hero", SourceSize::new(1000, 500), 300);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    enter_crop_mode(&mut slot, &mut host);

    slot.set_container_width(200, &mut host).unwrap();
    assert_eq!(host.commits.len(), 1);
    assert_eq!(host.commits[0].display_width, 200);
    assert_eq!(slot.geometry().display, DisplaySize::new(200, 100));
    assert!(slot.geometry().display.width <= slot.bounds().max_width);
    assert!(slot.check_invariants().is_ok());

    // leaving without a gesture has nothing more to commit
    slot.handle(InputEvent::ExternalClick, &mut host);
    assert_eq!(host.commits.len(), 1);
    assert_eq!(slot.geometry(), &slot.committed().geometry());
}

#[test]
fn test_resize_gestures_commit_once_each() {
    let mut host = RecordingHost::default();
    let item = item_with_crop(CropRect::new(100.0, 50.0, 400.0, 300.0), 400);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    slot.handle(InputEvent::Click, &mut host);

    slot.handle(pointer_down(Handle::Corner(Corner::TopLeft), 0.0, 0.0), &mut host);
    for dx in 1..=20 {
        slot.handle(pointer_move(f64::from(dx) * 5.0, 0.0), &mut host);
        assert!(slot.geometry().is_proportional());
    }
    slot.handle(pointer_up(100.0, 37.0), &mut host);

    slot.handle(pointer_down(Handle::Corner(Corner::BottomRight), 300.0, 225.0), &mut host);
    slot.handle(pointer_up(500.0, 225.0), &mut host);

    assert_eq!(host.commits.len(), 2);
    assert_eq!(host.commits[0].display_width, 300);
    assert_eq!(host.commits[0].display_height, 225);
    assert_eq!(host.commits[1].display_width, 500);
    assert_eq!(host.commits[1].display_height, 375);
    assert!(host.commits.iter().all(|item| item.crop == CropRect::new(100.0, 50.0, 400.0, 300.0)));

    slot.handle(InputEvent::ExternalClick, &mut host);
    assert_eq!(slot.mode(), Mode::Idle);
    assert_eq!(host.commits.len(), 2);
}

#[test]
fn test_pointer_leave_ends_gesture() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("logo", "asset://logo", SourceSize::new(800, 800), 200);
    let mut slot = ImageSlot::for_role(item, SlotRole::Logo, &mut host).unwrap();
    slot.handle(InputEvent::Click, &mut host);

    slot.handle(pointer_down(Handle::Corner(Corner::BottomRight), 200.0, 200.0), &mut host);
    slot.handle(pointer_move(260.0, 200.0), &mut host);
    slot.handle(InputEvent::PointerLeave, &mut host);
    assert!(!slot.is_dragging());
    assert_eq!(host.commits.len(), 1);
    assert_eq!(host.commits[0].display_width, 260);

    // moves after the gesture ended are ignored
    let previews = host.previews.len();
    slot.handle(pointer_move(400.0, 200.0), &mut host);
    assert_eq!(host.previews.len(), previews);
}

#[test]
fn test_escape_mid_drag_discards_everything() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("hero", "asset://hero", SourceSize::new(1000, 500), 300);
    let original = item.clone();
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    enter_crop_mode(&mut slot, &mut host);

    slot.handle(pointer_down(Handle::Side(Side::Left), 0.0, 75.0), &mut host);
    slot.handle(pointer_move(90.0, 75.0), &mut host);
    slot.handle(InputEvent::Escape, &mut host);

    assert_eq!(slot.mode(), Mode::Idle);
    assert!(!slot.is_dragging());
    assert!(host.commits.is_empty());
    assert_eq!(slot.committed(), &original);
    assert_eq!(slot.geometry(), &original.geometry());
    assert_eq!(host.modes, vec![Mode::Resizing, Mode::Cropping, Mode::Idle]);
}

#[test]
fn test_handles_follow_mode() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("hero", "asset://hero", SourceSize::new(1000, 500), 300);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    let rect = ScreenRect::new(10.0, 10.0, 300.0, 150.0);

    assert!(slot.visible_handles().is_empty());
    assert_eq!(slot.handle_at(&rect, Point::new(10.0, 10.0)), None);

    slot.handle(InputEvent::Click, &mut host);
    assert_eq!(slot.visible_handles(), HandleSet::CORNERS);
    assert_eq!(
        slot.handle_at(&rect, Point::new(12.0, 9.0)),
        Some(Handle::Corner(Corner::TopLeft))
    );

    slot.handle(InputEvent::DoubleClick, &mut host);
    assert_eq!(slot.visible_handles(), HandleSet::SIDES);
    assert_eq!(
        slot.handle_at(&rect, Point::new(160.0, 158.0)),
        Some(Handle::Side(Side::Bottom))
    );
}

#[test]
fn test_background_follows_tentative_crop() {
    let mut host = RecordingHost::default();
    let item = ImageItem::new("hero", "asset://hero", SourceSize::new(1000, 500), 500);
    let mut slot = ImageSlot::new(item, bounds(), &mut host).unwrap();
    enter_crop_mode(&mut slot, &mut host);

    slot.handle(pointer_down(Handle::Side(Side::Top), 250.0, 0.0), &mut host);
    slot.handle(pointer_move(250.0, 50.0), &mut host);

    let layout = slot.background();
    // scale 0.5, crop top at 100 source px
    assert_eq!(layout.offset_x, 0.0);
    assert_eq!(layout.offset_y, -50.0);
    assert_eq!(layout.width, 500.0);
    assert_eq!(layout.height, 250.0);
    assert_eq!(layout.viewport, DisplaySize::new(500, 200));
}

#[test]
fn test_slots_are_independent() {
    let mut host_a = RecordingHost::default();
    let mut host_b = RecordingHost::default();
    let item = ImageItem::new("partner", "asset://p", SourceSize::new(600, 300), 200);
    let mut a = ImageSlot::for_role(item.clone(), SlotRole::PartnerLogo, &mut host_a).unwrap();
    let b = ImageSlot::for_role(item, SlotRole::PartnerLogo, &mut host_b).unwrap();

    a.handle(InputEvent::Click, &mut host_a);
    a.handle(pointer_down(Handle::Corner(Corner::BottomRight), 0.0, 0.0), &mut host_a);
    a.handle(pointer_up(-100.0, 0.0), &mut host_a);

    assert_eq!(a.committed().display_width, 100);
    assert_eq!(b.committed().display_width, 200);
    assert_eq!(b.mode(), Mode::Idle);
    assert!(host_b.commits.is_empty());
}
