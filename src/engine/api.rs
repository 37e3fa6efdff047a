// src/engine/api.rs
//
// ImageSlot: the one engine instance behind an image slot.
// Logo, header photo, partner logos and canvases all use this type; only the
// SlotBounds they are built with differ.
//
// The slot owns its mode, the active drag session, the tentative geometry
// and the last committed ImageItem. It holds no shared state, so hosts create
// one per slot. All output goes through the SlotHost passed to each call.

use crate::engine::commit::{commit_crop, commit_resize, CommitOutcome};
use crate::engine::constraints::SlotBounds;
use crate::engine::geometry::{background_layout, BackgroundLayout, Geometry, ImageItem, Point};
use crate::engine::mode::{transition, Action, Mode, Trigger};
use crate::engine::overlay::{hit_test, HandleSet, ScreenRect, DEFAULT_HIT_TOLERANCE};
use crate::engine::session::{DragKind, DragSession};
use crate::engine::transform::display_for_crop;
use crate::error::{Result, SlotError};
use crate::ops::{Handle, InputEvent, SlotRole};

/// Callbacks into the host UI
pub trait SlotHost {
    /// Tentative geometry to render now. Called on every effective pointer
    /// move and whenever the tentative geometry is reset.
    fn preview(&mut self, geometry: &Geometry);

    /// Replacement item to persist. Called once per completed gesture or mode
    /// exit that changed geometry.
    fn commit(&mut self, item: ImageItem);

    /// Mode changed (hosts dim the image while cropping)
    fn mode_changed(&mut self, _mode: Mode) {}
}

/// Interactive crop/resize engine for one image slot
#[derive(Debug, Clone)]
pub struct ImageSlot {
    committed: ImageItem,
    bounds: SlotBounds,
    mode: Mode,
    /// What is on screen: committed geometry, or the in-progress candidate
    tentative: Geometry,
    /// Geometry at crop-mode entry (Some only while cropping)
    crop_anchor: Option<Geometry>,
    session: Option<DragSession>,
}

impl ImageSlot {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Create a slot for `item`.
    ///
    /// The item's source dimensions must already be probed. An item that is
    /// inconsistent (degenerate crop, stale height, width outside bounds) is
    /// repaired and the repaired item is committed to the host right away.
    pub fn new(item: ImageItem, bounds: SlotBounds, host: &mut impl SlotHost) -> Result<Self> {
        bounds.validate()?;
        let committed = Self::accept_item(item, &bounds, host)?;
        let tentative = committed.geometry();
        tracing::debug!(id = %committed.id, "image slot created");
        Ok(Self {
            committed,
            bounds,
            mode: Mode::Idle,
            tentative,
            crop_anchor: None,
            session: None,
        })
    }

    /// Create a slot with a role's bounds preset
    pub fn for_role(item: ImageItem, role: SlotRole, host: &mut impl SlotHost) -> Result<Self> {
        Self::new(item, role.bounds(), host)
    }

    fn accept_item(item: ImageItem, bounds: &SlotBounds, host: &mut impl SlotHost) -> Result<ImageItem> {
        let source = item.source();
        if !source.is_known() {
            return Err(SlotError::source_dimensions_unknown(
                source.width,
                source.height,
            ));
        }
        match bounds.conform_item(&item) {
            Some(repaired) => {
                tracing::warn!(
                    id = %item.id,
                    crop = ?item.crop,
                    display_width = item.display_width,
                    display_height = item.display_height,
                    "repaired inconsistent image geometry"
                );
                host.commit(repaired.clone());
                Ok(repaired)
            }
            None => Ok(item),
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Last committed item (the host's canonical copy)
    pub fn committed(&self) -> &ImageItem {
        &self.committed
    }

    /// Geometry to render right now
    pub fn geometry(&self) -> &Geometry {
        &self.tentative
    }

    pub fn bounds(&self) -> &SlotBounds {
        &self.bounds
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// How to paint the full source so that only the current crop shows
    pub fn background(&self) -> BackgroundLayout {
        background_layout(
            self.committed.source(),
            &self.tentative.crop,
            self.tentative.display.width,
        )
    }

    pub fn visible_handles(&self) -> HandleSet {
        HandleSet::for_mode(self.mode)
    }

    /// Handle under `pointer`, given the container's current bounding box
    pub fn handle_at(&self, container: &ScreenRect, pointer: Point) -> Option<Handle> {
        hit_test(self.mode, container, pointer, DEFAULT_HIT_TOLERANCE)
    }

    /// Verify the geometry invariants; used by tests and fuzzing
    pub fn check_invariants(&self) -> Result<()> {
        let source = self.committed.source();
        if !self.tentative.crop.is_finite() {
            return Err(SlotError::non_finite_geometry("tentative crop"));
        }
        if !self.tentative.crop.is_contained_in(source) {
            return Err(SlotError::invariant_violated(format!(
                "crop {:?} outside source {}x{}",
                self.tentative.crop, source.width, source.height
            )));
        }
        if !self.tentative.is_proportional() {
            return Err(SlotError::invariant_violated(format!(
                "display {:?} does not follow crop ratio",
                self.tentative.display
            )));
        }
        if !self.committed.is_consistent() {
            return Err(SlotError::invariant_violated("committed item inconsistent"));
        }
        let width = self.tentative.display.width;
        if self.bounds.clamp_display_width(f64::from(width)) != width {
            return Err(SlotError::invariant_violated(format!(
                "display width {} outside {}..={}",
                width, self.bounds.min_width, self.bounds.max_width
            )));
        }
        if self.mode != Mode::Cropping && self.tentative.crop != self.committed.crop {
            return Err(SlotError::invariant_violated(
                "uncommitted crop outside crop mode",
            ));
        }
        Ok(())
    }

    // =========================================================================
    // HOST UPDATES
    // =========================================================================

    /// Replace the bounds (e.g. the container was resized).
    ///
    /// The committed width is clamped into the new bounds and committed if it
    /// changed. The box on screen is re-fitted right away; an active gesture
    /// continues under the new bounds. In crop mode with no gesture active,
    /// the crop-mode anchor is rebased onto the re-clamped committed geometry.
    pub fn set_bounds(&mut self, bounds: SlotBounds, host: &mut impl SlotHost) -> Result<()> {
        bounds.validate()?;
        self.bounds = bounds;
        if let Some(conformed) = bounds.conform_item(&self.committed) {
            self.committed = conformed.clone();
            host.commit(conformed);
        }
        match self.mode {
            Mode::Cropping => {
                if self.session.is_none() {
                    self.crop_anchor = Some(self.committed.geometry());
                }
                let anchor = self.crop_anchor.unwrap_or_else(|| self.committed.geometry());
                let crop = self.tentative.crop;
                self.show(
                    Geometry {
                        crop,
                        display: display_for_crop(&anchor, &crop, &bounds),
                    },
                    host,
                );
            }
            _ if self.session.is_some() => {
                let width = bounds.clamp_display_width(f64::from(self.tentative.display.width));
                self.show(Geometry::new(self.tentative.crop, width), host);
            }
            _ => self.reset_tentative(host),
        }
        Ok(())
    }

    /// Narrow the maximum display width to a container width
    pub fn set_container_width(&mut self, container_width: u32, host: &mut impl SlotHost) -> Result<()> {
        if container_width == 0 {
            return Err(SlotError::invalid_argument(
                "container_width",
                "0",
                "container must be at least 1 unit wide",
            ));
        }
        let bounds = self.bounds.with_container_width(container_width);
        self.set_bounds(bounds, host)
    }

    /// Take a new canonical item from the host (undo/redo, remote update).
    ///
    /// Any gesture in progress is dropped. Crop mode, if active, restarts from
    /// the new item.
    pub fn replace_item(&mut self, item: ImageItem, host: &mut impl SlotHost) -> Result<()> {
        let committed = Self::accept_item(item, &self.bounds, host)?;
        if self.session.take().is_some() {
            tracing::debug!(id = %committed.id, "drag session dropped by item replacement");
        }
        self.committed = committed;
        self.reset_tentative(host);
        if self.mode == Mode::Cropping {
            self.crop_anchor = Some(self.tentative);
        }
        Ok(())
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Route one input event
    pub fn handle(&mut self, event: InputEvent, host: &mut impl SlotHost) {
        match event {
            InputEvent::PointerDown { handle, position } => self.begin_drag(handle, position),
            InputEvent::PointerMove { position } => self.drag_to(position, host),
            InputEvent::PointerUp { position } => {
                self.drag_to(position, host);
                self.end_drag(host);
            }
            InputEvent::PointerLeave | InputEvent::PointerCancel => self.end_drag(host),
            InputEvent::Click
            | InputEvent::DoubleClick
            | InputEvent::ExternalClick
            | InputEvent::Escape
            | InputEvent::Confirm => {
                if let Some(trigger) = Trigger::from_event(&event) {
                    self.apply_trigger(trigger, host);
                }
            }
        }
    }

    fn begin_drag(&mut self, handle: Handle, position: Point) {
        if self.session.is_some() {
            tracing::trace!(?handle, "pointer down ignored, gesture already active");
            return;
        }
        if !position.is_finite() {
            tracing::debug!(?handle, "pointer down ignored, non-finite position");
            return;
        }
        let session = match (self.mode, handle) {
            (Mode::Resizing, Handle::Corner(corner)) => {
                DragSession::begin_resize(corner, position, self.tentative)
            }
            (Mode::Cropping, Handle::Side(side)) => {
                let anchor = self.crop_anchor.unwrap_or(self.tentative);
                DragSession::begin_crop(side, position, self.tentative, anchor)
            }
            (mode, handle) => {
                tracing::trace!(?mode, ?handle, "pointer down ignored, handle not active in mode");
                return;
            }
        };
        tracing::debug!(id = %self.committed.id, kind = ?session.kind(), "drag session started");
        self.session = Some(session);
    }

    fn drag_to(&mut self, position: Point, host: &mut impl SlotHost) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(geometry) = session.update(position, self.committed.source(), &self.bounds) {
            self.tentative = geometry;
            host.preview(&geometry);
        }
    }

    fn end_drag(&mut self, host: &mut impl SlotHost) {
        let Some(session) = self.session.take() else {
            return;
        };
        let kind = session.kind();
        let geometry = session.finish();
        match kind {
            DragKind::Resize(_) => {
                if let CommitOutcome::Replaced(item) = commit_resize(&self.committed, &geometry) {
                    self.committed = item.clone();
                    host.commit(item);
                }
                self.reset_tentative(host);
            }
            // crop stays tentative until crop mode is left
            DragKind::Crop(_) => self.tentative = geometry,
        }
    }

    fn apply_trigger(&mut self, trigger: Trigger, host: &mut impl SlotHost) {
        // a mode trigger ends any gesture still in flight
        if self.session.is_some() {
            if trigger == Trigger::Escape && self.mode == Mode::Cropping {
                self.session = None;
            } else {
                self.end_drag(host);
            }
        }

        let step = transition(self.mode, trigger);
        match step.action {
            Action::Stay => return,
            Action::Select => self.reset_tentative(host),
            Action::EnterCrop => self.crop_anchor = Some(self.tentative),
            Action::LeaveCrop | Action::CommitCrop => self.commit_crop_mode(host),
            Action::Deselect => {}
            Action::DiscardCrop => {
                self.crop_anchor = None;
                self.reset_tentative(host);
            }
        }
        self.mode = step.to;
        tracing::debug!(
            id = %self.committed.id,
            from = ?step.from,
            to = ?step.to,
            action = ?step.action,
            "mode transition"
        );
        if step.changes_mode() {
            host.mode_changed(step.to);
        }
    }

    fn commit_crop_mode(&mut self, host: &mut impl SlotHost) {
        let anchor = self
            .crop_anchor
            .take()
            .unwrap_or_else(|| self.committed.geometry());
        let outcome = commit_crop(&self.committed, &anchor, &self.tentative.crop, &self.bounds);
        if let CommitOutcome::Replaced(item) = outcome {
            self.committed = item.clone();
            host.commit(item);
        }
        self.reset_tentative(host);
    }

    /// Show the committed geometry again, previewing only if it differs
    fn reset_tentative(&mut self, host: &mut impl SlotHost) {
        self.show(self.committed.geometry(), host);
    }

    fn show(&mut self, geometry: Geometry, host: &mut impl SlotHost) {
        if geometry != self.tentative {
            self.tentative = geometry;
            host.preview(&geometry);
        }
    }
}
