// src/engine/style.rs
//
// Frame style and the explicit "same frame on every image" broadcast.
//
// Style sync is a host-level action across slots. It never reads or writes
// geometry, so it cannot break the crop/display invariant of any slot.

use crate::engine::geometry::ImageItem;
use serde::{Deserialize, Serialize};

/// Cosmetic frame drawn around an image
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub border_width: u32,
    #[serde(default)]
    pub corner_radius: u32,
    #[serde(default)]
    pub shadow: bool,
}

/// Copy `leader`'s frame onto every other item.
///
/// Leader wins: items whose frame differs get the leader's frame (including
/// "no frame"). Only changed items are returned, ready to hand to the host
/// as one transaction. Geometry and all other fields are untouched.
pub fn broadcast_frame_style(leader: &ImageItem, items: &[ImageItem]) -> Vec<ImageItem> {
    let updated: Vec<ImageItem> = items
        .iter()
        .filter(|item| item.id != leader.id && item.frame != leader.frame)
        .map(|item| ImageItem {
            frame: leader.frame.clone(),
            ..item.clone()
        })
        .collect();
    tracing::debug!(
        leader = %leader.id,
        changed = updated.len(),
        "frame style broadcast"
    );
    updated
}

/// Whether the items no longer share one frame style.
///
/// Hosts check this before re-enabling sync so the user can pick the leader.
pub fn frames_diverged(items: &[ImageItem]) -> bool {
    match items.split_first() {
        Some((first, rest)) => rest.iter().any(|item| item.frame != first.frame),
        None => false,
    }
}
