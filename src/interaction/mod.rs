//! Shared selection behaviors for overlay toggle groups.

use crate::surface::{NodeId, Surface};

/// Class marking the active member of a toggle group.
pub const SELECTED_CLASS: &str = "selected";
/// Class marking a visually de-emphasized item.
pub const DIMMED_CLASS: &str = "dimmed";

/// Marks the item carrying `marker_class` as selected and every other item
/// in the group as deselected.
///
/// With no matching item the whole group ends up deselected. Re-applying the
/// same marker is idempotent; re-selection is not treated as "off".
pub fn exclusive_toggle<S: Surface>(surface: &mut S, items: &[NodeId], marker_class: &str) {
    for &item in items {
        let selected = surface.has_class(item, marker_class);
        surface.set_classed(item, SELECTED_CLASS, selected);
    }
}
