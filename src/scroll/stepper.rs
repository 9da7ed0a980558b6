use crate::scroll::mapper::ContainerGeometry;

/// Scroll distance, in pixels, that advances a stepped carousel by one entry.
pub const DEFAULT_STEP_PX: f64 = 150.0;

/// Index of the entry to show for a small container stepping through `count` entries.
///
/// The first entry shows while the container's center sits below the viewport's center; every
/// further `step_px` of scrolling advances one entry, saturating at the last.
pub fn stepped_index(
    container_top_in_viewport: f64,
    container_height: f64,
    viewport_height: f64,
    count: usize,
    step_px: f64,
) -> usize {
    if count == 0 || step_px.is_nan() || step_px <= 0.0 {
        return 0;
    }
    let container_center = container_top_in_viewport + container_height / 2.0;
    let distance = viewport_height / 2.0 - container_center;
    let raw = ((distance + step_px) / step_px).floor();
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    (raw as usize).min(count - 1)
}

/// [`stepped_index`] for a container in document coordinates at document scroll `scroll_y`.
pub fn stepped_index_at(
    scroll_y: f64,
    container: ContainerGeometry,
    viewport_height: f64,
    count: usize,
) -> usize {
    stepped_index(
        container.top - scroll_y,
        container.height,
        viewport_height,
        count,
        DEFAULT_STEP_PX,
    )
}
