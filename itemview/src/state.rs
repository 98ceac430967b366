use crate::Vec3;

/// A lightweight, serializable snapshot of the scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub layout_position: f32,
    pub scroll_speed: f32,
    pub overshoot: f32,
}

/// A combined snapshot of layout selection, layout size and scroll state.
///
/// This is useful for restoring a view across sessions without coupling the engine to any UI
/// framework. Layouts themselves are not captured; restore into a view holding the same layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub active_layout: Option<usize>,
    pub layout_size: Vec3,
    pub scroll: ScrollState,
}
