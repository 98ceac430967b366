use core::ops::Range;

/// Identifier of an item in the conceptual item sequence.
pub type ItemId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the vector with `x` and `y` exchanged.
    pub const fn swap_xy(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            z: self.z,
        }
    }
}

/// The direction in which a layout places increasing item ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlOrientation {
    #[default]
    Up,
    Left,
    Down,
    Right,
}

impl ControlOrientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }
}

/// A half-open interval `[begin, end)` of item ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRange {
    pub begin: ItemId,
    pub end: ItemId, // exclusive
}

impl ItemRange {
    pub const EMPTY: Self = Self { begin: 0, end: 0 };

    /// Creates a range.
    ///
    /// `begin > end` is a precondition violation: it asserts in debug builds and yields an empty
    /// range in release builds.
    pub fn new(begin: ItemId, end: ItemId) -> Self {
        debug_assert!(begin <= end, "malformed ItemRange: {begin} > {end}");
        if begin > end {
            iwarn!(begin, end, "malformed ItemRange, clamping to empty");
            return Self::EMPTY;
        }
        Self { begin, end }
    }

    /// Returns `[0, count)`.
    pub fn up_to(count: u32) -> Self {
        Self {
            begin: 0,
            end: count,
        }
    }

    pub fn within(&self, id: ItemId) -> bool {
        id >= self.begin && id < self.end
    }

    /// Returns the overlap of two ranges, or `[0, 0)` when they are disjoint.
    pub fn intersection(&self, other: &ItemRange) -> ItemRange {
        let begin = self.begin.max(other.begin);
        let end = self.end.min(other.end);
        if begin >= end {
            Self::EMPTY
        } else {
            Self { begin, end }
        }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    pub fn ids(&self) -> Range<ItemId> {
        self.begin..self.end.max(self.begin)
    }

    /// Widens the range by `amount` ids on both sides, saturating at `0` and `u32::MAX`.
    pub fn expand(&self, amount: u32) -> ItemRange {
        Self {
            begin: self.begin.saturating_sub(amount),
            end: self.end.saturating_add(amount),
        }
    }
}

/// Euler rotation in radians: `roll` about z, `pitch` about x, `yaw` about y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Rotation {
    pub const IDENTITY: Self = Self {
        roll: 0.0,
        pitch: 0.0,
        yaw: 0.0,
    };

    pub const fn roll(roll: f32) -> Self {
        Self {
            roll,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

/// Everything a renderer needs to place one resident item for a frame.
///
/// Positions are relative to the center of the layout area.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTransform {
    pub position: Vec3,
    pub size: Vec3,
    pub rotation: Rotation,
    /// RGB multiplier; `1.0` leaves the item unshaded.
    pub brightness: f32,
    pub opacity: f32,
    pub visible: bool,
}

impl ItemTransform {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            size,
            rotation: Rotation::IDENTITY,
            brightness: 1.0,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// Ordering hint for filling a range: `Forward` instantiates ascending ids first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FocusDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Notifications emitted synchronously by the view and its controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemViewEvent {
    ScrollStarted(Vec2),
    ScrollUpdated(Vec2),
    ScrollCompleted(Vec2),
    LayoutActivated,
}

/// The result of one range diff applied to the item pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolDiff {
    pub released: u32,
    pub created: u32,
    /// Ids inside the range for which the factory had no content.
    pub skipped: u32,
}
