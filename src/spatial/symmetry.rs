//! Symmetry classes, orientations and the dihedral transforms of 2D content
//!
//! An [`Orientation`] describes content as `rotate^r(reflect^f(base))`, where
//! `rotate` is a counter-clockwise quarter turn and `reflect` a left-right
//! mirror. A [`Symmetry`] tag says which of the eight orientations of a tile
//! are distinct, and how the eight dihedral actions permute them.

use crate::io::error::WfcError;
use crate::spatial::direction::Direction;
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// Number of elements of the dihedral group of the square
pub const DIHEDRAL_ACTIONS: usize = 8;

/// Rotation and reflection applied to base content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation {
    /// Counter-clockwise quarter turns, in 0..4
    pub rotation: u8,
    /// Whether the base was mirrored left-right before rotating
    pub reflected: bool,
}

impl Orientation {
    /// The identity orientation
    pub const IDENTITY: Self = Self {
        rotation: 0,
        reflected: false,
    };

    /// Create an orientation, normalising the rotation into 0..4
    pub const fn new(rotation: u8, reflected: bool) -> Self {
        Self {
            rotation: rotation % 4,
            reflected,
        }
    }

    /// Orientation after an extra counter-clockwise quarter turn
    #[must_use]
    pub const fn then_rotate(self) -> Self {
        Self::new(self.rotation + 1, self.reflected)
    }

    /// Orientation after an extra left-right mirror
    ///
    /// Mirroring `R^r F^f` gives `R^-r F^(f+1)`.
    #[must_use]
    pub const fn then_reflect(self) -> Self {
        Self::new((4 - self.rotation) % 4, !self.reflected)
    }

    /// Apply this orientation to 2D content
    pub fn apply<T: Orientable>(self, content: &Array2<T>) -> Array2<T> {
        let mut result = if self.reflected {
            reflect(content)
        } else {
            content.clone()
        };
        for _ in 0..self.rotation {
            result = rotate(&result);
        }
        result
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", u32::from(self.rotation) * 90)?;
        if self.reflected {
            write!(f, " mirrored")?;
        }
        Ok(())
    }
}

/// Cell values that can follow their containing block through a transform
///
/// Colors and labels look the same however the block is turned, so the
/// default methods return the value unchanged. Values that carry their own
/// orientation (see [`OrientedTile`]) override them.
pub trait Orientable: Clone {
    /// Value as seen after the containing block turns a quarter counter-clockwise
    #[must_use]
    fn rotated(&self) -> Self {
        self.clone()
    }

    /// Value as seen after the containing block is mirrored left-right
    #[must_use]
    fn reflected(&self) -> Self {
        self.clone()
    }
}

macro_rules! orientation_invariant {
    ($($ty:ty),* $(,)?) => {
        $(impl Orientable for $ty {})*
    };
}

orientation_invariant!(u8, u16, u32, u64, usize, i32, i64, char, [u8; 3], [u8; 4]);

/// A reference to a tile together with the orientation it is drawn in
///
/// Sampling a map made of such cells keeps orientations consistent when
/// patterns are rotated or mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientedTile {
    /// Index of the tile in the caller's tile table
    pub tile: usize,
    /// Orientation the tile is drawn in
    pub orientation: Orientation,
}

impl Orientable for OrientedTile {
    fn rotated(&self) -> Self {
        Self {
            tile: self.tile,
            orientation: self.orientation.then_rotate(),
        }
    }

    fn reflected(&self) -> Self {
        Self {
            tile: self.tile,
            orientation: self.orientation.then_reflect(),
        }
    }
}

/// Rotate content a quarter turn counter-clockwise
///
/// A `rows x cols` input becomes `cols x rows`.
// Shape arithmetic keeps every index in bounds
#[allow(clippy::indexing_slicing)]
pub fn rotate<T: Orientable>(content: &Array2<T>) -> Array2<T> {
    let (rows, cols) = content.dim();
    Array2::from_shape_fn((cols, rows), |(row, col)| {
        content[(col, cols - 1 - row)].rotated()
    })
}

/// Mirror content left-right
#[allow(clippy::indexing_slicing)]
pub fn reflect<T: Orientable>(content: &Array2<T>) -> Array2<T> {
    let (rows, cols) = content.dim();
    Array2::from_shape_fn((rows, cols), |(row, col)| {
        content[(row, cols - 1 - col)].reflected()
    })
}

/// All eight dihedral images of `content`
///
/// Order: identity, mirror, then each further quarter turn followed by its
/// mirror. Sampling the first `k` of these gives the symmetry levels used in
/// overlapping mode.
pub fn dihedral_images<T: Orientable>(content: &Array2<T>) -> Vec<Array2<T>> {
    let mut images = Vec::with_capacity(DIHEDRAL_ACTIONS);
    let mut current = content.clone();
    for _ in 0..4 {
        let mirrored = reflect(&current);
        let next = rotate(&current);
        images.push(current);
        images.push(mirrored);
        current = next;
    }
    images
}

/// Symmetry class of a declared tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// Invariant under every rotation and reflection
    X,
    /// Straight line: two distinct orientations
    I,
    /// Mirror-symmetric across the main diagonal: four orientations
    Backslash,
    /// Mirror-symmetric across the vertical axis: four orientations
    T,
    /// Corner: four orientations
    L,
    /// No symmetry: all eight orientations
    F,
}

impl Symmetry {
    /// Number of distinct oriented variants for this class
    pub const fn variant_count(self) -> usize {
        match self {
            Self::X => 1,
            Self::I => 2,
            Self::Backslash | Self::T | Self::L => 4,
            Self::F => 8,
        }
    }

    /// The orientation producing variant `index` from the base content
    pub fn orientation(self, index: usize) -> Option<Orientation> {
        if index >= self.variant_count() {
            return None;
        }
        let rotation = (index % 4) as u8;
        Some(Orientation::new(rotation, index >= 4))
    }

    /// Variant reached from variant `index` by a counter-clockwise quarter turn
    fn rotation_map(self) -> &'static [usize] {
        match self {
            Self::X => &[0],
            Self::I => &[1, 0],
            Self::Backslash | Self::T | Self::L => &[1, 2, 3, 0],
            Self::F => &[1, 2, 3, 0, 5, 6, 7, 4],
        }
    }

    /// Variant reached from variant `index` by a left-right mirror
    fn reflection_map(self) -> &'static [usize] {
        match self {
            Self::X => &[0],
            Self::I => &[0, 1],
            Self::Backslash => &[3, 2, 1, 0],
            Self::T => &[0, 3, 2, 1],
            Self::L => &[1, 0, 3, 2],
            Self::F => &[4, 7, 6, 5, 0, 3, 2, 1],
        }
    }

    /// Permutation of variant indices under each of the eight actions
    ///
    /// Action `a` mirrors first when `a >= 4`, then turns `a % 4` quarter
    /// turns counter-clockwise.
    pub fn action_map(self) -> [Vec<usize>; DIHEDRAL_ACTIONS] {
        let rotation = self.rotation_map();
        let reflection = self.reflection_map();
        std::array::from_fn(|action| {
            (0..self.variant_count())
                .map(|variant| {
                    let mut current = variant;
                    if action >= 4 {
                        current = reflection.get(current).copied().unwrap_or(current);
                    }
                    for _ in 0..action % 4 {
                        current = rotation.get(current).copied().unwrap_or(current);
                    }
                    current
                })
                .collect()
        })
    }
}

/// Where a direction points after dihedral action `action`
pub const fn transform_direction(direction: Direction, action: usize) -> Direction {
    let mut current = if action >= 4 {
        direction.reflected()
    } else {
        direction
    };
    let mut turns = action % 4;
    while turns > 0 {
        current = current.rotated();
        turns -= 1;
    }
    current
}

impl FromStr for Symmetry {
    type Err = WfcError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "X" => Ok(Self::X),
            "I" => Ok(Self::I),
            "\\" => Ok(Self::Backslash),
            "T" => Ok(Self::T),
            "L" => Ok(Self::L),
            "F" | "P" => Ok(Self::F),
            _ => Err(WfcError::InvalidSymmetryTag {
                tag: tag.to_string(),
            }),
        }
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::X => "X",
            Self::I => "I",
            Self::Backslash => "\\",
            Self::T => "T",
            Self::L => "L",
            Self::F => "F",
        };
        f.write_str(tag)
    }
}
