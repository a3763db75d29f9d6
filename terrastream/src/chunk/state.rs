//! Chunk lifecycle state machine.

/// Border of a chunk that the stitcher fixes against a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Northern border: this chunk's last row against the first row of the
    /// tile at `(x, y - 1)`.
    X,
    /// Eastern border: this chunk's last column against the first column of
    /// the tile at `(x + 1, y)`.
    Y,
}

/// Which borders of a generated chunk have been stitched.
///
/// Transitions only add flags; there is no way back to an unfixed border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderState {
    #[default]
    UnfixedBoth,
    XFixed,
    YFixed,
    BothFixed,
}

impl BorderState {
    pub fn is_fixed(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (BorderState::XFixed | BorderState::BothFixed, Direction::X)
                | (BorderState::YFixed | BorderState::BothFixed, Direction::Y)
        )
    }

    /// State after fixing `direction`, or `None` when it is already fixed.
    pub fn fix(self, direction: Direction) -> Option<BorderState> {
        if self.is_fixed(direction) {
            return None;
        }
        Some(match (self, direction) {
            (BorderState::UnfixedBoth, Direction::X) => BorderState::XFixed,
            (BorderState::UnfixedBoth, Direction::Y) => BorderState::YFixed,
            _ => BorderState::BothFixed,
        })
    }
}

/// Lifecycle of a chunk.
///
/// `Loading → Loaded → Generated(border)`. Being generated implies being
/// loaded, and border flags only exist once generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChunkState {
    /// Jobs still running.
    #[default]
    Loading,
    /// All jobs delivered; heights not yet handed to the surface.
    Loaded,
    /// Heights handed to the surface; borders may be stitched.
    Generated(BorderState),
}

impl ChunkState {
    pub fn is_loaded(self) -> bool {
        !matches!(self, ChunkState::Loading)
    }

    pub fn is_generated(self) -> bool {
        matches!(self, ChunkState::Generated(_))
    }

    /// Border flags, present only once generated.
    pub fn border(self) -> Option<BorderState> {
        match self {
            ChunkState::Generated(border) => Some(border),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChunkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkState::Loading => write!(f, "loading"),
            ChunkState::Loaded => write!(f, "loaded"),
            ChunkState::Generated(BorderState::UnfixedBoth) => write!(f, "generated"),
            ChunkState::Generated(BorderState::XFixed) => write!(f, "generated (x fixed)"),
            ChunkState::Generated(BorderState::YFixed) => write!(f, "generated (y fixed)"),
            ChunkState::Generated(BorderState::BothFixed) => write!(f, "generated (both fixed)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_sequence_reaches_both_fixed() {
        let x_first = BorderState::UnfixedBoth
            .fix(Direction::X)
            .and_then(|s| s.fix(Direction::Y));
        let y_first = BorderState::UnfixedBoth
            .fix(Direction::Y)
            .and_then(|s| s.fix(Direction::X));

        assert_eq!(x_first, Some(BorderState::BothFixed));
        assert_eq!(y_first, Some(BorderState::BothFixed));
    }

    #[test]
    fn test_fix_is_at_most_once() {
        assert_eq!(BorderState::XFixed.fix(Direction::X), None);
        assert_eq!(BorderState::YFixed.fix(Direction::Y), None);
        assert_eq!(BorderState::BothFixed.fix(Direction::X), None);
        assert_eq!(BorderState::BothFixed.fix(Direction::Y), None);
    }

    #[test]
    fn test_is_fixed() {
        assert!(!BorderState::UnfixedBoth.is_fixed(Direction::X));
        assert!(BorderState::XFixed.is_fixed(Direction::X));
        assert!(!BorderState::XFixed.is_fixed(Direction::Y));
        assert!(BorderState::BothFixed.is_fixed(Direction::Y));
    }

    #[test]
    fn test_generated_implies_loaded() {
        for border in [
            BorderState::UnfixedBoth,
            BorderState::XFixed,
            BorderState::YFixed,
            BorderState::BothFixed,
        ] {
            let state = ChunkState::Generated(border);
            assert!(state.is_loaded());
            assert!(state.is_generated());
            assert_eq!(state.border(), Some(border));
        }
        assert!(!ChunkState::Loading.is_loaded());
        assert!(ChunkState::Loaded.is_loaded());
        assert_eq!(ChunkState::Loaded.border(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ChunkState::Loading.to_string(), "loading");
        assert_eq!(
            ChunkState::Generated(BorderState::YFixed).to_string(),
            "generated (y fixed)"
        );
    }
}
