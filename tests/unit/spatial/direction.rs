//! Tests for directions and periodic or clamped neighbor lookup

#[cfg(test)]
mod tests {
    use wavetile::spatial::direction::{Direction, Topology};

    // Tests opposite directions have complementary indices
    // Verified by swapping Left and Right in opposite
    #[test]
    fn test_opposite_index() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().index(), 3 - direction.index());
            assert_eq!(direction.opposite().opposite(), direction);
        }
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    // Tests four quarter turns return to the start and mirrors fix the vertical axis
    // Verified by mapping Right to Down in rotated
    #[test]
    fn test_rotation_and_reflection() {
        assert_eq!(Direction::Right.rotated(), Direction::Up);
        assert_eq!(Direction::Up.rotated(), Direction::Left);
        for direction in Direction::ALL {
            let turned = direction.rotated().rotated().rotated().rotated();
            assert_eq!(turned, direction);
            assert_eq!(direction.reflected().reflected(), direction);
        }
        assert_eq!(Direction::Up.reflected(), Direction::Up);
        assert_eq!(Direction::Left.reflected(), Direction::Right);
    }

    // Tests clamped lookups stop at the border
    // Verified by wrapping regardless of the periodic flag
    #[test]
    fn test_clamped_neighbors() {
        let topology = Topology::new(2, 3, false);
        assert_eq!(topology.neighbor(0, Direction::Up), None);
        assert_eq!(topology.neighbor(0, Direction::Left), None);
        assert_eq!(topology.neighbor(0, Direction::Right), Some(1));
        assert_eq!(topology.neighbor(0, Direction::Down), Some(3));
        assert_eq!(topology.neighbor(5, Direction::Right), None);
        assert_eq!(topology.neighbor(5, Direction::Down), None);
    }

    // Tests periodic lookups wrap around both axes
    // Verified by using plain modulo on a negative offset
    #[test]
    fn test_periodic_neighbors() {
        let topology = Topology::new(2, 3, true);
        assert_eq!(topology.neighbor(0, Direction::Up), Some(3));
        assert_eq!(topology.neighbor(0, Direction::Left), Some(2));
        assert_eq!(topology.neighbor(5, Direction::Right), Some(3));
        assert_eq!(topology.neighbor(5, Direction::Down), Some(2));
    }

    // Tests flat indices and positions round-trip
    // Verified by swapping row and column in position_of
    #[test]
    fn test_index_position() {
        let topology = Topology::new(4, 7, false);
        assert_eq!(topology.cell_count(), 28);
        assert_eq!(topology.index_of(2, 5), 19);
        assert_eq!(topology.position_of(19), [2, 5]);
    }

    // Tests an empty grid has no neighbors
    // Verified by removing the zero-size guard
    #[test]
    fn test_empty_topology() {
        let topology = Topology::new(0, 0, true);
        assert_eq!(topology.cell_count(), 0);
        assert_eq!(topology.neighbor(0, Direction::Down), None);
    }
}
