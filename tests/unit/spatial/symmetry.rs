//! Tests for symmetry classes, orientations and dihedral transforms

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use std::collections::HashSet;
    use wavetile::WfcError;
    use wavetile::spatial::direction::Direction;
    use wavetile::spatial::symmetry::{
        DIHEDRAL_ACTIONS, Orientable, Orientation, OrientedTile, Symmetry, dihedral_images,
        reflect, rotate, transform_direction,
    };

    const ALL: [Symmetry; 6] = [
        Symmetry::X,
        Symmetry::I,
        Symmetry::Backslash,
        Symmetry::T,
        Symmetry::L,
        Symmetry::F,
    ];

    // Tests the variant count of every symmetry tag
    // Verified by returning 2 for the backslash class
    #[test]
    fn test_variant_counts() {
        let counts: Vec<usize> = ALL.iter().map(|s| s.variant_count()).collect();
        assert_eq!(counts, vec![1, 2, 4, 4, 4, 8]);
    }

    // Tests tag parsing including the P alias and rejection of unknown tags
    // Verified by mapping unknown tags to F
    #[test]
    fn test_parse_tags() {
        for symmetry in ALL {
            assert_eq!(symmetry.to_string().parse::<Symmetry>().unwrap(), symmetry);
        }
        assert_eq!("P".parse::<Symmetry>().unwrap(), Symmetry::F);
        assert_eq!("\\".parse::<Symmetry>().unwrap(), Symmetry::Backslash);
        assert!(matches!(
            "Q".parse::<Symmetry>(),
            Err(WfcError::InvalidSymmetryTag { tag }) if tag == "Q"
        ));
    }

    // Tests rotation turns content a quarter counter-clockwise
    // Verified by reading rows instead of columns in rotate
    #[test]
    fn test_rotate_counter_clockwise() {
        let content = array![[1, 2], [3, 4]];
        assert_eq!(rotate(&content), array![[2, 4], [1, 3]]);

        let wide = array![[1, 2, 3]];
        assert_eq!(rotate(&wide), array![[3], [2], [1]]);
    }

    // Tests reflection mirrors left-right
    // Verified by mirroring top-bottom instead
    #[test]
    fn test_reflect_left_right() {
        let content = array![[1, 2], [3, 4]];
        assert_eq!(reflect(&content), array![[2, 1], [4, 3]]);
    }

    // Tests the eight dihedral images of asymmetric content are distinct
    // Verified by pushing the unreflected image twice
    #[test]
    fn test_dihedral_images() {
        let content = array![[1, 2], [3, 4]];
        let images = dihedral_images(&content);
        assert_eq!(images.len(), DIHEDRAL_ACTIONS);
        assert_eq!(images[0], content);
        assert_eq!(images[1], reflect(&content));
        assert_eq!(images[2], rotate(&content));
        let distinct: HashSet<Array2<i32>> = images.into_iter().collect();
        assert_eq!(distinct.len(), 8);
    }

    // Tests orientation algebra matches applying transforms to content
    // Verified by keeping the rotation unchanged in then_reflect
    #[test]
    fn test_orientation_algebra() {
        let content = array![[1, 2, 3], [4, 5, 6], [7, 8, 9]];
        for index in 0..8 {
            let orientation = Symmetry::F.orientation(index).unwrap();
            let oriented = orientation.apply(&content);
            assert_eq!(orientation.then_rotate().apply(&content), rotate(&oriented));
            assert_eq!(orientation.then_reflect().apply(&content), reflect(&oriented));
        }
        assert_eq!(Orientation::new(5, false), Orientation::new(1, false));
        assert_eq!(Orientation::IDENTITY.to_string(), "0°");
        assert_eq!(Orientation::new(3, true).to_string(), "270° mirrored");
    }

    // Tests rotation and reflection maps agree with the variant contents
    // Verified by swapping two entries of the L reflection map
    #[test]
    fn test_action_maps_follow_content() {
        // Base contents with exactly the symmetry their class promises
        let bases: [(Symmetry, Array2<u8>); 6] = [
            (Symmetry::X, array![[1, 1, 1], [1, 0, 1], [1, 1, 1]]),
            (Symmetry::I, array![[0, 1, 0], [0, 1, 0], [0, 1, 0]]),
            (Symmetry::Backslash, array![[1, 0, 0], [0, 1, 0], [0, 0, 2]]),
            (Symmetry::T, array![[0, 0, 0], [1, 1, 1], [0, 1, 0]]),
            (Symmetry::L, array![[0, 1, 0], [0, 1, 1], [0, 0, 0]]),
            (Symmetry::F, array![[1, 1, 0], [0, 1, 1], [0, 1, 0]]),
        ];

        for (symmetry, base) in bases {
            let variants: Vec<Array2<u8>> = (0..symmetry.variant_count())
                .map(|i| symmetry.orientation(i).unwrap().apply(&base))
                .collect();
            let distinct: HashSet<&Array2<u8>> = variants.iter().collect();
            assert_eq!(distinct.len(), variants.len(), "{symmetry} variants repeat");

            let maps = symmetry.action_map();
            for action in 0..DIHEDRAL_ACTIONS {
                for (index, variant) in variants.iter().enumerate() {
                    let mut expected = variant.clone();
                    if action >= 4 {
                        expected = reflect(&expected);
                    }
                    for _ in 0..action % 4 {
                        expected = rotate(&expected);
                    }
                    assert_eq!(
                        variants[maps[action][index]],
                        expected,
                        "{symmetry} action {action} variant {index}"
                    );
                }
            }
        }
    }

    // Tests direction transforms compose reflection before rotation
    // Verified by rotating before reflecting in transform_direction
    #[test]
    fn test_transform_direction() {
        assert_eq!(transform_direction(Direction::Right, 0), Direction::Right);
        assert_eq!(transform_direction(Direction::Right, 1), Direction::Up);
        assert_eq!(transform_direction(Direction::Right, 2), Direction::Left);
        assert_eq!(transform_direction(Direction::Right, 3), Direction::Down);
        assert_eq!(transform_direction(Direction::Right, 4), Direction::Left);
        assert_eq!(transform_direction(Direction::Right, 5), Direction::Down);
        assert_eq!(transform_direction(Direction::Up, 5), Direction::Left);
    }

    // Tests oriented tiles turn along with the block that contains them
    // Verified by leaving the orientation untouched in OrientedTile::rotated
    #[test]
    fn test_oriented_tile_cells() {
        let cell = OrientedTile {
            tile: 3,
            orientation: Orientation::IDENTITY,
        };
        assert_eq!(cell.rotated().orientation, Orientation::new(1, false));
        assert_eq!(cell.rotated().reflected().orientation, Orientation::new(3, true));
        assert_eq!(cell.rotated().tile, 3);

        let block = array![[cell, cell]];
        let turned = rotate(&block);
        assert_eq!(turned.dim(), (2, 1));
        assert!(turned.iter().all(|c| c.orientation.rotation == 1));
        assert_eq!(7u32.rotated(), 7);
    }
}
