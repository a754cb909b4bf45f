//! Tests for tile registration, deduplication and variant expansion

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use wavetile::WfcError;
    use wavetile::spatial::symmetry::{Orientation, Symmetry, rotate};
    use wavetile::spatial::tiles::{Tile, TileRegistry};

    fn tile(name: &str, content: Array2<u8>, tag: &str) -> Tile<u8> {
        Tile::with_tag(name, content, tag, 1.0).unwrap()
    }

    // Tests each symmetry tag expands to its variant count
    // Verified by always expanding eight variants
    #[test]
    fn test_variant_expansion() {
        let registry = TileRegistry::from_tiles([
            tile("x", array![[0, 0], [0, 0]], "X"),
            tile("i", array![[0, 1], [0, 1]], "I"),
            tile("l", array![[1, 1], [0, 1]], "L"),
            tile("f", array![[1, 2], [3, 4]], "F"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.variants().len(), 1 + 2 + 4 + 8);
        assert_eq!(registry.variants_of(0), &[0]);
        assert_eq!(registry.variants_of(1), &[1, 2]);
        assert_eq!(registry.variants_of(3).len(), 8);
        assert_eq!(registry.variant_id(2, 3), Some(6));
        assert_eq!(registry.variant_id(0, 1), None);
    }

    // Tests variants record their base tile and orientation
    // Verified by storing the orientation index as the rotation
    #[test]
    fn test_variant_records() {
        let registry =
            TileRegistry::from_tiles([tile("f", array![[1, 2], [3, 4]], "F")]).unwrap();
        let variant = registry.variants()[5];
        assert_eq!(variant.tile, 0);
        assert_eq!(variant.orientation_index, 5);
        assert_eq!(variant.orientation, Orientation::new(1, true));

        let turned = registry.variant_content(1).unwrap();
        assert_eq!(turned, rotate(&array![[1, 2], [3, 4]]));
        assert_eq!(registry.variant_content(8), None);
    }

    // Tests duplicate content becomes an alias with accumulated weight
    // Verified by registering duplicates as new tiles
    #[test]
    fn test_duplicate_content_is_aliased() {
        let mut registry = TileRegistry::new();
        let first = registry
            .register(Tile::new("grass", array![[1]], Symmetry::X, 2.0))
            .unwrap();
        let second = registry
            .register(Tile::new("meadow", array![[1]], Symmetry::X, 3.0))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.id_of("meadow").unwrap(), first);
        assert_eq!(registry.tile(first).unwrap().weight, 5.0);
        assert_eq!(registry.variant_weights(), vec![5.0]);
    }

    // Tests registration rejects malformed tiles
    // Verified by skipping the square-content check
    #[test]
    fn test_register_rejects_invalid_tiles() {
        let mut registry = TileRegistry::new();
        assert!(matches!(
            registry.register(Tile::new("bad", array![[1, 2]], Symmetry::X, 1.0)),
            Err(WfcError::InvalidSourceData { .. })
        ));
        assert!(matches!(
            registry.register(Tile::new("light", array![[1]], Symmetry::X, 0.0)),
            Err(WfcError::InvalidParameter {
                parameter: "weight",
                ..
            })
        ));

        registry
            .register(Tile::new("one", array![[1]], Symmetry::X, 1.0))
            .unwrap();
        assert!(
            registry
                .register(Tile::new("big", array![[1, 1], [1, 1]], Symmetry::X, 1.0))
                .is_err()
        );
        assert!(
            registry
                .register(Tile::new("one", array![[2]], Symmetry::X, 1.0))
                .is_err()
        );
        assert_eq!(registry.tile_size(), Some(1));
    }

    // Tests unknown names and tags produce their dedicated errors
    // Verified by returning tile 0 for unknown names
    #[test]
    fn test_unknown_references() {
        let registry = TileRegistry::from_tiles([tile("a", array![[0]], "X")]).unwrap();
        assert!(matches!(
            registry.id_of("b"),
            Err(WfcError::UnknownTileReference { name }) if name == "b"
        ));
        assert!(matches!(
            Tile::with_tag("c", array![[0u8]], "Z", 1.0),
            Err(WfcError::InvalidSymmetryTag { .. })
        ));
    }

    // Tests an empty registry reports no size
    // Verified by defaulting tile_size to 1
    #[test]
    fn test_empty_registry() {
        let registry: TileRegistry<u8> = TileRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.tile_size(), None);
        assert!(registry.variants_of(0).is_empty());
    }
}
