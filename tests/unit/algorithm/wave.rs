//! Tests for wave possibility sets and the entropy memo

#[cfg(test)]
mod tests {
    use wavetile::algorithm::wave::{Removal, Wave};
    use wavetile::spatial::direction::Topology;

    fn entropy_of(weights: &[f64]) -> f64 {
        let total: f64 = weights.iter().sum();
        -weights
            .iter()
            .map(|w| {
                let p = w / total;
                p * p.ln()
            })
            .sum::<f64>()
    }

    // Tests every cell starts with every variant possible
    // Verified by initializing possibility sets empty
    #[test]
    fn test_new_wave_is_fully_undecided() {
        let wave = Wave::new(Topology::new(2, 3, false), &[1.0, 2.0, 3.0]);
        assert_eq!(wave.pattern_count(), 3);
        for cell in 0..6 {
            assert_eq!(wave.remaining(cell), 3);
            assert!(wave.is_possible(cell, 2));
            assert_eq!(wave.decided(cell), None);
        }
        assert!(!wave.is_fully_decided());
    }

    // Tests initial entropy matches the Shannon entropy of the weights
    // Verified by dropping the ln(S) term from shannon_entropy
    #[test]
    fn test_initial_entropy() {
        let weights = [1.0, 2.0, 3.0];
        let wave = Wave::new(Topology::new(1, 1, false), &weights);
        assert!((wave.entropy(0) - entropy_of(&weights)).abs() < 1e-12);
    }

    // Tests entropy is updated incrementally on removal
    // Verified by skipping the weight-log-weight subtraction in remove
    #[test]
    fn test_entropy_after_removal() {
        let mut wave = Wave::new(Topology::new(1, 1, false), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(wave.remove(0, 3), Removal::Narrowed);
        assert!((wave.entropy(0) - entropy_of(&[1.0, 2.0, 3.0])).abs() < 1e-9);
        assert_eq!(wave.remaining(0), 3);
    }

    // Tests removal outcomes across the whole lifecycle of a cell
    // Verified by returning Narrowed when remaining reaches zero
    #[test]
    fn test_removal_outcomes() {
        let mut wave = Wave::new(Topology::new(1, 2, false), &[1.0, 1.0]);
        assert_eq!(wave.remove(0, 0), Removal::Narrowed);
        assert_eq!(wave.remove(0, 0), Removal::Unchanged);
        assert_eq!(wave.decided(0), Some(1));
        assert_eq!(wave.entropy(0), 0.0);
        assert_eq!(wave.remove(0, 1), Removal::Emptied);
        assert_eq!(wave.remaining(0), 0);
        assert_eq!(wave.decided(0), None);
        // The other cell is untouched
        assert_eq!(wave.remaining(1), 2);
    }

    // Tests full decision is detected only when every cell has one variant
    // Verified by checking remaining <= 1 instead of == 1
    #[test]
    fn test_is_fully_decided() {
        let mut wave = Wave::new(Topology::new(1, 2, true), &[1.0, 1.0]);
        wave.remove(0, 1);
        assert!(!wave.is_fully_decided());
        wave.remove(1, 0);
        assert!(wave.is_fully_decided());
        assert_eq!(wave.possibilities(1).unwrap().to_vec(), vec![1]);
    }
}
