//! Tests for entropy and weighted sampling helpers

#[cfg(test)]
mod tests {
    use tilecollapse::math::probability::{
        cumulative_distribution, sample_cumulative, weighted_entropy,
    };

    const EPSILON: f64 = 1e-10;

    // Tests the heuristic matches -sum w log2 w on raw weights
    // Verified by normalising the weights first
    #[test]
    fn test_weighted_entropy_values() {
        assert!(weighted_entropy([1.0]).abs() < EPSILON);
        assert!((weighted_entropy([0.5, 0.5]) - 1.0).abs() < EPSILON);
        assert!((weighted_entropy([0.25; 4]) - 2.0).abs() < EPSILON);
        assert!((weighted_entropy([2.0]) + 2.0).abs() < EPSILON);
    }

    // Tests non-positive weights are ignored
    // Verified by letting zero weights produce NaN
    #[test]
    fn test_weighted_entropy_skips_non_positive() {
        assert!((weighted_entropy([0.5, 0.0, -1.0, 0.5]) - 1.0).abs() < EPSILON);
        assert!(weighted_entropy(std::iter::empty::<f64>()).abs() < EPSILON);
    }

    // Tests rarer option sets score lower
    // Verified by inverting the sign of the sum
    #[test]
    fn test_weighted_entropy_orders_by_mass() {
        let common = weighted_entropy([0.4, 0.4]);
        let rare = weighted_entropy([0.1, 0.1]);
        assert!(rare < common);
    }

    // Tests the cumulative distribution is normalised and monotone
    // Verified by skipping normalisation
    #[test]
    fn test_cumulative_distribution() {
        let cumulative = cumulative_distribution(&[1.0, 3.0, 0.0, 4.0]);
        let expected = [0.125, 0.5, 0.5, 1.0];
        assert_eq!(cumulative.len(), expected.len());
        for (got, want) in cumulative.iter().zip(expected) {
            assert!((got - want).abs() < EPSILON);
        }

        assert!(cumulative_distribution(&[]).is_empty());
        assert!(cumulative_distribution(&[0.0, -2.0]).is_empty());
    }

    // Tests sampling picks the first entry above the draw
    // Verified by using >= in the comparison
    #[test]
    fn test_sample_cumulative() {
        let cumulative = [0.25, 0.5, 1.0];
        assert_eq!(sample_cumulative(&cumulative, 0.0), Some(0));
        assert_eq!(sample_cumulative(&cumulative, 0.25), Some(1));
        assert_eq!(sample_cumulative(&cumulative, 0.7), Some(2));
        assert_eq!(sample_cumulative(&[], 0.3), None);
    }

    // Tests rounding below 1.0 still yields the last index
    // Verified by returning None when no entry exceeds the draw
    #[test]
    fn test_sample_cumulative_rounding_fallback() {
        let cumulative = [0.3, 0.999_999_999];
        assert_eq!(sample_cumulative(&cumulative, 0.999_999_999_5), Some(1));
    }

    // Tests a zero-weight entry is never sampled
    // Verified by sampling zero-weight entries on ties
    #[test]
    fn test_zero_weight_never_sampled() {
        let cumulative = cumulative_distribution(&[1.0, 0.0, 1.0]);
        for step in 0..100 {
            let draw = f64::from(step) / 100.0;
            assert_ne!(sample_cumulative(&cumulative, draw), Some(1));
        }
    }
}
