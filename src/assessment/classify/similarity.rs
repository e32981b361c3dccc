use crate::assessment::domain::SignalVector;

/// Cosine similarity over sparse signal vectors.
///
/// A zero-magnitude vector on either side compares as `0.0`, keeping the
/// ordering total instead of producing `NaN`.
pub fn cosine_similarity(a: &SignalVector, b: &SignalVector) -> f64 {
    let dot = a.dot(b);
    let norm_a = a.l2_norm();
    let norm_b = b.l2_norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let vector = SignalVector::from_pairs(&[("courage", 3.0), ("resolve", 1.5)]);
        let similarity = cosine_similarity(&vector, &vector);
        assert!((similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_vector_scores_zero_not_nan() {
        let vector = SignalVector::from_pairs(&[("courage", 3.0)]);
        let zero = SignalVector::new();
        assert_eq!(cosine_similarity(&vector, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn disjoint_vectors_score_zero() {
        let a = SignalVector::from_pairs(&[("courage", 2.0)]);
        let b = SignalVector::from_pairs(&[("empathy", 2.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }
}
