use crate::document::{Document, ScoredDocument};

/// Cosine of the angle between two vectors in f64. The epsilon in the
/// denominator keeps an all-zero vector from dividing by zero (the score is
/// then ~0 rather than NaN).
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|y| y * y).sum::<f64>().sqrt();
    dot / (norm_a * norm_b + 1e-12)
}

/// Scores each candidate against the query embedding and orders them by
/// score descending. The sort is stable, so ties keep their fetch order.
pub fn rank(query: &[f64], candidates: Vec<(Document, Vec<f64>)>) -> Vec<ScoredDocument> {
    let mut scored: Vec<ScoredDocument> = candidates
        .into_iter()
        .map(|(document, embedding)| ScoredDocument {
            score: cosine_similarity(query, &embedding),
            document,
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}

/// Ranks and keeps the best `k` candidates.
pub fn top_k(query: &[f64], candidates: Vec<(Document, Vec<f64>)>, k: usize) -> Vec<ScoredDocument> {
    let mut ranked = rank(query, candidates);
    ranked.truncate(k);
    ranked
}
