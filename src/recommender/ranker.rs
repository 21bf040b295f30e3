use std::collections::BTreeMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use crate::catalog::LearningResource;
use crate::recommender::stopwords::is_stop_word;

lazy_static! {
    // Tokens of two or more word characters
    static ref TOKEN: Regex = Regex::new(r"\b\w\w+\b").expect("token pattern is valid");
}

/// A candidate and its relevance to the query, in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    pub resource: LearningResource,
    pub score: f64,
}

/// Lower-case, split into word tokens and drop stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Sparse TF-IDF weights over a vocabulary, L2-normalised.
struct TfIdf {
    idf: BTreeMap<String, f64>,
}

impl TfIdf {
    /// Smoothed IDF: ln((1 + n) / (1 + df)) + 1
    fn fit(docs: &[Vec<String>]) -> Self {
        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let mut seen: Vec<&String> = doc.iter().collect();
            seen.sort();
            seen.dedup();
            for term in seen {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let n = docs.len() as f64;
        let idf = df
            .into_iter()
            .map(|(term, count)| {
                let weight = ((1.0 + n) / (1.0 + count as f64)).ln() + 1.0;
                (term, weight)
            })
            .collect();
        TfIdf { idf }
    }

    fn vocabulary_is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    fn transform(&self, doc: &[String]) -> BTreeMap<String, f64> {
        let mut tf: BTreeMap<String, f64> = BTreeMap::new();
        for term in doc {
            *tf.entry(term.clone()).or_insert(0.0) += 1.0;
        }

        let mut weights: BTreeMap<String, f64> = tf
            .into_iter()
            .filter_map(|(term, count)| {
                self.idf.get(&term).map(|idf| (term, count * idf))
            })
            .collect();

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in weights.values_mut() {
                *w /= norm;
            }
        }
        weights
    }
}

fn cosine(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();
    if dot.is_finite() {
        dot.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Rank candidates against `query` by TF-IDF cosine similarity.
///
/// The vocabulary is fitted on every candidate plus the query. Equal scores keep
/// catalog order. With no usable tokens at all, every candidate scores zero and
/// keeps its catalog position.
pub fn rank(query: &str, candidates: &[LearningResource]) -> Vec<Ranked> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut docs: Vec<Vec<String>> = candidates
        .iter()
        .map(|r| tokenize(&r.search_text()))
        .collect();
    docs.push(tokenize(query));

    let model = TfIdf::fit(&docs);
    if model.vocabulary_is_empty() {
        tracing::debug!(candidates = candidates.len(), "Empty vocabulary, returning unscored ranking");
        return candidates
            .iter()
            .map(|r| Ranked { resource: r.clone(), score: 0.0 })
            .collect();
    }

    let query_vec = model.transform(&docs[docs.len() - 1]);
    let mut ranked: Vec<Ranked> = candidates
        .iter()
        .zip(docs.iter())
        .map(|(resource, doc)| Ranked {
            resource: resource.clone(),
            score: cosine(&query_vec, &model.transform(doc)),
        })
        .collect();

    // sort_by is stable, so ties stay in catalog order
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed_catalog, Level, ResourceType};

    fn titled(id: &str, title: &str) -> LearningResource {
        LearningResource {
            id: id.to_string(),
            title: title.to_string(),
            topic: String::new(),
            level: Level::Beginner,
            kind: ResourceType::Article,
            duration_min: 30,
            tags: vec![],
            url: String::new(),
        }
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        assert_eq!(
            tokenize("Intro to Machine Learning (KNN/Linear) a"),
            vec!["intro", "machine", "learning", "knn", "linear"]
        );
        assert_eq!(tokenize("single-cell"), vec!["single", "cell"]);
    }

    #[test]
    fn test_python_query_prefers_python_basics() {
        let ranked = rank("python syntax. level: beginner", &seed_catalog());
        assert_eq!(ranked[0].resource.id, "py-basic-1");
        let ml = ranked.iter().find(|r| r.resource.id == "ml-basic-1").unwrap();
        assert!(ranked[0].score > ml.score);
    }

    #[test]
    fn test_scores_are_bounded_and_descending() {
        let ranked = rank("bioinformatics genes for beginners", &seed_catalog());
        assert_eq!(ranked[0].resource.id, "bioinfo-basic-1");
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(ranked.iter().all(|r| (0.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let candidates = vec![titled("first", "gardening"), titled("second", "cooking"), titled("third", "knitting")];
        let ranked = rank("astronomy", &candidates);
        let ids: Vec<_> = ranked.iter().map(|r| r.resource.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        assert!(ranked.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_query_without_usable_tokens_scores_zero() {
        let candidates = vec![titled("x", ""), titled("y", "a")];
        let ranked = rank("the", &candidates);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].resource.id, "x");
        assert_eq!(ranked[0].score, 0.0);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(rank("python", &[]).is_empty());
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let a = rank("scanpy umap python", &seed_catalog());
        let b = rank("scanpy umap python", &seed_catalog());
        assert_eq!(a, b);
    }
}
