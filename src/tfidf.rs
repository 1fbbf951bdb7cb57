//! TF-IDF vectorization.
//!
//! Converts a corpus of short texts into an L2-normalized term-weight
//! matrix. The vocabulary is learned from the corpus alone and sorted
//! alphabetically, so column `j` always names the same term for a given
//! corpus.
//!
//! # Weighting
//!
//! ```text
//! tf(t, d)  = count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) × idf(t), then each row scaled to unit L2 norm
//! ```
//!
//! Tokens are lowercased runs of alphanumeric or `_` characters at least
//! two characters long. No stemming or stopword removal is applied.

use anyhow::{bail, Result};
use ndarray::Array2;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Minimum token length in characters.
const MIN_TOKEN_CHARS: usize = 2;

/// TF-IDF weights, one row per input document.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Sorted distinct terms; column `j` corresponds to `vocabulary[j]`.
    pub vocabulary: Vec<String>,
    /// Smoothed inverse document frequency per term.
    pub idf: Vec<f32>,
    /// `n_docs × vocabulary.len()` weights.
    pub values: Array2<f32>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of `term`, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }
}

/// Split text into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|tok| tok.chars().count() >= MIN_TOKEN_CHARS)
        .map(|tok| tok.to_lowercase())
        .collect()
}

/// Fit a vocabulary on `docs` and return their TF-IDF matrix.
///
/// # Errors
///
/// Fails when no document yields a single token (empty vocabulary).
pub fn fit_transform(docs: &[String]) -> Result<FeatureMatrix> {
    let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d)).collect();

    let vocabulary: Vec<String> = tokenized
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if vocabulary.is_empty() {
        bail!("empty vocabulary; the documents contain no usable terms");
    }

    let index: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();

    let n_docs = docs.len();
    let n_terms = vocabulary.len();

    let counts: Vec<BTreeMap<usize, f32>> = tokenized
        .iter()
        .map(|tokens| {
            let mut row = BTreeMap::new();
            for tok in tokens {
                *row.entry(index[tok.as_str()]).or_insert(0.0) += 1.0;
            }
            row
        })
        .collect();

    let mut df = vec![0usize; n_terms];
    for row in &counts {
        for &term in row.keys() {
            df[term] += 1;
        }
    }

    let idf: Vec<f32> = df
        .iter()
        .map(|&d| ((1.0 + n_docs as f32) / (1.0 + d as f32)).ln() + 1.0)
        .collect();

    let mut values = Array2::<f32>::zeros((n_docs, n_terms));
    for (i, row) in counts.iter().enumerate() {
        for (&term, &tf) in row {
            values[[i, term]] = tf * idf[term];
        }
        let norm = values.row(i).dot(&values.row(i)).sqrt();
        if norm > f32::EPSILON {
            values.row_mut(i).mapv_inplace(|w| w / norm);
        }
    }

    Ok(FeatureMatrix {
        vocabulary,
        idf,
        values,
    })
}
