use crate::error::RankError;
use crate::tokenizer::Tokenizer;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub const DEFAULT_KEY_TERMS: usize = 10;

/// One weighted row per input text over a shared, alphabetically ordered vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatrix {
    pub vocabulary: Vec<String>,
    pub vectors: Vec<Vec<f64>>,
}

impl TermMatrix {
    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    /// Splits off the job-description row from the résumé rows.
    pub fn split_job(&self) -> Option<(&[f64], &[Vec<f64>])> {
        self.vectors
            .split_first()
            .map(|(job, resumes)| (job.as_slice(), resumes))
    }
}

/// TF-IDF with raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`
/// and L2-normalized rows.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    tokenizer: Tokenizer,
}

impl TfIdfVectorizer {
    pub fn new() -> Result<Self, RankError> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
        })
    }

    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Vectorizes `[job description, résumé 1, .., résumé N]` in one shared term space.
    pub fn fit_transform(&self, texts: &[&str]) -> Result<TermMatrix, RankError> {
        if texts.len() < 2 {
            return Err(RankError::EmptyCorpus(texts.len()));
        }

        let counts: Vec<HashMap<String, usize>> = texts
            .iter()
            .map(|text| self.term_counts(text))
            .collect();

        let mut document_frequency = BTreeMap::<&str, usize>::new();
        for document in &counts {
            for term in document.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let vocabulary: Vec<String> = document_frequency.keys().map(|term| term.to_string()).collect();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(position, term)| (term.as_str(), position))
            .collect();

        let total = texts.len() as f64;
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|df| ((1.0 + total) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .iter()
            .map(|document| {
                let mut row = vec![0.0; vocabulary.len()];
                for (term, count) in document {
                    if let Some(&position) = index.get(term.as_str()) {
                        row[position] = *count as f64 * idf[position];
                    }
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        debug!(
            documents = texts.len(),
            vocabulary = vocabulary.len(),
            "built tf-idf matrix"
        );

        Ok(TermMatrix { vocabulary, vectors })
    }

    /// Top `k` terms of a single text vectorized on its own, heaviest first.
    /// Equal weights are ordered alphabetically.
    pub fn key_terms(&self, text: &str, k: usize) -> Result<Vec<String>, RankError> {
        let counts = self.term_counts(text);
        if counts.is_empty() {
            return Err(RankError::EmptyVocabulary);
        }

        // With a single document the idf is the same for every term, so the
        // weight order is the count order.
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

        Ok(ranked.into_iter().take(k).map(|(term, _)| term).collect())
    }

    fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for token in self.tokenizer.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }
}

fn l2_normalize(row: &mut [f64]) {
    let magnitude = row.iter().map(|value| value * value).sum::<f64>().sqrt();
    if magnitude > 0.0 {
        for value in row.iter_mut() {
            *value /= magnitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_needs_a_resume() -> Result<(), Box<dyn std::error::Error>> {
        let vectorizer = TfIdfVectorizer::new()?;
        assert!(matches!(
            vectorizer.fit_transform(&["Python developer"]),
            Err(RankError::EmptyCorpus(1))
        ));
        assert!(matches!(
            vectorizer.fit_transform(&[]),
            Err(RankError::EmptyCorpus(0))
        ));
        Ok(())
    }

    #[test]
    fn vectors_share_one_vocabulary() -> Result<(), Box<dyn std::error::Error>> {
        let vectorizer = TfIdfVectorizer::new()?;
        let matrix = vectorizer.fit_transform(&[
            "Python developer with SQL experience",
            "Expert Python and SQL developer",
            "Graphic designer with Photoshop skills",
        ])?;

        assert_eq!(matrix.vectors.len(), 3);
        assert!(matrix.vectors.iter().all(|row| row.len() == matrix.dimensions()));
        let mut sorted = matrix.vocabulary.clone();
        sorted.sort();
        assert_eq!(sorted, matrix.vocabulary);
        assert!(!matrix.vocabulary.iter().any(|term| term == "with"));
        Ok(())
    }

    #[test]
    fn empty_text_gets_zero_vector() -> Result<(), Box<dyn std::error::Error>> {
        let vectorizer = TfIdfVectorizer::new()?;
        let matrix = vectorizer.fit_transform(&["Rust engineer", "", "the and of"])?;
        assert!(matrix.vectors[1].iter().all(|value| *value == 0.0));
        assert!(matrix.vectors[2].iter().all(|value| *value == 0.0));
        Ok(())
    }

    #[test]
    fn identical_texts_get_identical_vectors() -> Result<(), Box<dyn std::error::Error>> {
        let vectorizer = TfIdfVectorizer::new()?;
        let job = "Senior Rust engineer, async networking, tokio";
        let matrix = vectorizer.fit_transform(&[job, job])?;
        let (job_vector, resumes) = matrix.split_job().ok_or("missing job row")?;
        assert_eq!(job_vector, resumes[0].as_slice());
        Ok(())
    }

    #[test]
    fn rare_terms_outweigh_shared_terms() -> Result<(), Box<dyn std::error::Error>> {
        let vectorizer = TfIdfVectorizer::new()?;
        let matrix = vectorizer.fit_transform(&["python kafka", "python", "python"])?;
        let python = matrix.vocabulary.iter().position(|term| term == "python").ok_or("python")?;
        let kafka = matrix.vocabulary.iter().position(|term| term == "kafka").ok_or("kafka")?;
        assert!(matrix.vectors[0][kafka] > matrix.vectors[0][python]);
        Ok(())
    }

    #[test]
    fn key_terms_rank_by_weight_then_name() -> Result<(), Box<dyn std::error::Error>> {
        let vectorizer = TfIdfVectorizer::new()?;
        let terms = vectorizer.key_terms("sql python sql docker python sql aws", 3)?;
        assert_eq!(terms, vec!["sql", "python", "aws"]);
        Ok(())
    }

    #[test]
    fn key_terms_cap_at_k() -> Result<(), Box<dyn std::error::Error>> {
        let vectorizer = TfIdfVectorizer::new()?;
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        let terms = vectorizer.key_terms(text, DEFAULT_KEY_TERMS)?;
        assert_eq!(terms.len(), DEFAULT_KEY_TERMS);
        Ok(())
    }

    #[test]
    fn key_terms_of_stop_words_fail() -> Result<(), Box<dyn std::error::Error>> {
        let vectorizer = TfIdfVectorizer::new()?;
        assert!(matches!(
            vectorizer.key_terms("the and of a", DEFAULT_KEY_TERMS),
            Err(RankError::EmptyVocabulary)
        ));
        Ok(())
    }
}
