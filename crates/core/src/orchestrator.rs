use crate::error::{ExtractError, RankError};
use crate::extractor::{LopdfExtractor, ResumeExtractor};
use crate::ingest::digest_bytes;
use crate::models::{
    MatchBand, RankedResume, RankingOptions, RankingReport, ResumeText, SkippedResume,
    UploadedDocument,
};
use crate::scorer::{rank_order, SimilarityScorer};
use crate::suggestions::SuggestionGenerator;
use crate::vectorizer::TfIdfVectorizer;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Runs extraction, vectorization, scoring and suggestions for one request.
/// Holds no state between calls.
pub struct RankingOrchestrator<E = LopdfExtractor>
where
    E: ResumeExtractor,
{
    extractor: E,
    vectorizer: TfIdfVectorizer,
    scorer: SimilarityScorer,
    suggestions: SuggestionGenerator,
}

impl RankingOrchestrator<LopdfExtractor> {
    pub fn pdf(options: RankingOptions) -> Result<Self, RankError> {
        Self::new(LopdfExtractor, options)
    }
}

impl<E> RankingOrchestrator<E>
where
    E: ResumeExtractor,
{
    pub fn new(extractor: E, options: RankingOptions) -> Result<Self, RankError> {
        let scorer = SimilarityScorer::new(options.into())?;
        let vectorizer = TfIdfVectorizer::new()?;
        Ok(Self {
            extractor,
            suggestions: SuggestionGenerator::new(vectorizer.clone())
                .with_key_term_count(options.key_term_count),
            vectorizer,
            scorer,
        })
    }

    /// Extracts every upload, then ranks what could be read. Unparseable
    /// documents are reported in `skipped`; documents without a text layer
    /// rank as empty text.
    pub fn rank(
        &self,
        job_description: &str,
        documents: &[UploadedDocument],
    ) -> Result<RankingReport, RankError> {
        if documents.is_empty() {
            return Err(RankError::NoResumes);
        }

        let mut seen = HashSet::new();
        let mut resumes = Vec::with_capacity(documents.len());
        let mut skipped = Vec::new();

        for document in documents {
            if !seen.insert(document.identifier.as_str()) {
                warn!(identifier = %document.identifier, "duplicate resume identifier");
            }

            let text = match self.extractor.extract_text(&document.bytes) {
                Ok(text) => text,
                Err(ExtractError::EmptyDocument) => {
                    warn!(identifier = %document.identifier, "resume has no text layer, ranking as empty");
                    String::new()
                }
                Err(error) => {
                    warn!(identifier = %document.identifier, reason = %error, "skipped resume");
                    skipped.push(SkippedResume {
                        identifier: document.identifier.clone(),
                        reason: error.to_string(),
                    });
                    continue;
                }
            };

            resumes.push(ResumeText {
                identifier: document.identifier.clone(),
                text,
                checksum: digest_bytes(&document.bytes),
            });
        }

        let entries = self.rank_texts(job_description, &resumes)?;
        info!(
            ranked = entries.len(),
            skipped = skipped.len(),
            "ranking complete"
        );

        Ok(RankingReport { entries, skipped })
    }

    /// Ranks already-extracted résumés, best first.
    pub fn rank_texts(
        &self,
        job_description: &str,
        resumes: &[ResumeText],
    ) -> Result<Vec<RankedResume>, RankError> {
        if resumes.is_empty() {
            return Err(RankError::NoResumes);
        }
        if job_description.trim().is_empty() {
            return Err(RankError::EmptyJobDescription);
        }

        let corpus: Vec<&str> = std::iter::once(job_description)
            .chain(resumes.iter().map(|resume| resume.text.as_str()))
            .collect();
        let matrix = self.vectorizer.fit_transform(&corpus)?;
        let (job_vector, resume_vectors) = matrix.split_job().ok_or(RankError::EmptyCorpus(0))?;

        let scores = self.scorer.score(job_vector, resume_vectors);

        rank_order(&scores)
            .into_iter()
            .enumerate()
            .map(|(position, index)| -> Result<RankedResume, RankError> {
                let resume = &resumes[index];
                let score = scores[index];
                let display_score = score.display();
                debug!(
                    rank = position + 1,
                    identifier = %resume.identifier,
                    display_score,
                    "ranked resume"
                );

                Ok(RankedResume {
                    rank: position + 1,
                    identifier: resume.identifier.clone(),
                    checksum: resume.checksum.clone(),
                    similarity: score.similarity,
                    score: score.score,
                    display_score,
                    band: MatchBand::for_score(display_score),
                    suggestions: self.suggestions.suggest(
                        job_description,
                        &resume.text,
                        display_score,
                    )?,
                })
            })
            .collect()
    }

    pub fn key_terms(&self, job_description: &str, k: usize) -> Result<Vec<String>, RankError> {
        self.vectorizer.key_terms(job_description, k)
    }
}
