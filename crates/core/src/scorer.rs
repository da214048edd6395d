use crate::error::RankError;
use crate::models::RankingOptions;
use rand::RngCore;
use rand_mt::Mt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreConfig {
    pub seed: u32,
    pub floor: f64,
    pub span: f64,
    pub jitter_max: f64,
    pub ceiling: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self::from(RankingOptions::default())
    }
}

impl From<RankingOptions> for ScoreConfig {
    fn from(value: RankingOptions) -> Self {
        Self {
            seed: value.seed,
            floor: value.score_floor,
            span: value.score_span,
            jitter_max: value.jitter_max,
            ceiling: value.score_ceiling,
        }
    }
}

impl ScoreConfig {
    /// Rejects bands that would make the clamp panic or the offset negative.
    pub fn validate(&self) -> Result<(), RankError> {
        let bounds = [
            ("floor", self.floor),
            ("span", self.span),
            ("jitter_max", self.jitter_max),
            ("ceiling", self.ceiling),
        ];
        if let Some((name, value)) = bounds.iter().find(|(_, value)| !value.is_finite()) {
            return Err(RankError::InvalidArgument(format!(
                "score {name} must be finite, got {value}"
            )));
        }
        if self.floor > self.ceiling {
            return Err(RankError::InvalidArgument(format!(
                "score floor {} exceeds ceiling {}",
                self.floor, self.ceiling
            )));
        }
        if self.jitter_max < 0.0 {
            return Err(RankError::InvalidArgument(format!(
                "jitter_max must not be negative, got {}",
                self.jitter_max
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResumeScore {
    pub similarity: f64,
    pub score: f64,
}

impl ResumeScore {
    /// Integer percentage, truncated toward zero.
    pub fn display(&self) -> u32 {
        self.score.trunc() as u32
    }
}

/// Cosine of the angle between `left` and `right`; 0 when either has no magnitude.
pub fn cosine_similarity(left: &[f64], right: &[f64]) -> f64 {
    debug_assert_eq!(left.len(), right.len());

    let mut dot = 0.0;
    let mut left_norm = 0.0;
    let mut right_norm = 0.0;
    for (a, b) in left.iter().zip(right) {
        dot += a * b;
        left_norm += a * a;
        right_norm += b * b;
    }

    if left_norm == 0.0 || right_norm == 0.0 {
        return 0.0;
    }

    (dot / (left_norm * right_norm).sqrt()).clamp(-1.0, 1.0)
}

/// Uniform draws in `[0, 1)` with 53-bit resolution, two 32-bit words per draw.
pub fn next_unit<R: RngCore>(rng: &mut R) -> f64 {
    let high = (rng.next_u32() >> 5) as f64;
    let low = (rng.next_u32() >> 6) as f64;
    (high * 67_108_864.0 + low) / 9_007_199_254_740_992.0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    config: ScoreConfig,
}

impl SimilarityScorer {
    pub fn new(config: ScoreConfig) -> Result<Self, RankError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> ScoreConfig {
        self.config
    }

    /// Scores résumé rows against the job row, in input order.
    ///
    /// The offset stream is reseeded on every call, so the N-th résumé
    /// always receives the N-th draw whatever the similarities are.
    pub fn score(&self, job: &[f64], resumes: &[Vec<f64>]) -> Vec<ResumeScore> {
        let mut rng = Mt::new(self.config.seed);

        resumes
            .iter()
            .enumerate()
            .map(|(position, resume)| {
                let similarity = cosine_similarity(job, resume);
                let offset = self.config.jitter_max * next_unit(&mut rng);
                let score = self.map_similarity(similarity, offset);
                debug!(position, similarity, offset, score, "scored resume");
                ResumeScore { similarity, score }
            })
            .collect()
    }

    pub fn map_similarity(&self, similarity: f64, offset: f64) -> f64 {
        let base = self.config.floor + similarity * self.config.span;
        (base + offset).clamp(self.config.floor, self.config.ceiling)
    }
}

/// Positions of `scores` ordered by score descending; equal scores keep input order.
pub fn rank_order(scores: &[ResumeScore]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|left, right| scores[*right].score.total_cmp(&scores[*left].score));
    order
}
