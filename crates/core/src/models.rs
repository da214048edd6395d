use serde::{Deserialize, Serialize};

/// Raw upload handed over by the presentation layer.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub identifier: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            identifier: identifier.into(),
            bytes: bytes.into(),
        }
    }
}

/// A résumé after text extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeText {
    pub identifier: String,
    pub text: String,
    pub checksum: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MatchBand {
    ImprovementsNeeded,
    MinorImprovements,
    ExcellentMatch,
}

impl MatchBand {
    pub fn for_score(score: u32) -> Self {
        if score < 80 {
            MatchBand::ImprovementsNeeded
        } else if score < 90 {
            MatchBand::MinorImprovements
        } else {
            MatchBand::ExcellentMatch
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            MatchBand::ImprovementsNeeded => "Improvements Recommended",
            MatchBand::MinorImprovements => "Minor Improvements Suggested",
            MatchBand::ExcellentMatch => "Excellent Match",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResume {
    /// 1-based position in the sorted result.
    pub rank: usize,
    pub identifier: String,
    pub checksum: String,
    pub similarity: f64,
    pub score: f64,
    pub display_score: u32,
    pub band: MatchBand,
    pub suggestions: Vec<String>,
}

impl RankedResume {
    pub fn score_label(&self) -> String {
        format!("{}%", self.display_score)
    }

    pub fn bulleted(&self) -> Vec<String> {
        self.suggestions
            .iter()
            .map(|suggestion| format!("• {suggestion}"))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedResume {
    pub identifier: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub entries: Vec<RankedResume>,
    pub skipped: Vec<SkippedResume>,
}

#[derive(Debug, Clone, Copy)]
pub struct RankingOptions {
    pub seed: u32,
    pub score_floor: f64,
    pub score_span: f64,
    pub jitter_max: f64,
    pub score_ceiling: f64,
    pub key_term_count: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            score_floor: 70.0,
            score_span: 28.0,
            jitter_max: 7.0,
            score_ceiling: 98.0,
            key_term_count: 10,
        }
    }
}
