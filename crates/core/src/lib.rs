pub mod error;
pub mod extractor;
pub mod ingest;
pub mod models;
pub mod orchestrator;
pub mod scorer;
pub mod suggestions;
pub mod tokenizer;
pub mod vectorizer;

pub use error::{ExtractError, RankError};
pub use extractor::{extract_page_texts, LopdfExtractor, PageText, ResumeExtractor};
pub use ingest::{digest_bytes, discover_pdf_files, load_folder, load_uploads};
pub use models::{
    MatchBand, RankedResume, RankingOptions, RankingReport, ResumeText, SkippedResume,
    UploadedDocument,
};
pub use orchestrator::RankingOrchestrator;
pub use scorer::{cosine_similarity, rank_order, ResumeScore, ScoreConfig, SimilarityScorer};
pub use suggestions::SuggestionGenerator;
pub use tokenizer::{normalize_whitespace, Tokenizer, ENGLISH_STOP_WORDS};
pub use vectorizer::{TermMatrix, TfIdfVectorizer, DEFAULT_KEY_TERMS};
