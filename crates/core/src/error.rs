use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("document has no text layer")]
    EmptyDocument,
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error("no resumes to rank")]
    NoResumes,

    #[error("job description is empty")]
    EmptyJobDescription,

    #[error("corpus needs a job description and at least one resume, got {0} text(s)")]
    EmptyCorpus(usize),

    #[error("empty vocabulary: text contains only stop words")]
    EmptyVocabulary,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

pub type Result<T, E = RankError> = std::result::Result<T, E>;
