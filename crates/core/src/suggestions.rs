use crate::error::RankError;
use crate::models::MatchBand;
use crate::vectorizer::{TfIdfVectorizer, DEFAULT_KEY_TERMS};

#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    vectorizer: TfIdfVectorizer,
    key_term_count: usize,
}

impl SuggestionGenerator {
    pub fn new(vectorizer: TfIdfVectorizer) -> Self {
        Self {
            vectorizer,
            key_term_count: DEFAULT_KEY_TERMS,
        }
    }

    pub fn with_key_term_count(mut self, key_term_count: usize) -> Self {
        self.key_term_count = key_term_count;
        self
    }

    /// Fixed recommendations for the band `score` falls in.
    ///
    /// `_resume_text` is accepted but not read: output depends only on the
    /// job description's key terms and the score.
    pub fn suggest(
        &self,
        job_description: &str,
        _resume_text: &str,
        score: u32,
    ) -> Result<Vec<String>, RankError> {
        let key_terms = self
            .vectorizer
            .key_terms(job_description, self.key_term_count)?
            .join(", ");

        let suggestions: Vec<String> = match MatchBand::for_score(score) {
            MatchBand::ImprovementsNeeded => vec![
                "Your resume needs some improvements to better match this job description."
                    .to_string(),
                format!(
                    "Consider adding these key terms that appear in the job description: {key_terms}."
                ),
                "Restructure your resume to highlight relevant experience and skills.".to_string(),
                "Add specific achievements with quantifiable results.".to_string(),
                "Include relevant certifications or training programs.".to_string(),
                "Tailor your professional summary to match the job requirements.".to_string(),
            ],
            MatchBand::MinorImprovements => vec![
                "Your resume is a good match but could be improved.".to_string(),
                format!(
                    "Consider emphasizing these key terms from the job description: {key_terms}."
                ),
                "Quantify your achievements with specific metrics where possible.".to_string(),
                "Ensure your most relevant experience is prominently featured.".to_string(),
                "Consider adding more industry-specific keywords.".to_string(),
            ],
            MatchBand::ExcellentMatch => vec![
                "Your resume is an excellent match for this position!".to_string(),
                "Consider fine-tuning your resume by highlighting your most impressive achievements."
                    .to_string(),
                "Prepare to discuss your experience in relation to the specific requirements in the job description."
                    .to_string(),
            ],
        };

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Python developer with SQL experience";

    fn generator() -> Result<SuggestionGenerator, RankError> {
        Ok(SuggestionGenerator::new(TfIdfVectorizer::new()?))
    }

    #[test]
    fn band_sizes_at_boundaries() -> Result<(), Box<dyn std::error::Error>> {
        let generator = generator()?;
        for (score, expected) in [(70, 6), (79, 6), (80, 5), (89, 5), (90, 3), (98, 3)] {
            assert_eq!(generator.suggest(JOB, "", score)?.len(), expected, "score {score}");
        }
        Ok(())
    }

    #[test]
    fn low_band_lists_key_terms() -> Result<(), Box<dyn std::error::Error>> {
        let suggestions = generator()?.suggest(JOB, "", 75)?;
        assert_eq!(
            suggestions[1],
            "Consider adding these key terms that appear in the job description: developer, experience, python, sql."
        );
        Ok(())
    }

    #[test]
    fn resume_text_does_not_change_output() -> Result<(), Box<dyn std::error::Error>> {
        let generator = generator()?;
        assert_eq!(
            generator.suggest(JOB, "Expert Python and SQL developer", 85)?,
            generator.suggest(JOB, "Graphic designer", 85)?
        );
        Ok(())
    }

    #[test]
    fn key_term_count_is_configurable() -> Result<(), Box<dyn std::error::Error>> {
        let suggestions = generator()?.with_key_term_count(1).suggest(JOB, "", 85)?;
        assert_eq!(
            suggestions[1],
            "Consider emphasizing these key terms from the job description: developer."
        );
        Ok(())
    }

    #[test]
    fn stop_word_job_description_fails() -> Result<(), Box<dyn std::error::Error>> {
        let result = generator()?.suggest("the and of", "", 95);
        assert!(matches!(result, Err(RankError::EmptyVocabulary)));
        Ok(())
    }
}
