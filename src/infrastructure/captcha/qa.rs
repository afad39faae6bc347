//! Question/answer CAPTCHA provider

use async_trait::async_trait;

use crate::domain::captcha::{CaptchaError, CaptchaProvider};

/// Forum-configured question with a list of accepted answers.
///
/// Answers are compared after trimming and lowercasing, so "Blue", " blue "
/// and "BLUE" are all accepted when "blue" is configured.
#[derive(Debug, Clone)]
pub struct QaCaptcha {
    question: String,
    answers: Vec<String>,
}

impl QaCaptcha {
    pub fn new(question: impl Into<String>, answers: impl IntoIterator<Item = String>) -> Self {
        Self {
            question: question.into(),
            answers: answers
                .into_iter()
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// The question shown on the registration form
    pub fn question(&self) -> &str {
        &self.question
    }
}

#[async_trait]
impl CaptchaProvider for QaCaptcha {
    async fn verify(
        &self,
        solution: Option<&str>,
        _client_ip: Option<&str>,
    ) -> Result<(), CaptchaError> {
        let solution = match solution {
            Some(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
            _ => {
                return Err(CaptchaError::Rejected(
                    "Please answer the test question.".to_string(),
                ))
            }
        };

        if self.answers.iter().any(|answer| *answer == solution) {
            Ok(())
        } else {
            Err(CaptchaError::Rejected(
                "Entered answer is incorrect.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captcha() -> QaCaptcha {
        QaCaptcha::new(
            "What color is the sky?",
            vec!["Blue".to_string(), "light blue".to_string()],
        )
    }

    #[tokio::test]
    async fn test_correct_answer() {
        assert!(captcha().verify(Some("blue"), None).await.is_ok());
    }

    #[tokio::test]
    async fn test_answer_is_case_and_whitespace_insensitive() {
        assert!(captcha().verify(Some("  BLUE "), None).await.is_ok());
        assert!(captcha().verify(Some("Light Blue"), None).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_answer() {
        let result = captcha().verify(Some("green"), None).await;

        assert_eq!(
            result,
            Err(CaptchaError::Rejected(
                "Entered answer is incorrect.".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_missing_answer() {
        let result = captcha().verify(None, None).await;

        assert_eq!(
            result,
            Err(CaptchaError::Rejected(
                "Please answer the test question.".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_blank_answer() {
        let result = captcha().verify(Some("   "), None).await;

        assert!(result.is_err());
    }
}
