use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A per-job assessment form. Keyed by `job_id`: one assessment per job,
/// upsert-only lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    pub job_id: String,
    pub title: String,
    pub sections: Vec<Section>,
}

/// An ordered group of questions within an assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

/// A single form question. Type-specific payload lives in [`QuestionKind`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The six question shapes, tagged by `type` on the wire
/// (`"single-choice"`, `"numeric"`, ...).
///
/// Every consumer must match exhaustively; adding a variant forces all
/// render/validate sites to handle it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice { options: Vec<String> },
    MultiChoice { options: Vec<String> },
    ShortText { max_length: u32 },
    LongText { max_length: u32 },
    Numeric { min: f64, max: f64 },
    FileUpload,
}

impl Assessment {
    /// Check structural validity of the whole form.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: empty titles or prompts,
    /// choice questions without options or with duplicates, inverted numeric
    /// bounds, or zero-length text limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        for section in &self.sections {
            if section.title.trim().is_empty() {
                return Err(ValidationError::EmptyField { field: "section title" });
            }
            for question in &section.questions {
                question.validate()?;
            }
        }
        Ok(())
    }
}

impl Question {
    /// Validate one question's shape-specific constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first defect.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "prompt" });
        }
        match &self.kind {
            QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
                if options.is_empty() {
                    return Err(ValidationError::NoOptions {
                        question_id: self.id.clone(),
                    });
                }
                for (i, option) in options.iter().enumerate() {
                    if options[..i].contains(option) {
                        return Err(ValidationError::DuplicateOption {
                            question_id: self.id.clone(),
                            option: option.clone(),
                        });
                    }
                }
                Ok(())
            }
            QuestionKind::ShortText { max_length } | QuestionKind::LongText { max_length } => {
                if *max_length == 0 {
                    return Err(ValidationError::ZeroMaxLength {
                        question_id: self.id.clone(),
                    });
                }
                Ok(())
            }
            QuestionKind::Numeric { min, max } => {
                if min > max {
                    return Err(ValidationError::InvertedBounds {
                        question_id: self.id.clone(),
                        min: *min,
                        max: *max,
                    });
                }
                Ok(())
            }
            QuestionKind::FileUpload => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn question(kind: QuestionKind) -> Question {
        Question {
            id: "qst-1".into(),
            prompt: "How do you rate this?".into(),
            required: true,
            kind,
        }
    }

    #[test]
    fn question_kind_tagged_serde_roundtrip() {
        let q = question(QuestionKind::SingleChoice {
            options: vec!["Agree".into(), "Disagree".into()],
        });
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "single-choice");
        assert_eq!(json["options"][0], "Agree");

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn numeric_kind_serializes_bounds() {
        let q = question(QuestionKind::Numeric { min: 0.0, max: 10.0 });
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "numeric");
        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn file_upload_has_no_payload() {
        let q = question(QuestionKind::FileUpload);
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, QuestionKind::FileUpload);
    }

    #[test]
    fn validate_rejects_empty_options() {
        let q = question(QuestionKind::MultiChoice { options: vec![] });
        assert!(matches!(
            q.validate(),
            Err(ValidationError::NoOptions { .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_options() {
        let q = question(QuestionKind::SingleChoice {
            options: vec!["Yes".into(), "Yes".into()],
        });
        assert!(matches!(
            q.validate(),
            Err(ValidationError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let q = question(QuestionKind::Numeric { min: 5.0, max: 1.0 });
        assert!(matches!(
            q.validate(),
            Err(ValidationError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn assessment_validate_walks_sections() {
        let assessment = Assessment {
            job_id: "job-1".into(),
            title: "Frontend screen".into(),
            sections: vec![Section {
                id: "sec-1".into(),
                title: "Basics".into(),
                questions: vec![question(QuestionKind::ShortText { max_length: 0 })],
            }],
        };
        assert!(matches!(
            assessment.validate(),
            Err(ValidationError::ZeroMaxLength { .. })
        ));
    }
}
