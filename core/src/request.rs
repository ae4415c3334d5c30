//! Validation of raw form input into a [`GenerationRequest`].

use aippt_protocol::{FileType, GenerationRequest, Language};
use std::fmt;
use url::Url;

/// The inputs of the generation form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Topic,
    Objective,
    TargetAudience,
    SlideCount,
    SlideBreakdown,
    Language,
    FileUrl,
    FileType,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Topic,
        Field::Objective,
        Field::TargetAudience,
        Field::SlideCount,
        Field::SlideBreakdown,
        Field::Language,
        Field::FileUrl,
        Field::FileType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Topic => "Topic",
            Field::Objective => "Objective",
            Field::TargetAudience => "Target Audience",
            Field::SlideCount => "Number of Slides",
            Field::SlideBreakdown => "Slide Breakdown",
            Field::Language => "Language",
            Field::FileUrl => "File URL",
            Field::FileType => "File Type",
        }
    }

    /// Name of the field in the request payload.
    pub fn key(self) -> &'static str {
        match self {
            Field::Topic => "topic",
            Field::Objective => "objective",
            Field::TargetAudience => "target_audience",
            Field::SlideCount => "n_slides",
            Field::SlideBreakdown => "slide_breakdown",
            Field::Language => "lang",
            Field::FileUrl => "file_url",
            Field::FileType => "file_type",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Topic => "Enter the topic",
            Field::Objective => "What's the objective?",
            Field::TargetAudience => "Who's your audience?",
            Field::SlideCount => "Number of slides",
            Field::SlideBreakdown => "Describe the slide breakdown",
            Field::Language => "",
            Field::FileUrl => "Paste the file URL",
            Field::FileType => "",
        }
    }

    /// Choice fields are picked from a fixed list instead of typed.
    pub fn is_choice(self) -> bool {
        matches!(self, Field::Language | Field::FileType)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Every violation found in one validation pass, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field.key(), err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw, unvalidated form values exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub topic: String,
    pub objective: String,
    pub target_audience: String,
    pub n_slides: String,
    pub slide_breakdown: String,
    pub lang: String,
    pub file_url: String,
    pub file_type: String,
}

impl FormInput {
    /// Empty form with the choice fields set to their first option.
    pub fn with_defaults() -> Self {
        Self {
            lang: Language::default().code().to_string(),
            file_type: FileType::default().code().to_string(),
            ..Self::default()
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Topic => &self.topic,
            Field::Objective => &self.objective,
            Field::TargetAudience => &self.target_audience,
            Field::SlideCount => &self.n_slides,
            Field::SlideBreakdown => &self.slide_breakdown,
            Field::Language => &self.lang,
            Field::FileUrl => &self.file_url,
            Field::FileType => &self.file_type,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Topic => &mut self.topic,
            Field::Objective => &mut self.objective,
            Field::TargetAudience => &mut self.target_audience,
            Field::SlideCount => &mut self.n_slides,
            Field::SlideBreakdown => &mut self.slide_breakdown,
            Field::Language => &mut self.lang,
            Field::FileUrl => &mut self.file_url,
            Field::FileType => &mut self.file_type,
        }
    }

    /// Check every field and build the request, or report all violations.
    ///
    /// Text is sent as typed; blank or whitespace-only text counts as
    /// missing. The URL is trimmed before parsing and sending.
    pub fn validate(&self) -> Result<GenerationRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let topic = required(&self.topic, Field::Topic, "Topic is required", &mut errors);
        let objective = required(
            &self.objective,
            Field::Objective,
            "Objective is required",
            &mut errors,
        );
        let target_audience = required(
            &self.target_audience,
            Field::TargetAudience,
            "Target audience is required",
            &mut errors,
        );
        let slide_count = parse_slide_count(&self.n_slides, &mut errors);
        let slide_breakdown = required(
            &self.slide_breakdown,
            Field::SlideBreakdown,
            "Slide breakdown is required",
            &mut errors,
        );

        let language = match self.lang.trim().parse::<Language>() {
            Ok(lang) => Some(lang),
            Err(_) => {
                errors.push(
                    Field::Language,
                    format!(
                        "Language must be one of: {}",
                        codes(Language::ALL.map(Language::code))
                    ),
                );
                None
            }
        };

        let file_url = self.file_url.trim();
        let source_file_url = match Url::parse(file_url) {
            Ok(_) => Some(file_url.to_string()),
            Err(_) => {
                errors.push(Field::FileUrl, "Please provide a valid URL");
                None
            }
        };

        let source_file_type = match self.file_type.trim().parse::<FileType>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.push(
                    Field::FileType,
                    format!(
                        "File type must be one of: {}",
                        codes(FileType::ALL.map(FileType::code))
                    ),
                );
                None
            }
        };

        match (
            topic,
            objective,
            target_audience,
            slide_count,
            slide_breakdown,
            language,
            source_file_url,
            source_file_type,
        ) {
            (
                Some(topic),
                Some(objective),
                Some(target_audience),
                Some(slide_count),
                Some(slide_breakdown),
                Some(language),
                Some(source_file_url),
                Some(source_file_type),
            ) if errors.is_empty() => Ok(GenerationRequest {
                topic,
                objective,
                target_audience,
                slide_count,
                slide_breakdown,
                language,
                source_file_url,
                source_file_type,
            }),
            _ => Err(errors),
        }
    }
}

fn required(
    value: &str,
    field: Field,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    if value.trim().is_empty() {
        errors.push(field, message);
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_slide_count(raw: &str, errors: &mut ValidationErrors) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(Field::SlideCount, "Number of slides is required");
        return None;
    }
    match raw.parse::<i64>() {
        Ok(n) if n <= 0 => {
            errors.push(Field::SlideCount, "Number of slides must be positive");
            None
        }
        Ok(n) => match u32::try_from(n) {
            Ok(n) => Some(n),
            Err(_) => {
                errors.push(Field::SlideCount, "Number of slides is too large");
                None
            }
        },
        Err(_) => {
            errors.push(Field::SlideCount, "Number of slides must be a whole number");
            None
        }
    }
}

fn codes<const N: usize>(codes: [&str; N]) -> String {
    codes.join(", ")
}
