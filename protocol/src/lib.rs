//! Wire types shared between the generation service client, the session loop
//! and the terminal UI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output languages accepted by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::It => "Italian",
            Language::Pt => "Portuguese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Kind of source material the service should read from `file_url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    #[default]
    Pdf,
    Csv,
    Txt,
    Md,
    Url,
    Pptx,
    Docx,
    Xls,
    Xlsx,
    Xml,
    Gdoc,
    Gsheet,
    Gslide,
    Gpdf,
    YoutubeUrl,
    Img,
}

impl FileType {
    pub const ALL: [FileType; 16] = [
        FileType::Pdf,
        FileType::Csv,
        FileType::Txt,
        FileType::Md,
        FileType::Url,
        FileType::Pptx,
        FileType::Docx,
        FileType::Xls,
        FileType::Xlsx,
        FileType::Xml,
        FileType::Gdoc,
        FileType::Gsheet,
        FileType::Gslide,
        FileType::Gpdf,
        FileType::YoutubeUrl,
        FileType::Img,
    ];

    pub fn code(self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Csv => "csv",
            FileType::Txt => "txt",
            FileType::Md => "md",
            FileType::Url => "url",
            FileType::Pptx => "pptx",
            FileType::Docx => "docx",
            FileType::Xls => "xls",
            FileType::Xlsx => "xlsx",
            FileType::Xml => "xml",
            FileType::Gdoc => "gdoc",
            FileType::Gsheet => "gsheet",
            FileType::Gslide => "gslide",
            FileType::Gpdf => "gpdf",
            FileType::YoutubeUrl => "youtube_url",
            FileType::Img => "img",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Csv => "CSV",
            FileType::Txt => "Plain text",
            FileType::Md => "Markdown",
            FileType::Url => "Web page",
            FileType::Pptx => "PowerPoint",
            FileType::Docx => "Word",
            FileType::Xls => "Excel",
            FileType::Xlsx => "Excel (XLSX)",
            FileType::Xml => "XML",
            FileType::Gdoc => "Google Doc",
            FileType::Gsheet => "Google Sheet",
            FileType::Gslide => "Google Slides",
            FileType::Gpdf => "Google PDF",
            FileType::YoutubeUrl => "YouTube video",
            FileType::Img => "Image",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FileType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .into_iter()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// A fully validated set of generation parameters.
///
/// Only built by the request builder in `aippt-core`; the fields are public
/// so callers can read them back, but nothing downstream re-validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub objective: String,
    pub target_audience: String,
    pub slide_count: u32,
    pub slide_breakdown: String,
    pub language: Language,
    pub source_file_url: String,
    pub source_file_type: FileType,
}

impl GenerationRequest {
    /// JSON body understood by the `/generate-ppt` endpoint.
    pub fn payload(&self) -> GeneratePayload {
        GeneratePayload {
            request_args: RequestArgs {
                topic: self.topic.clone(),
                objective: self.objective.clone(),
                target_audience: self.target_audience.clone(),
                n_slides: self.slide_count,
                slide_breakdown: self.slide_breakdown.clone(),
                lang: self.language,
            },
            file_url: self.source_file_url.clone(),
            file_type: self.source_file_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePayload {
    pub request_args: RequestArgs,
    pub file_url: String,
    pub file_type: FileType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestArgs {
    pub topic: String,
    pub objective: String,
    pub target_audience: String,
    pub n_slides: u32,
    pub slide_breakdown: String,
    pub lang: Language,
}

/// One titled block of markdown content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Slide {
    pub fn clipboard_text(&self) -> String {
        format!("Title: {}\n\n{}", self.title, self.content)
    }
}

/// A generated presentation as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckProblem {
    NoSlides,
}

impl fmt::Display for DeckProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckProblem::NoSlides => f.write_str("deck contains no slides"),
        }
    }
}

impl Deck {
    /// Structural checks serde cannot express. The viewer relies on at least
    /// one slide being present; blank titles are shown as they are.
    pub fn validate(&self) -> Result<(), DeckProblem> {
        if self.slides.is_empty() {
            return Err(DeckProblem::NoSlides);
        }
        Ok(())
    }

    pub fn clipboard_text(&self) -> String {
        format!(
            "Presentation Title: {}\n\nDescription: {}",
            self.title, self.description
        )
    }

    /// Render the whole deck as a single markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        if !self.description.is_empty() {
            out.push_str(&self.description);
            out.push_str("\n\n");
        }
        for slide in &self.slides {
            out.push_str(&format!("## {}\n\n", slide.title));
            let body = slide.content.trim_end();
            if !body.is_empty() {
                out.push_str(body);
                out.push_str("\n\n");
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    GenerationStarted { id: String },
    DeckReady { id: String, deck: Deck },
    GenerationFailed { id: String, message: String },
    ShutdownComplete,
}

#[derive(Debug, Clone)]
pub enum Op {
    Generate(GenerationRequest),
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: String,
    pub op: Op,
}

impl Submission {
    pub fn new(op: Op) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            op,
        }
    }
}
