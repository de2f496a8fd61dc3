//! Generation parameters and the choices the form offers for them.

use serde::{Deserialize, Serialize};

/// One selectable value of an enumerated form field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Mysterious,
    Energetic,
    Serene,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Mysterious,
        Mood::Energetic,
        Mood::Serene,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Mysterious => "mysterious",
            Mood::Energetic => "energetic",
            Mood::Serene => "serene",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Mysterious => "Mysterious",
            Mood::Energetic => "Energetic",
            Mood::Serene => "Serene",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Standard,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [AspectRatio::Square, AspectRatio::Wide, AspectRatio::Standard];

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Standard => "4:3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Realistic,
    Cartoon,
    Abstract,
    Impressionistic,
    Surreal,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Realistic,
        Style::Cartoon,
        Style::Abstract,
        Style::Impressionistic,
        Style::Surreal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Realistic => "realistic",
            Style::Cartoon => "cartoon",
            Style::Abstract => "abstract",
            Style::Impressionistic => "impressionistic",
            Style::Surreal => "surreal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Style::Realistic => "Realistic",
            Style::Cartoon => "Cartoon",
            Style::Abstract => "Abstract",
            Style::Impressionistic => "Impressionistic",
            Style::Surreal => "Surreal",
        }
    }
}

pub const DEFAULT_COLOR_PALETTE: &str = "#FFFFFF";

/// Names of the fields a caller may update on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Prompt,
    Mood,
    AspectRatio,
    ColorPalette,
    Style,
}

/// Current form values, exactly as sent to the image service.
///
/// Enumerated fields are stored as plain strings: the form only offers
/// members of each set, but values set directly are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub prompt: String,
    pub mood: String,
    pub aspect_ratio: String,
    pub color_palette: String,
    pub style: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            mood: Mood::Happy.as_str().to_string(),
            aspect_ratio: AspectRatio::Square.as_str().to_string(),
            color_palette: DEFAULT_COLOR_PALETTE.to_string(),
            style: Style::Realistic.as_str().to_string(),
        }
    }
}

impl GenerationParams {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Prompt => self.prompt = value,
            FormField::Mood => self.mood = value,
            FormField::AspectRatio => self.aspect_ratio = value,
            FormField::ColorPalette => self.color_palette = value,
            FormField::Style => self.style = value,
        }
    }
}

/// Choices and defaults for the form's select inputs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub moods: Vec<Choice>,
    pub aspect_ratios: Vec<Choice>,
    pub styles: Vec<Choice>,
    pub defaults: GenerationParams,
}

impl FormOptions {
    pub fn new() -> Self {
        Self {
            moods: Mood::ALL
                .iter()
                .map(|mood| Choice { value: mood.as_str(), label: mood.label() })
                .collect(),
            aspect_ratios: AspectRatio::ALL
                .iter()
                .map(|ratio| Choice { value: ratio.as_str(), label: ratio.as_str() })
                .collect(),
            styles: Style::ALL
                .iter()
                .map(|style| Choice { value: style.as_str(), label: style.label() })
                .collect(),
            defaults: GenerationParams::default(),
        }
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self::new()
    }
}
