//! Pilot briefing between runs
//!
//! The text comes from an external generator and is purely cosmetic. Every
//! failure collapses into a fixed fallback, so callers never see an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Presentation language tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Zh,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Tag that does not name a supported language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language '{}'", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

/// Narrative shown before a sortie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Briefing {
    pub title: String,
    pub message: String,
    pub tactical_advice: String,
}

impl Briefing {
    pub const FALLBACK_TITLE: &'static str = "Vanguard Ready";
    pub const FALLBACK_MESSAGE: &'static str = "All systems online. Neural link stable.";
    pub const FALLBACK_ADVICE: &'static str = "Stay focused, Commander.";

    pub fn fallback() -> Self {
        Self {
            title: Self::FALLBACK_TITLE.to_string(),
            message: Self::FALLBACK_MESSAGE.to_string(),
            tactical_advice: Self::FALLBACK_ADVICE.to_string(),
        }
    }

    /// Parse generator output, filling blank fields from the fallback
    pub fn from_json(text: &str) -> Result<Self, BriefingError> {
        if text.trim().is_empty() {
            return Err(BriefingError::EmptyResponse);
        }
        let raw: RawBriefing = serde_json::from_str(text).map_err(BriefingError::Parse)?;
        Ok(Self {
            title: or_fallback(raw.title, Self::FALLBACK_TITLE),
            message: or_fallback(raw.message, Self::FALLBACK_MESSAGE),
            tactical_advice: or_fallback(raw.tactical_advice, Self::FALLBACK_ADVICE),
        })
    }
}

impl Default for Briefing {
    fn default() -> Self {
        Self::fallback()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawBriefing {
    title: Option<String>,
    message: Option<String>,
    tactical_advice: Option<String>,
}

fn or_fallback(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

/// Why a briefing could not be produced
#[derive(Debug)]
pub enum BriefingError {
    /// Generator unreachable or refused the request
    Transport(String),
    EmptyResponse,
    Parse(serde_json::Error),
}

impl fmt::Display for BriefingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BriefingError::Transport(msg) => write!(f, "briefing transport failed: {msg}"),
            BriefingError::EmptyResponse => f.write_str("briefing generator returned no text"),
            BriefingError::Parse(err) => write!(f, "briefing response malformed: {err}"),
        }
    }
}

impl std::error::Error for BriefingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BriefingError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Context sent to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BriefingRequest {
    pub level: u32,
    pub score: u32,
    pub language: Language,
}

impl BriefingRequest {
    pub fn prompt(&self) -> String {
        format!(
            "Generate a short tactical briefing for a space combat game in {}.\n\
             Context: Current Level {}, Total Score {}.\n\
             The briefing should include a creative mission title, a flavor text message \
             (max 2 sentences), and one relevant tactical advice string.",
            self.language, self.level, self.score
        )
    }
}

/// Text generator backing the briefing
///
/// Implementations return the raw JSON object with `title`, `message` and
/// `tacticalAdvice` string fields.
pub trait BriefingSource {
    fn request(
        &self,
        request: &BriefingRequest,
    ) -> impl Future<Output = Result<String, BriefingError>>;
}

/// Fetch a briefing, substituting the fallback on any failure
pub async fn fetch_briefing(
    source: &impl BriefingSource,
    level: u32,
    score: u32,
    language: Language,
) -> Briefing {
    let request = BriefingRequest {
        level,
        score,
        language,
    };
    let result = match source.request(&request).await {
        Ok(text) => Briefing::from_json(&text),
        Err(err) => Err(err),
    };
    result.unwrap_or_else(|err| {
        log::warn!("{err}; using fallback briefing");
        Briefing::fallback()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return out;
            }
        }
    }

    struct Canned(Result<&'static str, &'static str>);

    impl BriefingSource for Canned {
        async fn request(&self, _request: &BriefingRequest) -> Result<String, BriefingError> {
            self.0
                .map(str::to_string)
                .map_err(|msg| BriefingError::Transport(msg.to_string()))
        }
    }

    fn fetch(source: Canned) -> Briefing {
        block_on(fetch_briefing(&source, 3, 4200, Language::En))
    }

    #[test]
    fn test_full_response() {
        let briefing = fetch(Canned(Ok(
            r#"{"title":"Iron Dawn","message":"Hold the line.","tacticalAdvice":"Strafe early."}"#,
        )));
        assert_eq!(briefing.title, "Iron Dawn");
        assert_eq!(briefing.message, "Hold the line.");
        assert_eq!(briefing.tactical_advice, "Strafe early.");
    }

    #[test]
    fn test_blank_fields_filled_individually() {
        let briefing = fetch(Canned(Ok(r#"{"title":"Iron Dawn","message":""}"#)));
        assert_eq!(briefing.title, "Iron Dawn");
        assert_eq!(briefing.message, Briefing::FALLBACK_MESSAGE);
        assert_eq!(briefing.tactical_advice, Briefing::FALLBACK_ADVICE);
    }

    #[test]
    fn test_failures_resolve_to_fallback() {
        assert_eq!(fetch(Canned(Err("quota exceeded"))), Briefing::fallback());
        assert_eq!(fetch(Canned(Ok(""))), Briefing::fallback());
        assert_eq!(fetch(Canned(Ok("{not json"))), Briefing::fallback());
        assert_eq!(fetch(Canned(Ok("[1, 2]"))), Briefing::fallback());
    }

    #[test]
    fn test_prompt_carries_context() {
        let prompt = BriefingRequest {
            level: 7,
            score: 12_000,
            language: Language::Zh,
        }
        .prompt();
        assert!(prompt.contains("in zh"));
        assert!(prompt.contains("Current Level 7"));
        assert!(prompt.contains("Total Score 12000"));
    }

    #[test]
    fn test_language_tags() {
        for lang in Language::ALL {
            assert_eq!(lang.as_str().parse::<Language>(), Ok(lang));
        }
        assert!("fr".parse::<Language>().is_err());
    }
}
