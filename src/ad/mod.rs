//! Ad copy generation for a product in a chosen language.

mod language;

pub use language::Language;

use crate::completion::{ChatRequest, Completer, CompletionError};
use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum AdError {
    #[error("Product and language are required")]
    MissingInput,

    #[error("Failed to generate ad: {0}")]
    Generation(#[from] CompletionError),

    #[error("Model reply contained no labelled components")]
    Unparseable,
}

const AD_SYSTEM_PROMPT: &str = "You are an expert ad copywriter who creates compliant advertisements.
Keep all titles in English but generate content in the specified language.

Follow these rules strictly:
1. NO superlatives (best, biggest, etc.)
2. NO specific numbers or percentages
3. NO brand names
4. NO free offers or discounts
5. NO guarantees or promises
6. NO misleading claims
7. NO public service references
8. NO urgency phrases like \"limited time\"

Use subjunctive mood (might, could, may) instead of definitive statements.";

/// Labels the model is asked to fill, in display order
pub const COMPONENTS: [&str; 7] = [
    "Headline",
    "Primary Text",
    "Striking Question",
    "Bold Claim",
    "How-To Hook",
    "Emotional Trigger",
    "Domain Name",
];

const AD_REPLY_TOKENS: u32 = 500;
const AD_TEMPERATURE: f32 = 0.7;

/// Labelled pieces of generated copy, in the order the model produced them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdCopy {
    pub components: Vec<(String, String)>,
}

impl AdCopy {
    pub fn get(&self, title: &str) -> Option<&str> {
        self.components
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, content)| content.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Pretty JSON object, keys in component order
    pub fn to_json(&self) -> String {
        let map: Map<String, Value> = self
            .components
            .iter()
            .map(|(title, content)| (title.clone(), Value::String(content.clone())))
            .collect();
        // A map of strings always serializes
        serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default()
    }
}

/// `ad_YYYYMMDD_HHMMSS.json` for the given moment
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("ad_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Split a `Label: value` reply into ordered components.
///
/// A line with a colon starts a component; later lines without one are
/// appended to it with a single space. Text before the first label is
/// dropped. A repeated label replaces the earlier value in place.
pub fn parse_components(text: &str) -> AdCopy {
    let mut copy = AdCopy::default();
    let mut current: Option<usize> = None;

    for line in text.split('\n') {
        let line = line.trim();
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_string();
            let value = value.trim().to_string();
            match copy.components.iter().position(|(k, _)| *k == key) {
                Some(idx) => {
                    copy.components[idx].1 = value;
                    current = Some(idx);
                }
                None => {
                    copy.components.push((key, value));
                    current = Some(copy.components.len() - 1);
                }
            }
        } else if let (Some(idx), false) = (current, line.is_empty()) {
            copy.components[idx].1.push(' ');
            copy.components[idx].1.push_str(line);
        }
    }

    copy
}

pub struct AdGenerator<C> {
    completer: C,
}

impl<C: Completer> AdGenerator<C> {
    pub fn new(completer: C) -> Self {
        Self { completer }
    }

    pub async fn generate(&self, product: &str, language: Language) -> Result<AdCopy, AdError> {
        let product = product.trim();
        if product.is_empty() {
            return Err(AdError::MissingInput);
        }
        info!(product, language = language.code(), "Generating ad copy");

        let request = ChatRequest::new(AD_SYSTEM_PROMPT, user_prompt(product, language), AD_REPLY_TOKENS)
            .temperature(AD_TEMPERATURE);

        let reply = self.completer.complete(request).await.map_err(|e| {
            error!(error = %e, "Ad generation failed");
            AdError::Generation(e)
        })?;

        let copy = parse_components(&reply);
        if copy.is_empty() {
            return Err(AdError::Unparseable);
        }
        Ok(copy)
    }
}

fn user_prompt(product: &str, language: Language) -> String {
    let mut prompt = format!(
        "Create engaging ad text for {} in {}.\n\nRequired components:\n",
        product, language
    );
    for component in COMPONENTS {
        prompt.push_str(component);
        prompt.push_str(":\n");
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::future::Future;
    use std::sync::Mutex;

    struct Scripted {
        reply: Result<String, u16>,
        seen: Mutex<Option<ChatRequest>>,
    }

    impl Scripted {
        fn new(reply: Result<&str, u16>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                seen: Mutex::new(None),
            }
        }
    }

    impl Completer for Scripted {
        fn complete(
            &self,
            request: ChatRequest,
        ) -> impl Future<Output = Result<String, CompletionError>> + Send {
            *self.seen.lock().unwrap() = Some(request);
            let reply = self.reply.clone().map_err(|status| CompletionError::ServerError {
                status,
                body: "error".to_string(),
            });
            async move { reply }
        }
    }

    #[test]
    fn test_parse_components() {
        let reply = "Here is your ad:\n\nHeadline: Brighter mornings\nPrimary Text: A kettle that\n  might change how you start the day.\n\nDomain Name: kettle.example";
        let copy = parse_components(reply);

        assert_eq!(
            copy.components,
            vec![
                ("Here is your ad".to_string(), String::new()),
                ("Headline".to_string(), "Brighter mornings".to_string()),
                (
                    "Primary Text".to_string(),
                    "A kettle that might change how you start the day.".to_string()
                ),
                ("Domain Name".to_string(), "kettle.example".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_drops_text_before_first_label() {
        let copy = parse_components("Sure thing\nHeadline: Calm tea\n");
        assert_eq!(copy.components.len(), 1);
        assert_eq!(copy.get("Headline"), Some("Calm tea"));
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let copy = parse_components("Striking Question: What if: mornings were slower?");
        assert_eq!(copy.get("Striking Question"), Some("What if: mornings were slower?"));
    }

    #[test]
    fn test_json_preserves_order() {
        let copy = parse_components("Headline: b\nBold Claim: a");
        assert_eq!(copy.to_json(), "{\n  \"Headline\": \"b\",\n  \"Bold Claim\": \"a\"\n}");
    }

    #[test]
    fn test_default_file_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(default_file_name(now), "ad_20240309_070501.json");
    }

    #[tokio::test]
    async fn test_generate() {
        let completer = Scripted::new(Ok("Headline: Quiet focus\nBold Claim: It could help."));
        let generator = AdGenerator::new(completer);

        let copy = generator.generate("noise-cancelling headphones", Language::German).await.unwrap();
        assert_eq!(copy.get("Bold Claim"), Some("It could help."));

        let seen = generator.completer.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.max_tokens, 500);
        assert_eq!(seen.temperature, Some(0.7));
        assert!(seen.messages[1]
            .content
            .starts_with("Create engaging ad text for noise-cancelling headphones in German."));
        assert!(seen.messages[1].content.contains("How-To Hook:\n"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_product() {
        let generator = AdGenerator::new(Scripted::new(Ok("Headline: x")));
        assert!(matches!(
            generator.generate("   ", Language::English).await,
            Err(AdError::MissingInput)
        ));
        assert!(generator.completer.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generate_errors() {
        let failing = AdGenerator::new(Scripted::new(Err(429)));
        assert!(matches!(
            failing.generate("tea", Language::Thai).await,
            Err(AdError::Generation(CompletionError::ServerError { status: 429, .. }))
        ));

        let rambling = AdGenerator::new(Scripted::new(Ok("no labels here")));
        assert!(matches!(
            rambling.generate("tea", Language::Thai).await,
            Err(AdError::Unparseable)
        ));
    }
}
