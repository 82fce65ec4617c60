// src/services/generator.rs

use serde_json::value::RawValue;

use crate::{error::AppError, services::model::TextModel, utils::extract::extract_json_object};

/// Minimum number of entries the model is asked for.
pub const MIN_WORDS: usize = 5;

/// Builds the fixed vocabulary prompt for a category.
pub fn build_prompt(category: &str) -> String {
    format!(
        r#"Generate a vocabulary list for the category "{category}" in Spanish and Arabic with transliteration. Format the output as a JSON object with the following structure:
    {{
      "group": {{
        "name": "{category}"
      }},
      "words": [
        {{
          "spanish": "word in spanish",
          "transliteration": "spanish transliteration in arabic language",
          "arabic": "word in arabic"
        }}
      ]
    }}
    Include at least {MIN_WORDS} relevant words or phrases for this category."#
    )
}

/// Asks the model for a vocabulary list and returns the JSON object found in its reply.
///
/// The object is passed through untouched: its shape is not checked against
/// the group/words layout the prompt asks for.
pub async fn generate_vocabulary(
    model: &dyn TextModel,
    category: &str,
) -> Result<Box<RawValue>, AppError> {
    let prompt = build_prompt(category);
    let reply = model.complete(&prompt).await?;
    tracing::debug!(reply_len = reply.len(), "Model replied");

    Ok(extract_json_object(&reply)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::model::ModelError;
    use async_trait::async_trait;

    struct Canned(&'static str);

    #[async_trait]
    impl TextModel for Canned {
        async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn prompt_names_the_category_twice() {
        let prompt = build_prompt("kitchen");
        assert_eq!(prompt.matches("kitchen").count(), 2);
        assert!(prompt.contains("\"name\": \"kitchen\""));
        assert!(prompt.contains("at least 5"));
    }

    #[tokio::test]
    async fn passes_extracted_object_through() {
        let model = Canned("Sure! {\"group\": {\"name\": \"x\"}, \"words\": []} Hope it helps.");
        let raw = generate_vocabulary(&model, "x").await.unwrap();
        assert_eq!(raw.get(), "{\"group\": {\"name\": \"x\"}, \"words\": []}");
    }

    #[tokio::test]
    async fn prose_only_reply_is_a_generation_error() {
        let model = Canned("Sorry, I can't do that.");
        let err = generate_vocabulary(&model, "x").await.unwrap_err();
        assert!(matches!(err, AppError::Generation { .. }));
    }
}
