use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::domain::Difficulty;

/// One generated prompt material as returned by a provider.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct LearningItem {
    pub title: String,
    pub content: String,
    pub expected_answer: String,
    pub difficulty: String,
}

/// Why a generated item was refused by strict validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemDiagnostic {
    pub index: usize,
    pub reason: String,
}

impl std::fmt::Display for ItemDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item {}: {}", self.index, self.reason)
    }
}

impl LearningItem {
    /// Strictly convert one element of a normalized batch. Every field must be a
    /// non-empty string and the difficulty must echo the requested one.
    pub fn from_generated(
        value: &Value,
        index: usize,
        expected: Difficulty,
    ) -> Result<Self, ItemDiagnostic> {
        let object = value.as_object().ok_or_else(|| ItemDiagnostic {
            index,
            reason: "not a JSON object".to_string(),
        })?;

        let field = |name: &str| -> Result<String, ItemDiagnostic> {
            match object.get(name).and_then(Value::as_str).map(str::trim) {
                Some(text) if !text.is_empty() => Ok(text.to_string()),
                Some(_) => Err(ItemDiagnostic {
                    index,
                    reason: format!("'{}' is empty", name),
                }),
                None => Err(ItemDiagnostic {
                    index,
                    reason: format!("'{}' is missing or not a string", name),
                }),
            }
        };

        let item = LearningItem {
            title: field("title")?,
            content: field("content")?,
            expected_answer: field("expected_answer")?,
            difficulty: field("difficulty")?,
        };

        if !item.difficulty.eq_ignore_ascii_case(expected.as_str()) {
            return Err(ItemDiagnostic {
                index,
                reason: format!(
                    "difficulty '{}' does not match requested '{}'",
                    item.difficulty, expected
                ),
            });
        }

        Ok(item)
    }
}

/// Validate a whole batch; the batch is accepted only if every item passes.
pub fn validate_items(
    values: &[Value],
    expected: Difficulty,
) -> Result<Vec<LearningItem>, Vec<ItemDiagnostic>> {
    let mut items = Vec::with_capacity(values.len());
    let mut diagnostics = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match LearningItem::from_generated(value, index, expected) {
            Ok(item) => items.push(item),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    if diagnostics.is_empty() {
        Ok(items)
    } else {
        Err(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(title: &str, difficulty: &str) -> Value {
        json!({
            "title": title,
            "content": "Summarise this email in three bullet points.",
            "expected_answer": "Three concise bullets.",
            "difficulty": difficulty
        })
    }

    #[test]
    fn accepts_well_formed_item() {
        let parsed =
            LearningItem::from_generated(&item("Email summary", "beginner"), 0, Difficulty::Beginner)
                .unwrap();
        assert_eq!(parsed.title, "Email summary");
        assert_eq!(parsed.difficulty, "beginner");
    }

    #[test]
    fn rejects_empty_title() {
        let err = LearningItem::from_generated(&item("  ", "beginner"), 2, Difficulty::Beginner)
            .unwrap_err();
        assert_eq!(err.index, 2);
        assert!(err.reason.contains("title"));
    }

    #[test]
    fn rejects_non_object_and_missing_fields() {
        let err = LearningItem::from_generated(&json!(1), 0, Difficulty::Beginner).unwrap_err();
        assert_eq!(err.reason, "not a JSON object");

        let err = LearningItem::from_generated(&json!({"title": "t"}), 1, Difficulty::Beginner)
            .unwrap_err();
        assert!(err.reason.contains("content"));
    }

    #[test]
    fn rejects_difficulty_mismatch() {
        let err = LearningItem::from_generated(&item("t", "advanced"), 0, Difficulty::Beginner)
            .unwrap_err();
        assert!(err.reason.contains("does not match"));
    }

    #[test]
    fn validate_items_collects_every_diagnostic() {
        let values = vec![item("ok", "advanced"), json!("nope"), item("", "advanced")];
        let diagnostics = validate_items(&values, Difficulty::Advanced).unwrap_err();
        let indexes: Vec<usize> = diagnostics.iter().map(|d| d.index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn validate_items_preserves_order() {
        let values = vec![item("first", "advanced"), item("second", "advanced")];
        let items = validate_items(&values, Difficulty::Advanced).unwrap();
        assert_eq!(items[0].title, "first");
        assert_eq!(items[1].title, "second");
    }
}
