use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{set_if_some, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct FaqCreate {
    pub question: String,
    pub answer: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FaqPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Resource for Faq {
    const COLLECTION: &'static str = "faqs";
    const KIND: &'static str = "FAQ";
    const FILTER_FIELD: Option<&'static str> = Some("category");

    type Create = FaqCreate;
    type Patch = FaqPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(input: FaqCreate, id: String, now: OffsetDateTime) -> Self {
        Self {
            id,
            question: input.question,
            answer: input.answer,
            category: input.category,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Always stamps `updated_at`, even for an empty patch.
    fn apply(&mut self, patch: FaqPatch, now: OffsetDateTime) -> bool {
        set_if_some(&mut self.question, patch.question);
        set_if_some(&mut self.answer, patch.answer);
        set_if_some(&mut self.category, patch.category);
        set_if_some(&mut self.tags, patch.tags);
        self.updated_at = now;
        true
    }
}
