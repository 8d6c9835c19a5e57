use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{set_if_some, Resource};

/// Campus event. `date` is free text and never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub organizer: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct EventCreate {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub organizer: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<String>,
}

impl Resource for Event {
    const COLLECTION: &'static str = "events";
    const KIND: &'static str = "Event";

    type Create = EventCreate;
    type Patch = EventPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(input: EventCreate, id: String, now: OffsetDateTime) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            date: input.date,
            location: input.location,
            organizer: input.organizer,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: EventPatch, _now: OffsetDateTime) -> bool {
        let mut changed = false;
        changed |= set_if_some(&mut self.title, patch.title);
        changed |= set_if_some(&mut self.description, patch.description);
        changed |= set_if_some(&mut self.date, patch.date);
        changed |= set_if_some(&mut self.location, patch.location);
        changed |= set_if_some(&mut self.organizer, patch.organizer);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_is_kept_verbatim() {
        let input: EventCreate = serde_json::from_str(
            r#"{"title":"Fest","description":"Annual","date":"next Friday-ish",
                "location":"Main hall","organizer":"Student council"}"#,
        )
        .unwrap();
        let event = Event::create(input, "e1".into(), OffsetDateTime::UNIX_EPOCH);
        assert_eq!(event.date, "next Friday-ish");
    }

    #[test]
    fn missing_required_field_fails_to_parse() {
        let err = serde_json::from_str::<EventCreate>(r#"{"title":"Fest"}"#);
        assert!(err.is_err());
    }
}
