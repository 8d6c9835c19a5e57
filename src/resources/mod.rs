//! Reference-data collections: FAQs, departments, faculty, events, locations.
//!
//! Every kind shares one contract: public list, admin-gated create, partial
//! update and hard delete. Kind-specific behaviour (list filter, ordering,
//! timestamp stamping) hangs off the [`Resource`] trait.

use axum::Router;
use serde::{de::DeserializeOwned, Serialize};
use time::OffsetDateTime;

use crate::state::AppState;

pub mod departments;
pub mod events;
pub mod faculty;
pub mod faqs;
mod handlers;
pub mod locations;
mod repo;

pub use departments::Department;
pub use events::Event;
pub use faculty::Faculty;
pub use faqs::Faq;
pub use locations::Location;
pub use repo::Collection;

/// Upper bound on any list read.
pub const LIST_LIMIT: i64 = 1000;

pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name in the document store.
    const COLLECTION: &'static str;
    /// Human-readable kind used in messages, e.g. `"FAQ"`.
    const KIND: &'static str;
    /// Optional single equality filter accepted by `list` as a query parameter.
    const FILTER_FIELD: Option<&'static str> = None;

    type Create: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;

    fn id(&self) -> &str;

    fn create(input: Self::Create, id: String, now: OffsetDateTime) -> Self;

    /// Applies the supplied fields of `patch`. Returns whether the record
    /// needs to be written back.
    fn apply(&mut self, patch: Self::Patch, now: OffsetDateTime) -> bool;

    /// Presentation order for `list`. Storage order by default.
    fn arrange(_items: &mut [Self]) {}
}

fn resource_routes<R: Resource>(path: &str) -> Router<AppState> {
    use axum::routing::{get, put};

    Router::new()
        .route(path, get(handlers::list::<R>).post(handlers::create::<R>))
        .route(
            &format!("{path}/:id"),
            put(handlers::update::<R>).delete(handlers::remove::<R>),
        )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(resource_routes::<Faq>("/faqs"))
        .merge(resource_routes::<Department>("/departments"))
        .merge(resource_routes::<Faculty>("/faculty"))
        .merge(resource_routes::<Event>("/events"))
        .merge(resource_routes::<Location>("/locations"))
}

/// Assigns `value` to `slot` when present. Returns whether it did.
pub(crate) fn set_if_some<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}
