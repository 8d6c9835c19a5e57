//! Renders the reference-data snapshot sent to the model with each question.

use crate::db::Database;
use crate::resources::{Collection, Department, Event, Faculty, Faq, Location};

const PREAMBLE: &str = "You are a helpful campus assistant. Use the following campus information to answer the student's question:\n\n";

const FAQ_FETCH: i64 = 1000;
const OTHER_FETCH: i64 = 100;

const FAQ_CAP: usize = 20;
const FACULTY_CAP: usize = 10;
const EVENT_CAP: usize = 10;
const LOCATION_CAP: usize = 15;

/// Point-in-time copy of the reference collections.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub faqs: Vec<Faq>,
    pub departments: Vec<Department>,
    pub faculty: Vec<Faculty>,
    pub events: Vec<Event>,
    pub locations: Vec<Location>,
}

impl Snapshot {
    pub async fn load(db: &dyn Database) -> anyhow::Result<Self> {
        Ok(Self {
            faqs: Collection::<Faq>::new(db).list(None, FAQ_FETCH).await?,
            departments: Collection::<Department>::new(db).list(None, OTHER_FETCH).await?,
            faculty: Collection::<Faculty>::new(db).list(None, OTHER_FETCH).await?,
            events: Collection::<Event>::new(db).list(None, OTHER_FETCH).await?,
            locations: Collection::<Location>::new(db).list(None, OTHER_FETCH).await?,
        })
    }

    /// Deterministic text block; empty collections contribute nothing.
    pub fn render(&self) -> String {
        let mut out = String::from(PREAMBLE);

        if !self.faqs.is_empty() {
            out.push_str("FAQs:\n");
            for faq in self.faqs.iter().take(FAQ_CAP) {
                out.push_str(&format!("Q: {}\nA: {}\n\n", faq.question, faq.answer));
            }
        }

        if !self.departments.is_empty() {
            out.push_str("\nDepartments:\n");
            for d in &self.departments {
                out.push_str(&format!(
                    "- {}: {} (Contact: {})\n",
                    d.position, d.name, d.contact
                ));
            }
        }

        if !self.faculty.is_empty() {
            out.push_str("\nFaculty:\n");
            for f in self.faculty.iter().take(FACULTY_CAP) {
                out.push_str(&format!(
                    "- {} - {} (Qualification: {}): {} (Office: {})\n",
                    f.name, f.role, f.qualification, f.bio, f.office
                ));
            }
        }

        if !self.events.is_empty() {
            out.push_str("\nUpcoming Events:\n");
            for e in self.events.iter().take(EVENT_CAP) {
                out.push_str(&format!(
                    "- {}: {} (Date: {}, Location: {})\n",
                    e.title, e.description, e.date, e.location
                ));
            }
        }

        if !self.locations.is_empty() {
            out.push_str("\nCampus Locations:\n");
            for l in self.locations.iter().take(LOCATION_CAP) {
                out.push_str(&format!("- {} (Floor: {})\n", l.name, l.floor));
            }
        }

        out
    }
}

pub fn build_prompt(context: &str, query: &str) -> String {
    format!("{context}\n\nStudent question: {query}\n\nAnswer:")
}
