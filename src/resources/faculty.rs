use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{set_if_some, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub role: String,
    pub qualification: String,
    pub bio: String,
    pub office: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct FacultyCreate {
    pub name: String,
    pub role: String,
    pub qualification: String,
    pub bio: String,
    pub office: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FacultyPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub qualification: Option<String>,
    pub bio: Option<String>,
    pub office: Option<String>,
}

/// Seniority bucket derived from the free-text role; lower sorts first.
pub fn role_rank(role: &str) -> u8 {
    let role = role.to_lowercase();
    if role.contains("principal") || role.contains("coordinator") {
        0
    } else if role.contains("hod") || role.contains("head") {
        1
    } else if role.contains("professor") {
        2
    } else {
        3
    }
}

impl Resource for Faculty {
    const COLLECTION: &'static str = "faculty";
    const KIND: &'static str = "Faculty";

    type Create = FacultyCreate;
    type Patch = FacultyPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(input: FacultyCreate, id: String, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: input.name,
            role: input.role,
            qualification: input.qualification,
            bio: input.bio,
            office: input.office,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: FacultyPatch, _now: OffsetDateTime) -> bool {
        let mut changed = false;
        changed |= set_if_some(&mut self.name, patch.name);
        changed |= set_if_some(&mut self.role, patch.role);
        changed |= set_if_some(&mut self.qualification, patch.qualification);
        changed |= set_if_some(&mut self.bio, patch.bio);
        changed |= set_if_some(&mut self.office, patch.office);
        changed
    }

    // sort_by_key is stable: equal ranks keep storage order
    fn arrange(items: &mut [Self]) {
        items.sort_by_key(|f| role_rank(&f.role));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, role: &str) -> Faculty {
        Faculty::create(
            FacultyCreate {
                name: name.into(),
                role: role.into(),
                qualification: "PhD".into(),
                bio: String::new(),
                office: "F-1".into(),
            },
            name.into(),
            OffsetDateTime::UNIX_EPOCH,
        )
    }

    #[test]
    fn rank_buckets() {
        assert_eq!(role_rank("Principal"), 0);
        assert_eq!(role_rank("Placement Coordinator"), 0);
        assert_eq!(role_rank("HOD - Computer Science"), 1);
        assert_eq!(role_rank("Head of Physics"), 1);
        assert_eq!(role_rank("Associate PROFESSOR"), 2);
        assert_eq!(role_rank("Lab Assistant"), 3);
        assert_eq!(role_rank(""), 3);
    }

    #[test]
    fn arrange_orders_by_rank() {
        let mut items = vec![
            member("a", "Assistant Professor"),
            member("b", "Principal"),
            member("c", "HOD"),
        ];
        Faculty::arrange(&mut items);
        let roles: Vec<&str> = items.iter().map(|f| f.role.as_str()).collect();
        assert_eq!(roles, vec!["Principal", "HOD", "Assistant Professor"]);
    }

    #[test]
    fn arrange_is_stable_within_rank() {
        let mut items = vec![
            member("lecturer-1", "Lecturer"),
            member("prof-1", "Professor"),
            member("lecturer-2", "Lecturer"),
            member("prof-2", "Assistant Professor"),
        ];
        Faculty::arrange(&mut items);
        let names: Vec<&str> = items.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["prof-1", "prof-2", "lecturer-1", "lecturer-2"]);
    }
}
