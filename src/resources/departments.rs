use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{set_if_some, Resource};

/// A committee position and who holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub position: String,
    pub name: String,
    pub contact: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct DepartmentCreate {
    pub position: String,
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DepartmentPatch {
    pub position: Option<String>,
    pub name: Option<String>,
    pub contact: Option<String>,
}

impl Resource for Department {
    const COLLECTION: &'static str = "departments";
    const KIND: &'static str = "Department";

    type Create = DepartmentCreate;
    type Patch = DepartmentPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(input: DepartmentCreate, id: String, now: OffsetDateTime) -> Self {
        Self {
            id,
            position: input.position,
            name: input.name,
            contact: input.contact,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: DepartmentPatch, _now: OffsetDateTime) -> bool {
        let mut changed = false;
        changed |= set_if_some(&mut self.position, patch.position);
        changed |= set_if_some(&mut self.name, patch.name);
        changed |= set_if_some(&mut self.contact, patch.contact);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut dept = Department::create(
            DepartmentCreate {
                position: "Secretary".into(),
                name: "R. Iyer".into(),
                contact: "ext 210".into(),
            },
            "d1".into(),
            datetime!(2026-01-01 00:00 UTC),
        );
        let before = dept.clone();
        assert!(!dept.apply(DepartmentPatch::default(), datetime!(2026-02-01 00:00 UTC)));
        assert_eq!(dept, before);

        assert!(dept.apply(
            DepartmentPatch {
                contact: Some("ext 211".into()),
                ..Default::default()
            },
            datetime!(2026-02-01 00:00 UTC),
        ));
        assert_eq!(dept.contact, "ext 211");
        assert_eq!(dept.position, "Secretary");
    }
}
