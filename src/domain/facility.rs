use chrono::NaiveDateTime;

/// A single site entry of a site list document. The link is the reference
/// used to retrieve the facility's own data; the id only appears in logs and
/// error messages.
#[derive(Clone, Debug, PartialEq)]
pub struct Facility {
    pub id: String,
    pub link: String,
    pub modified: NaiveDateTime
}

impl Facility {
    pub fn new(id: &str, link: &str, modified: NaiveDateTime) -> Self {
        Self {
            id: String::from(id),
            link: String::from(link),
            modified
        }
    }
}
