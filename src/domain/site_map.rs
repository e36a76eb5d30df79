use std::collections::BTreeMap;
use chrono::NaiveDateTime;

///
/// A map of facility links with the facility's last modification time as
/// value. The map implementation was chosen to keep iteration order stable,
/// so downloads and log output are deterministic.
///
pub type SiteMap = BTreeMap<String, NaiveDateTime>;
