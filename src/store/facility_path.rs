/// Builds the storage path for a facility document. The link is flattened to
/// a plain file name, so a hostile link cannot escape the storage directory.
pub fn facility_path(base_dir: &str, link: &str) -> String {
    let name : String = link.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{base_dir}/{name}.xml")
}
