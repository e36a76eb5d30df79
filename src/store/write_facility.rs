use std::fs;
use std::path::Path;
use log::info;
use crate::BoxError;
use crate::store::facility_path::facility_path;

/// Writes a fetched facility document below the storage directory.
pub fn write_facility(base_dir: &str, link: &str, xml: &str) -> Result<(), BoxError> {
    let path = facility_path(base_dir, link);
    info!("Write facility data to {path}");
    let path = Path::new(&path);
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(path, xml)?;
    Ok(())
}
