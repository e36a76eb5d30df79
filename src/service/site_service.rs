use chrono::NaiveDateTime;
use log::{debug, info};
use rusqlite::Connection;
use crate::BoxError;
use crate::database::site_table::SiteTable;
use crate::domain::site_map::SiteMap;
use crate::parser::timestamp::{format_datetime, parse_datetime};

///
/// Keeps the last known modification time of every downloaded facility.
/// The most recent of these times is the cutoff for the next incremental
/// download of the site list.
///
pub struct SiteService {
    connection: Connection
}

impl SiteService {
    pub fn new(db_path: &str) -> Result<Self, BoxError> {
        let connection = Connection::open(db_path)?;
        SiteTable::create_table(&connection)?;
        Ok(Self { connection })
    }

    /// Stores the modification times of all sites in the map.
    pub fn add(&mut self, sites: &SiteMap) -> Result<(), BoxError> {
        info!("Add {} sites to database", sites.len());
        let tx = self.connection.transaction()?;
        for (link, modified) in sites {
            SiteTable::upsert(&tx, link, &format_datetime(modified))?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn get_sites(&mut self) -> Result<SiteMap, BoxError> {
        let tx = self.connection.transaction()?;
        let stored = SiteTable::select_all(&tx)?;
        tx.commit()?;
        let mut sites = SiteMap::new();
        for (link, modified) in stored {
            sites.insert(link, parse_datetime(&modified)?);
        }
        Ok(sites)
    }

    /// Returns the most recent modification time of all stored sites, or
    /// None if nothing has been downloaded yet.
    pub fn get_max_modified(&mut self) -> Result<Option<NaiveDateTime>, BoxError> {
        let tx = self.connection.transaction()?;
        let max_modified = SiteTable::select_max_modified(&tx)?;
        tx.commit()?;
        debug!("Most recent stored modification time: {:?}", max_modified);
        match max_modified {
            Some(modified) => Ok(Some(parse_datetime(&modified)?)),
            None => Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use crate::domain::site_map::SiteMap;
    use crate::service::site_service::SiteService;

    #[test]
    fn test_add_none() {
        let mut service = create_service();
        assert!(service.add(&SiteMap::new()).is_ok());

        let max = service.get_max_modified();
        assert!(max.is_ok());
        assert_eq!(max.unwrap(), None);
    }

    #[test]
    fn test_add_some() {
        let mut sites = SiteMap::new();
        sites.insert(String::from("linkA"), datetime(2011, 4, 7, 12, 10, 1));
        sites.insert(String::from("linkB"), datetime(2012, 5, 8, 13, 31, 2));

        let mut service = create_service();
        assert!(service.add(&sites).is_ok());

        let max = service.get_max_modified();
        assert!(max.is_ok());
        assert_eq!(max.unwrap(), Some(datetime(2012, 5, 8, 13, 31, 2)));
    }

    #[test]
    fn test_add_updates() {
        let mut sites = SiteMap::new();
        sites.insert(String::from("linkA"), datetime(2011, 4, 7, 12, 10, 1));

        let mut service = create_service();
        assert!(service.add(&sites).is_ok());

        sites.insert(String::from("linkA"), datetime(2013, 6, 9, 8, 32, 3));
        assert!(service.add(&sites).is_ok());

        let stored = service.get_sites();
        assert!(stored.is_ok());
        assert_eq!(stored.unwrap(), sites);
    }

    #[test]
    fn test_get_sites_round_trip() {
        let mut sites = SiteMap::new();
        sites.insert(String::from("linkA"), datetime(2011, 4, 7, 12, 10, 1));
        sites.insert(String::from("linkB"), datetime(2012, 5, 8, 13, 31, 2));

        let mut service = create_service();
        assert!(service.add(&sites).is_ok());

        let stored = service.get_sites();
        assert!(stored.is_ok());
        assert_eq!(stored.unwrap(), sites);
    }

    fn create_service() -> SiteService {
        let service = SiteService::new(":memory:");
        assert!(service.is_ok());
        service.unwrap()
    }

    fn datetime(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, min, sec).unwrap()
    }
}
