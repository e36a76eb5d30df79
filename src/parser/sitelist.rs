use chrono::NaiveDateTime;
use log::debug;
use roxmltree::{Document, Node};
use thiserror::Error;
use crate::domain::facility::Facility;
use crate::domain::site_map::SiteMap;
use crate::parser::timestamp::{parse_datetime, FormatError};
use crate::util::xml::{get_element, get_elements};

const SITELIST_NS : &'static str = "http://isdcf.com/2010/04/SiteList";
const XLINK_NS : &'static str = "http://www.w3.org/1999/xlink";

#[derive(Error, Debug)]
pub enum SiteListError {
    #[error("site list document is empty")]
    EmptyDocument,
    #[error("site list is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("required element <{0}> is missing")]
    MissingElement(&'static str),
    #[error("<Facility> element is missing the '{0}' attribute")]
    MissingAttribute(&'static str),
    #[error("facility '{id}' has an invalid 'modified' timestamp: {source}")]
    InvalidTimestamp { id: String, source: FormatError }
}

///
/// Extracts the facilities of a site list document. The document is parsed
/// and validated once on construction; [get_sites](SiteListParser::get_sites)
/// can then be queried any number of times with different cutoff times.
///
/// A malformed document never yields a partial result: the first missing
/// element, missing attribute, or unparsable timestamp fails the whole
/// document with a [SiteListError].
///
pub struct SiteListParser {
    sites: SiteMap
}

impl SiteListParser {
    pub fn new(xml: &str) -> Result<Self, SiteListError> {
        if xml.trim().is_empty() {
            return Err(SiteListError::EmptyDocument);
        }
        let document = Document::parse(xml)?;
        let root = document.root_element();
        if !root.has_tag_name((SITELIST_NS, "SiteList")) {
            return Err(SiteListError::MissingElement("SiteList"));
        }
        // A document without <Originator> is not a site list (or got truncated)
        get_element(root, SITELIST_NS, "Originator")
            .ok_or(SiteListError::MissingElement("Originator"))?;
        let facility_list = get_element(root, SITELIST_NS, "FacilityList")
            .ok_or(SiteListError::MissingElement("FacilityList"))?;

        let mut sites = SiteMap::new();
        for node in get_elements(facility_list, SITELIST_NS, "Facility") {
            let facility = Self::parse_facility(node)?;
            // A link listed twice overwrites its earlier entry
            sites.insert(facility.link, facility.modified);
        }
        debug!("Parsed site list with {} facilities", sites.len());
        Ok(Self { sites })
    }

    /// Returns a copy of the link-to-modification-time map, restricted to
    /// facilities modified strictly after the cutoff if one is given.
    pub fn get_sites(&self, cutoff: Option<NaiveDateTime>) -> SiteMap {
        match cutoff {
            Some(cutoff) => self.sites.iter()
                .filter(|(_, &modified)| modified > cutoff)
                .map(|(link, modified)| (link.clone(), modified.clone()))
                .collect(),
            None => self.sites.clone()
        }
    }

    fn parse_facility(node: Node) -> Result<Facility, SiteListError> {
        let id = node.attribute("id")
            .ok_or(SiteListError::MissingAttribute("id"))?;
        let link = node.attribute((XLINK_NS, "href"))
            .ok_or(SiteListError::MissingAttribute("xlink:href"))?;
        let modified = node.attribute("modified")
            .ok_or(SiteListError::MissingAttribute("modified"))?;
        let modified = parse_datetime(modified)
            .map_err(|source| SiteListError::InvalidTimestamp { id: id.to_string(), source })?;
        Ok(Facility::new(id, link, modified))
    }
}
