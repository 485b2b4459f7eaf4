//! Listing card extraction
//!
//! Turns the HTML of one search result card into a [`JobRecord`]. Every field
//! is resolved through its own fallback chain (see [`strategy`]); a field that
//! cannot be resolved keeps the `N/A` sentinel. A card whose title cannot
//! be resolved is rejected.

pub mod strategy;

use jobscout_common::{JobRecord, JobType};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};
use url::Url;

pub use strategy::Strategy;

/// Outcome of running the extractor over a whole page
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    /// Number of listing containers found, whether or not they produced a record
    pub containers: usize,
    pub records: Vec<JobRecord>,
}

impl PageExtraction {
    /// A page with no containers ends pagination
    pub fn is_exhausted(&self) -> bool {
        self.containers == 0
    }
}

/// Field extractor bound to a site origin
#[derive(Debug, Clone)]
pub struct Extractor {
    base: Url,
}

impl Extractor {
    /// `base` is used to absolutize job links when the page has no `<base href>`.
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Listing containers of a page: the first container strategy with any match
    pub fn containers<'a>(page: &'a Html) -> Vec<ElementRef<'a>> {
        strategy::CONTAINERS
            .iter()
            .map(|strategy| (strategy, strategy.find_all(page)))
            .find(|(_, cards)| !cards.is_empty())
            .map(|(strategy, cards)| {
                trace!(container = %strategy, count = cards.len(), "Matched listing containers");
                cards
            })
            .unwrap_or_default()
    }

    /// Locate every container on `page` and extract the ones with a title
    pub fn extract_page(&self, page: &Html) -> PageExtraction {
        let cards = Self::containers(page);
        let base = self.page_base(page);

        let records = cards
            .iter()
            .filter_map(|card| self.extract_with_base(*card, &base))
            .collect();

        PageExtraction {
            containers: cards.len(),
            records,
        }
    }

    /// Extract one card, or `None` when no title resolves
    pub fn extract(&self, card: ElementRef<'_>, page: &Html) -> Option<JobRecord> {
        let base = self.page_base(page);
        self.extract_with_base(card, &base)
    }

    fn extract_with_base(&self, card: ElementRef<'_>, base: &Url) -> Option<JobRecord> {
        let mut record = JobRecord::untitled();

        let Some((title_element, title)) = strategy::first_text(card, strategy::TITLE) else {
            debug!("Dropping listing card without a title");
            return None;
        };
        record.title = title;
        if let Some(url) = job_url(title_element, base) {
            record.job_url = url;
        }

        if let Some((_, company)) = strategy::first_text(card, strategy::COMPANY) {
            record.company = company;
        }
        if let Some((_, location)) = strategy::first_text(card, strategy::LOCATION) {
            record.location = location;
        }
        if let Some((_, salary)) = strategy::first_text(card, strategy::SALARY) {
            record.salary = salary;
        }
        if let Some((_, posted)) = strategy::first_text(card, strategy::POSTED_DATE) {
            record.posted_date = posted;
        }
        if let Some((_, description)) = strategy::first_text(card, strategy::DESCRIPTION) {
            record.set_description(&description);
        }
        if let Some((_, metadata)) = strategy::first_text(card, strategy::JOB_TYPE) {
            record.job_type = JobType::from_metadata(&metadata).to_string();
        }

        if !record.has_title() {
            return None;
        }

        trace!(title = %record.title, company = %record.company, "Extracted listing");
        Some(record)
    }

    /// Base for relative links: the document's `<base href>` if any, else the site origin
    fn page_base(&self, page: &Html) -> Url {
        Selector::parse("base[href]")
            .ok()
            .and_then(|selector| {
                page.select(&selector)
                    .next()
                    .and_then(|base| base.value().attr("href"))
                    .and_then(|href| self.base.join(href.trim()).ok())
            })
            .unwrap_or_else(|| self.base.clone())
    }
}

/// Absolute URL of the anchor that is, or sits inside, the title element
fn job_url(title: ElementRef<'_>, base: &Url) -> Option<String> {
    let anchor = if title.value().name() == "a" {
        title
    } else {
        Strategy::Tag("a").find(title)?
    };

    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }

    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!(href = %href, error = %e, "Unresolvable job link");
            None
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use jobscout_common::record::MAX_DESCRIPTION_CHARS;
    use jobscout_common::UNKNOWN;

    fn extractor() -> Extractor {
        Extractor::new(Url::parse("https://www.indeed.com").unwrap())
    }

    fn extract_first(html: &str) -> Option<JobRecord> {
        let page = Html::parse_document(html);
        let cards = Extractor::containers(&page);
        assert_eq!(cards.len(), 1, "expected exactly one card");
        extractor().extract(cards[0], &page)
    }

    const CURRENT_CARD: &str = r#"
        <div class="job_seen_beacon">
          <h2 class="jobTitle"><a href="/rc/clk?jk=abc123">Software Engineer</a></h2>
          <span class="companyName">Acme Corp</span>
          <div class="companyLocation">Austin, TX</div>
          <div class="salary-snippet">$120,000 a year</div>
          <span class="date">Posted 3 days ago</span>
          <div class="job-snippet"><ul><li>Build   services</li>
            <li>in Rust</li></ul></div>
          <div class="metadata">Full-time, Remote</div>
        </div>"#;

    #[test]
    fn test_current_markup() {
        let record = extract_first(CURRENT_CARD).unwrap();
        assert_eq!(record.title, "Software Engineer");
        assert_eq!(record.company, "Acme Corp");
        assert_eq!(record.location, "Austin, TX");
        assert_eq!(record.salary, "$120,000 a year");
        assert_eq!(record.posted_date, "Posted 3 days ago");
        assert_eq!(record.description, "Build services in Rust");
        assert_eq!(record.job_type, "Full-time");
        assert_eq!(record.job_url, "https://www.indeed.com/rc/clk?jk=abc123");
    }

    #[test]
    fn test_title_fallbacks_resolve_same_title() {
        let variants = [
            r#"<div class="job_seen_beacon"><h2 class="jobTitle">Data Analyst</h2></div>"#,
            r#"<div class="job_seen_beacon"><span title="Data Analyst">Data Analyst</span></div>"#,
            r#"<div class="job_seen_beacon"><a class="jcs-JobTitle" href="/x">Data Analyst</a></div>"#,
            r#"<div class="job_seen_beacon"><h2>  Data
                 Analyst </h2></div>"#,
        ];
        for html in variants {
            let record = extract_first(html).unwrap();
            assert_eq!(record.title, "Data Analyst", "for {}", html);
        }
    }

    #[test]
    fn test_legacy_company_and_location_markers() {
        let html = r#"
            <div data-jk="1">
              <h2>Nurse</h2>
              <span class="css-63koeb">General Hospital</span>
              <div data-testid="text-location">Dallas, TX</div>
              <div data-testid="attribute_snippet_testid">$40 an hour</div>
              <span data-testid="myJobsStateDate">Today</span>
            </div>"#;
        let record = extract_first(html).unwrap();
        assert_eq!(record.company, "General Hospital");
        assert_eq!(record.location, "Dallas, TX");
        assert_eq!(record.salary, "$40 an hour");
        assert_eq!(record.posted_date, "Today");
    }

    #[test]
    fn test_card_without_title_is_rejected() {
        let html = r#"
            <div class="job_seen_beacon">
              <span class="companyName">Acme Corp</span>
              <div class="companyLocation">Austin, TX</div>
            </div>"#;
        assert!(extract_first(html).is_none());
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let html = r#"<div class="job_seen_beacon"><h2 class="jobTitle">   </h2></div>"#;
        assert!(extract_first(html).is_none());
    }

    #[test]
    fn test_missing_fields_keep_sentinel() {
        let html = r#"<div class="cardOutline"><h2 class="jobTitle">Welder</h2></div>"#;
        let record = extract_first(html).unwrap();
        assert_eq!(record.company, UNKNOWN);
        assert_eq!(record.salary, UNKNOWN);
        assert_eq!(record.job_type, UNKNOWN);
        assert_eq!(record.job_url, UNKNOWN);
    }

    #[test]
    fn test_description_truncated_to_limit() {
        let long = "word ".repeat(300);
        let html = format!(
            r#"<div class="job_seen_beacon"><h2 class="jobTitle">Writer</h2><div class="job-snippet">{}</div></div>"#,
            long
        );
        let record = extract_first(&html).unwrap();
        assert_eq!(record.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_absolute_href_kept() {
        let html = r#"<div class="job_seen_beacon"><h2 class="jobTitle"><a href="https://jobs.example.com/42">Chef</a></h2></div>"#;
        let record = extract_first(html).unwrap();
        assert_eq!(record.job_url, "https://jobs.example.com/42");
    }

    #[test]
    fn test_page_base_href_wins() {
        let html = r#"
            <html><head><base href="https://uk.indeed.com/"></head>
            <body><div class="job_seen_beacon"><h2 class="jobTitle"><a href="/viewjob?jk=9">Chef</a></h2></div></body></html>"#;
        let record = extract_first(html).unwrap();
        assert_eq!(record.job_url, "https://uk.indeed.com/viewjob?jk=9");
    }

    #[test]
    fn test_job_type_from_metadata() {
        let html = r#"<div class="job_seen_beacon"><h2 class="jobTitle">Tutor</h2><div class="metadata">Part-time · Remote</div></div>"#;
        assert_eq!(extract_first(html).unwrap().job_type, "Part-time");
    }

    #[test]
    fn test_container_priority() {
        let html = r#"
            <div class="slider_container"><h2>A</h2></div>
            <div class="job_seen_beacon"><h2>B</h2></div>
            <div class="job_seen_beacon"><h2>C</h2></div>"#;
        let page = Html::parse_document(html);
        let extraction = extractor().extract_page(&page);
        assert_eq!(extraction.containers, 2);
        let titles: Vec<_> = extraction.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
    }

    #[test]
    fn test_page_without_containers_is_exhausted() {
        let page = Html::parse_document("<html><body><p>No results</p></body></html>");
        let extraction = extractor().extract_page(&page);
        assert!(extraction.is_exhausted());
        assert!(extraction.records.is_empty());
    }

    #[test]
    fn test_rejected_cards_still_count_as_containers() {
        let html = r#"<div class="job_seen_beacon"><span class="companyName">X</span></div>"#;
        let page = Html::parse_document(html);
        let extraction = extractor().extract_page(&page);
        assert_eq!(extraction.containers, 1);
        assert!(extraction.records.is_empty());
        assert!(!extraction.is_exhausted());
    }
}
