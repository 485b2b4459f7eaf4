//! Selection strategies and the per-field fallback chains
//!
//! A [`Strategy`] names one way of finding an element inside a listing card.
//! Fields are resolved by walking a chain of strategies in order, current
//! markup first and legacy markup last.

use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// One way of locating an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `tag.class`
    Class {
        tag: &'static str,
        class: &'static str,
    },
    /// `tag[data-testid="id"]`
    TestId {
        tag: &'static str,
        id: &'static str,
    },
    /// `tag[attr]`
    HasAttr {
        tag: &'static str,
        attr: &'static str,
    },
    /// Any element with this tag name
    Tag(&'static str),
}

impl Strategy {
    /// CSS selector text for this strategy
    pub fn css(&self) -> String {
        match self {
            Strategy::Class { tag, class } => format!("{}.{}", tag, class),
            Strategy::TestId { tag, id } => format!("{}[data-testid=\"{}\"]", tag, id),
            Strategy::HasAttr { tag, attr } => format!("{}[{}]", tag, attr),
            Strategy::Tag(tag) => (*tag).to_string(),
        }
    }

    fn selector(&self) -> Option<Selector> {
        match Selector::parse(&self.css()) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::debug!(strategy = %self, error = %e, "Unparsable selector");
                None
            },
        }
    }

    /// First matching descendant of `scope`; `scope` itself never matches
    pub fn find<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let selector = self.selector()?;
        scope
            .select(&selector)
            .find(|element| element.id() != scope.id())
    }

    /// Every matching element of a whole document
    pub fn find_all<'a>(&self, page: &'a Html) -> Vec<ElementRef<'a>> {
        match self.selector() {
            Some(selector) => page.select(&selector).collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

/// Text of an element: all text nodes joined, whitespace runs collapsed, trimmed
pub fn normalized_text(element: ElementRef<'_>) -> String {
    let joined: String = element.text().collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Walk a chain and return the first element with non-empty text, along with that text
pub fn first_text<'a>(
    scope: ElementRef<'a>,
    chain: &[Strategy],
) -> Option<(ElementRef<'a>, String)> {
    chain.iter().find_map(|strategy| {
        let element = strategy.find(scope)?;
        let text = normalized_text(element);
        (!text.is_empty()).then_some((element, text))
    })
}

// ============================================================================
// Field chains
// ============================================================================

/// Listing containers on a search results page
pub const CONTAINERS: &[Strategy] = &[
    Strategy::Class {
        tag: "div",
        class: "job_seen_beacon",
    },
    Strategy::Class {
        tag: "div",
        class: "slider_container",
    },
    Strategy::Class {
        tag: "div",
        class: "cardOutline",
    },
    Strategy::Class {
        tag: "td",
        class: "resultContent",
    },
    Strategy::HasAttr {
        tag: "div",
        attr: "data-jk",
    },
    Strategy::Class {
        tag: "a",
        class: "tapItem",
    },
];

pub const TITLE: &[Strategy] = &[
    Strategy::Class {
        tag: "h2",
        class: "jobTitle",
    },
    Strategy::HasAttr {
        tag: "span",
        attr: "title",
    },
    Strategy::Class {
        tag: "a",
        class: "jcs-JobTitle",
    },
    Strategy::Tag("h2"),
];

pub const COMPANY: &[Strategy] = &[
    Strategy::Class {
        tag: "span",
        class: "companyName",
    },
    Strategy::TestId {
        tag: "span",
        id: "company-name",
    },
    Strategy::Class {
        tag: "span",
        class: "css-63koeb",
    },
];

pub const LOCATION: &[Strategy] = &[
    Strategy::Class {
        tag: "div",
        class: "companyLocation",
    },
    Strategy::TestId {
        tag: "div",
        id: "text-location",
    },
    Strategy::Class {
        tag: "div",
        class: "css-1p0sjhy",
    },
];

pub const SALARY: &[Strategy] = &[
    Strategy::Class {
        tag: "div",
        class: "salary-snippet",
    },
    Strategy::Class {
        tag: "span",
        class: "salary",
    },
    Strategy::TestId {
        tag: "div",
        id: "attribute_snippet_testid",
    },
];

pub const POSTED_DATE: &[Strategy] = &[
    Strategy::Class {
        tag: "span",
        class: "date",
    },
    Strategy::TestId {
        tag: "span",
        id: "myJobsStateDate",
    },
    Strategy::Class {
        tag: "span",
        class: "css-qvloho",
    },
];

pub const DESCRIPTION: &[Strategy] = &[
    Strategy::Class {
        tag: "div",
        class: "job-snippet",
    },
    Strategy::Class {
        tag: "div",
        class: "metadata",
    },
    Strategy::Tag("ul"),
    Strategy::Class {
        tag: "div",
        class: "css-9446fg",
    },
];

/// Metadata blob the job type keywords are matched against
pub const JOB_TYPE: &[Strategy] = &[Strategy::Class {
    tag: "div",
    class: "metadata",
}];
