use scraper::Html;

use crate::config::{Labels, Language, QueryKind, Venue};
use crate::static_selector;

use super::days::{count_days, day_page, extract_days};
use super::scrub::{scrub, DishLine};
use super::{Error, Result};

#[derive(Debug, Clone)]
pub enum Menu {
    /// The whole page, holding the counters of one day (or a week page that only
    /// lists one day).
    Day(Html),
    /// Each day's counters as a page of its own.
    Week(Vec<(String, Html)>),
}

/// A parsed menu page together with what was asked for.
#[derive(Debug, Clone)]
pub struct MenuDocument {
    pub menu: Menu,
    pub query: QueryKind,
    pub venue: Venue,
    pub language: Language,
}

impl MenuDocument {
    pub fn from_html(
        html: &str,
        query: QueryKind,
        venue: Venue,
        language: Language,
    ) -> Result<Self> {
        let page = Html::parse_document(html);
        let menu = if query.is_multi_day() && count_days(&page) > 1 {
            let days = extract_days(&page)?
                .iter()
                .map(|(day, counters)| (day.to_string(), day_page(counters)))
                .collect();
            Menu::Week(days)
        } else {
            ensure_counters(&page, venue)?;
            Menu::Day(page)
        };
        Ok(Self {
            menu,
            query,
            venue,
            language,
        })
    }

    pub fn labels(&self) -> &'static Labels {
        self.language.labels()
    }

    /// Scrubbed dish lines, one entry per day. A single-day menu has no day label.
    pub fn dishes(&self) -> Vec<(Option<&str>, Vec<DishLine>)> {
        let extended = self.venue.is_extended();
        match &self.menu {
            Menu::Day(page) => vec![(None, scrub(page, extended, self.labels()))],
            Menu::Week(days) => days
                .iter()
                .map(|(day, page)| (Some(day.as_str()), scrub(page, extended, self.labels())))
                .collect(),
        }
    }
}

fn ensure_counters(page: &Html, venue: Venue) -> Result<()> {
    static_selector!(COUNTER_SELECTOR <- "div.counter_box");
    static_selector!(SPECIAL_BOX_SELECTOR <- "div.specialbox");

    let has_counters = page.select(&COUNTER_SELECTOR).next().is_some()
        || (venue.is_extended() && page.select(&SPECIAL_BOX_SELECTOR).next().is_some());
    if has_counters {
        Ok(())
    } else {
        Err(Error::structure_error(
            "no counters on the page, the venue is probably closed",
        ))
    }
}
