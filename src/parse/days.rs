use scraper::{ElementRef, Html};

use crate::static_selector;

use super::markup::{child_elements, immediate_text, require, text};
use super::Result;

static_selector!(PLAN_SELECTOR <- "div.speiseplan");
static_selector!(DATE_SELECTOR <- "div.speiseplan_date");
static_selector!(BUILDING_SELECTOR <- "div.speiseplan_building_name");

/// The days of one week in page order, each with the elements holding its counters.
#[derive(Debug, Clone, Default)]
pub struct DayPlan<'a> {
    days: Vec<(String, Vec<ElementRef<'a>>)>,
}

impl<'a> DayPlan<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ElementRef<'a>])> {
        self.days
            .iter()
            .map(|(label, counters)| (label.as_str(), counters.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&[ElementRef<'a>]> {
        self.iter().find(|(l, _)| *l == label).map(|(_, counters)| counters)
    }

    fn commit(mut self, label: String, counters: Vec<ElementRef<'a>>) -> Self {
        // a closed day still shows up, without counters
        match self.days.iter_mut().find(|(l, _)| *l == label) {
            Some(existing) => existing.1 = counters,
            None => self.days.push((label, counters)),
        }
        self
    }
}

/// The counters of one day as a page of their own, for scrubbing.
pub fn day_page(counters: &[ElementRef]) -> Html {
    Html::parse_fragment(&counters.iter().map(ElementRef::html).collect::<String>())
}

enum Child<'a> {
    Date(String),
    Menu(ElementRef<'a>),
    Skip,
}

fn classify(child: ElementRef) -> Child<'_> {
    if child.value().name() != "div" || BUILDING_SELECTOR.matches(&child) {
        Child::Skip
    } else if DATE_SELECTOR.matches(&child) {
        Child::Date(text(child))
    } else if let Some(label) = immediate_text(child) {
        // older pages have date divs without the class
        Child::Date(label.to_string())
    } else {
        Child::Menu(child)
    }
}

/// Splits a week page into days. The plan container alternates date divs and counter
/// divs; every counter div up to the next date belongs to the date before it.
pub fn extract_days(page: &Html) -> Result<DayPlan<'_>> {
    let plan = require(page.root_element(), &PLAN_SELECTOR, "menu plan")?;

    // (finished days, label of the open day, counters of the open day)
    let (days, label, counters) = child_elements(plan).map(classify).fold(
        (DayPlan::default(), None::<String>, vec![]),
        |(days, label, mut counters), child| match child {
            Child::Date(next) => {
                let days = match label {
                    Some(label) => days.commit(label, counters),
                    None if !counters.is_empty() => days.commit(String::new(), counters),
                    None => days,
                };
                (days, Some(next), vec![])
            }
            Child::Menu(element) => {
                counters.push(element);
                (days, label, counters)
            }
            Child::Skip => (days, label, counters),
        },
    );

    let days = match label {
        Some(label) => days.commit(label, counters),
        None if !counters.is_empty() => days.commit(String::new(), counters),
        None => days,
    };
    log::debug!("found {} days in the plan", days.len());
    Ok(days)
}

/// Number of date markers on a page, to tell week pages with several days from
/// week pages that only show today.
pub fn count_days(page: &Html) -> usize {
    page.select(&DATE_SELECTOR).count()
}
