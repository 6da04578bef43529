use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Regex, RegexBuilder};
use scraper::ElementRef;

use crate::config::{fill, Labels, Venue};
use crate::static_regex;

use super::days::DayPlan;
use super::markup::find_text;
use super::{Error, Result};

/// The first place in a week where a dish shows up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishMatch<'a> {
    pub day: &'a str,
    /// The whole text run that matched, annotations included.
    pub text: &'a str,
    /// Number of the counter serving it, as printed on the page.
    pub counter: Option<String>,
}

impl DishMatch<'_> {
    /// The matched dish without allergen annotations.
    pub fn dish_name(&self) -> String {
        static_regex!(ANNOTATION <- r"\s?\(.*?\)");
        ANNOTATION.replace_all(self.text.trim(), "").trim().to_string()
    }
}

/// When a matched day is, seen from `now`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Serving {
    pub date: NaiveDate,
    pub days_from_now: i64,
    pub hours_until_cutoff: f64,
}

impl Serving {
    /// Parses the `dd-mm-yyyy` date out of a day label like `Dienstag 13-10-2026`.
    pub fn from_day_label(label: &str, now: NaiveDateTime, cutoff_hour: u32) -> Result<Self> {
        static_regex!(DATE <- r"\d+-\d+-\d+");
        let date_str = DATE
            .find(label)
            .ok_or_else(|| Error::DateParse(format!("no date in day label `{label}`")))?
            .as_str();
        let date = NaiveDate::parse_from_str(date_str, "%d-%m-%Y")?;
        let cutoff = NaiveTime::from_hms_opt(cutoff_hour, 0, 0)
            .ok_or_else(|| Error::date_parse_error("cutoff hour is not an hour of the day"))?;
        let until_cutoff = date.and_time(cutoff) - now;
        #[allow(clippy::cast_precision_loss)]
        let hours_until_cutoff = until_cutoff.num_seconds() as f64 / 3600.0;
        Ok(Self {
            date,
            days_from_now: (date - now.date()).num_days(),
            hours_until_cutoff,
        })
    }

    /// Served today and not over yet.
    pub fn is_today(&self) -> bool {
        self.days_from_now == 0 && self.hours_until_cutoff > 0.0
    }
}

/// The dish to look for is a regular expression, matched case-insensitively.
pub fn dish_pattern(dish: &str) -> Result<Regex> {
    RegexBuilder::new(dish)
        .case_insensitive(true)
        .build()
        .map_err(From::from)
}

/// Searches the days in order and stops at the first day containing `pattern`.
pub fn find_dish<'p>(plan: &'p DayPlan<'_>, pattern: &Regex) -> Option<DishMatch<'p>> {
    plan.iter().find_map(|(day, groups)| {
        groups.iter().find_map(|group| {
            let (holder, text) = find_text(*group, |t| pattern.is_match(t))?;
            let counter = counter_near(holder, *group);
            Some(DishMatch { day, text, counter })
        })
    })
}

/// The counter name is a text somewhere next to the dish. Looks outwards from
/// `holder`, but not past the day's `group`.
fn counter_near(holder: ElementRef, group: ElementRef) -> Option<String> {
    // the page is always German, whatever language the answer is in
    static_regex!(COUNTER <- r"Ausgabe\s*(\d+)");
    std::iter::successors(Some(holder), |element| {
        if *element == group {
            None
        } else {
            element.parent().and_then(ElementRef::wrap)
        }
    })
    .find_map(|element| {
        element
            .text()
            .find_map(|t| COUNTER.captures(t))
            .and_then(|caps| caps.get(1))
            .map(|number| number.as_str().to_string())
    })
}

/// Answers "when is `dish` served" for one week, `None` if it is not on the plan.
pub fn check_dish(
    plan: &DayPlan,
    dish: &str,
    venue: Venue,
    detail: bool,
    labels: &Labels,
    now: NaiveDateTime,
    cutoff_hour: u32,
) -> Result<Option<String>> {
    let pattern = dish_pattern(dish)?;
    let Some(found) = find_dish(plan, &pattern) else {
        return Ok(None);
    };
    if !detail {
        return Ok(Some(fill(
            labels.served_on,
            &[("dish", title_case(dish).as_str()), ("day", found.day)],
        )));
    }

    let serving = Serving::from_day_label(found.day, now, cutoff_hour)?;
    if serving.is_today() {
        log::info!("hit today, {:.1} hours left", serving.hours_until_cutoff);
    } else {
        log::info!("hit in {} days", serving.days_from_now);
    }

    let when = if serving.is_today() {
        labels.today.to_string()
    } else {
        let weekday = labels.weekdays[serving.date.weekday().num_days_from_monday() as usize];
        let day = format!("{weekday}, {}", serving.date.format(labels.date_format));
        fill(labels.on_day, &[("day", day.as_str())])
    };
    let mut answer = fill(
        labels.served,
        &[("when", when.as_str()), ("dish", found.dish_name().as_str())],
    );

    let location = if venue.is_extended() {
        Some(fill(labels.at_venue, &[("venue", venue.name())]))
    } else {
        found
            .counter
            .as_deref()
            .map(|number| {
                let counter = format!("{} {number}", labels.counter);
                fill(labels.at_counter, &[("counter", counter.as_str())])
            })
    };
    if let Some(location) = location {
        answer.push(' ');
        answer.push_str(&location);
    }
    Ok(Some(answer))
}

/// Capitalizes the first letter of every word, lowercasing the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
