use crate::error::{Error, Result};
use crate::parse::dish_pattern;

/// Hour of the day after which a dish served today counts as already gone.
pub const CUTOFF_HOUR: u32 = 16;

pub const DEFAULT_DISH: &str = "käsespätzle";

/// Dietary icons are linked from here as `<tag>.png`.
pub const IMAGE_BASE_URL: &str =
    "http://www.studierendenwerk-mainz.de/fileadmin/templates/images/speiseplan/";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, clap::ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "de")]
    German,
    #[value(name = "en")]
    English,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Venue {
    #[default]
    Mensa,
    /// Has a special offers box next to the regular counters.
    Mensaria,
}

impl Venue {
    pub const fn building_id(self) -> u32 {
        match self {
            Self::Mensa => 1,
            Self::Mensaria => 7,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mensa => "Mensa",
            Self::Mensaria => "Mensaria",
        }
    }

    pub const fn is_extended(self) -> bool {
        matches!(self, Self::Mensaria)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum QueryKind {
    #[default]
    Day,
    Week,
    NextWeek,
}

impl QueryKind {
    pub const fn display_type(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 2,
            Self::NextWeek => 3,
        }
    }

    pub const fn is_multi_day(self) -> bool {
        !matches!(self, Self::Day)
    }
}

/// Per-language wording of the output. The pages themselves are always German.
/// Templates use `{venue}`, `{kind}`, `{dish}`, `{day}`, `{when}` and `{counter}`
/// placeholders.
#[derive(Debug)]
pub struct Labels {
    /// Word for a counter in headings and answers, followed by its number.
    pub counter: &'static str,
    /// Monday first.
    pub weekdays: [&'static str; 7],
    /// Lines starting with one of these (compared lowercase) are energy values or menu numbers.
    pub noise_prefixes: &'static [&'static str],
    pub recommends: &'static str,
    pub week_plan: &'static str,
    pub day_kind: &'static str,
    pub week_kind: &'static str,
    pub next_week_kind: &'static str,
    pub served_on: &'static str,
    pub today: &'static str,
    pub on_day: &'static str,
    pub at_counter: &'static str,
    pub at_venue: &'static str,
    pub served: &'static str,
    pub date_format: &'static str,
    pub checking: &'static str,
    pub not_found: &'static str,
}

static GERMAN: Labels = Labels {
    counter: "Ausgabe",
    weekdays: [
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
        "Sonntag",
    ],
    noise_prefixes: &["kj", "menü", "menu"],
    recommends: "# Die {venue} empfiehlt:\n",
    week_plan: "# Wochenplan {venue} ({kind}):\n",
    day_kind: "aktueller Tag",
    week_kind: "aktuelle Woche",
    next_week_kind: "nächste Woche",
    served_on: "Es gibt {dish} am {day}",
    today: "Heute",
    on_day: "Am {day}",
    at_counter: "an {counter}",
    at_venue: "in der {venue}",
    served: "{when} gibt's {dish}",
    date_format: "%d.%m.",
    checking: "Suche nach {dish} in der {venue}",
    not_found: "Kein {dish} in nächster Zeit... :-(",
};

static ENGLISH: Labels = Labels {
    counter: "Counter",
    weekdays: [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
    noise_prefixes: &["kj", "menu", "menü"],
    recommends: "# The {venue} recommends:\n",
    week_plan: "# Weekly menu {venue} ({kind}):\n",
    day_kind: "current day",
    week_kind: "current week",
    next_week_kind: "next week",
    served_on: "There will be {dish} on {day}",
    today: "Today",
    on_day: "On {day}",
    at_counter: "at {counter}",
    at_venue: "at the {venue}",
    served: "{when} there is {dish}",
    date_format: "%m/%d",
    checking: "Checking for {dish} in {venue}",
    not_found: "No {dish} in the next time... :-(",
};

impl Language {
    pub const fn labels(self) -> &'static Labels {
        match self {
            Self::German => &GERMAN,
            Self::English => &ENGLISH,
        }
    }
}

impl Labels {
    pub const fn kind(&self, kind: QueryKind) -> &'static str {
        match kind {
            QueryKind::Day => self.day_kind,
            QueryKind::Week => self.week_kind,
            QueryKind::NextWeek => self.next_week_kind,
        }
    }
}

/// Replaces `{key}` placeholders in a label template.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rendering {
    Markdown,
    MarkdownImages,
    Terminal,
}

#[derive(Clone, Debug)]
pub struct Options {
    pub query: QueryKind,
    pub venue: Venue,
    pub language: Language,
    pub detail: bool,
    pub image_rendering: bool,
    pub terminal_rendering: bool,
    pub dish: Option<String>,
    pub cutoff_hour: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            query: QueryKind::Day,
            venue: Venue::Mensa,
            language: Language::German,
            detail: true,
            image_rendering: true,
            terminal_rendering: false,
            dish: None,
            cutoff_hour: CUTOFF_HOUR,
        }
    }
}

impl Options {
    /// Terminal output wins over image links when both are asked for.
    pub const fn rendering(&self) -> Rendering {
        if self.terminal_rendering {
            Rendering::Terminal
        } else if self.image_rendering {
            Rendering::MarkdownImages
        } else {
            Rendering::Markdown
        }
    }

    pub const fn labels(&self) -> &'static Labels {
        self.language.labels()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(dish) = &self.dish {
            if dish.trim().is_empty() {
                return Err(Error::UnsupportedOption(
                    "the dish to check for must not be empty".to_string(),
                ));
            }
            dish_pattern(dish)?;
            if self.query != QueryKind::Day {
                return Err(Error::UnsupportedOption(
                    "a dish check always covers this and next week, drop `week`/`next`"
                        .to_string(),
                ));
            }
        } else if !self.detail {
            return Err(Error::UnsupportedOption(
                "--no-detail only applies to `check`".to_string(),
            ));
        }
        if self.cutoff_hour > 23 {
            return Err(Error::UnsupportedOption(format!(
                "cutoff hour {} is not an hour of the day",
                self.cutoff_hour
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_rendering_wins() {
        let options = Options {
            terminal_rendering: true,
            image_rendering: true,
            ..Options::default()
        };
        assert_eq!(options.rendering(), Rendering::Terminal);
        let options = Options {
            image_rendering: false,
            ..Options::default()
        };
        assert_eq!(options.rendering(), Rendering::Markdown);
        assert_eq!(Options::default().rendering(), Rendering::MarkdownImages);
    }

    #[test]
    fn test_validate() {
        assert!(Options::default().validate().is_ok());
        let check = Options {
            dish: Some("pizza".into()),
            ..Options::default()
        };
        assert!(check.validate().is_ok());
        let empty = Options {
            dish: Some("  ".into()),
            ..Options::default()
        };
        assert!(matches!(empty.validate(), Err(Error::UnsupportedOption(_))));
        let week_check = Options {
            query: QueryKind::Week,
            ..check.clone()
        };
        assert!(week_check.validate().is_err());
        let no_detail = Options {
            detail: false,
            ..Options::default()
        };
        assert!(no_detail.validate().is_err());
        let late = Options {
            cutoff_hour: 24,
            ..Options::default()
        };
        assert!(late.validate().is_err());
    }

    #[test]
    fn test_bad_dish_pattern_fails_validation() {
        let check = Options {
            dish: Some("käse(".into()),
            ..Options::default()
        };
        assert!(matches!(
            check.validate(),
            Err(Error::Parse(crate::parse::Error::Pattern(_)))
        ));
        let regex = Options {
            dish: Some("sp(ä|ae)tzle".into()),
            ..Options::default()
        };
        assert!(regex.validate().is_ok());
    }

    #[test]
    fn test_fill() {
        let labels = Language::German.labels();
        assert_eq!(
            fill(labels.week_plan, &[("venue", "Mensa"), ("kind", labels.kind(QueryKind::NextWeek))]),
            "# Wochenplan Mensa (nächste Woche):\n"
        );
        assert_eq!(
            fill(Language::English.labels().recommends, &[("venue", "Mensaria")]),
            "# The Mensaria recommends:\n"
        );
    }
}
