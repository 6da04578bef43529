//! Turns the counters of a menu page into clean lines of dish text.
//!
//! Vegan and vegetarian icons are kept as `[Vegan]` / `[Veggi]` text tags placed
//! next to the dish they belong to, so the formatter can swap them for images or
//! colors later. Allergen annotations, energy values and menu numbers are dropped.

use std::fmt::Display;

use scraper::{ElementRef, Html, Node};

use crate::config::Labels;
use crate::{static_regex, static_selector};

use super::markup::{stripped_strings, text_node};
use super::remove_excess_whitespace;

/// Stands for a line break until the very end of scrubbing, so it survives trimming.
const LINE_BREAK: &str = "|";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Diet {
    Vegan,
    Vegetarian,
}

impl Diet {
    /// The word used by the page for the icon, also used in the image file name.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Vegan => "Vegan",
            Self::Vegetarian => "Veggi",
        }
    }

    pub(crate) fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Vegan" => Some(Self::Vegan),
            "Veggi" => Some(Self::Vegetarian),
            _ => None,
        }
    }

    fn from_icon_src(src: &str) -> Option<Self> {
        static_regex!(ICON_NAME <- r"Veg..");
        ICON_NAME.find(src).and_then(|m| Self::from_tag(m.as_str()))
    }

    fn marker_node(self) -> Node {
        text_node(&format!(" [{}]", self.tag()))
    }
}

impl Display for Diet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishLine {
    text: String,
    diet: Option<Diet>,
}

impl DishLine {
    pub fn new(text: impl Into<String>) -> Self {
        static_regex!(TAG <- r"\[(Veg[^\]]*)\]");
        let text = text.into();
        let diet = TAG
            .captures(&text)
            .and_then(|c| c.get(1))
            .and_then(|m| Diet::from_tag(m.as_str()));
        Self { text, diet }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn diet(&self) -> Option<Diet> {
        self.diet
    }
}

/// Scrubs every counter on `page`. The page itself is left untouched, the edits
/// happen on a copy.
pub fn scrub(page: &Html, extended: bool, labels: &Labels) -> Vec<DishLine> {
    static_selector!(COUNTER_SELECTOR <- "div.counter_box");
    static_selector!(SPECIAL_BOX_SELECTOR <- "div.specialbox");

    let mut page = page.clone();
    annotate_icons(&mut page, extended);

    let mut lines: Vec<String> = page
        .select(&COUNTER_SELECTOR)
        .flat_map(stripped_strings)
        .map(strip_annotations)
        .collect();

    if extended {
        mark_special_counters(&mut page);
        match page.select(&SPECIAL_BOX_SELECTOR).next() {
            Some(special) => {
                lines.push(LINE_BREAK.to_string());
                lines.extend(stripped_strings(special).map(strip_annotations));
            }
            None => log::debug!("no special offers on this page"),
        }
    }

    let lines = clean_lines(lines, labels);
    log::debug!(
        "scrubbed {} lines, {} of them dietary tags",
        lines.len(),
        lines.iter().filter(|line| line.diet().is_some()).count()
    );
    lines
}

/// Noise removal and whitespace normalization on plain lines. Running it on its own
/// output changes nothing.
pub fn clean_lines<I, S>(lines: I, labels: &Labels) -> Vec<DishLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().is_empty())
        .filter(|line| !is_noise(line.as_ref(), labels))
        .map(|line| DishLine::new(normalize(line.as_ref())))
        .collect()
}

fn strip_annotations(line: &str) -> String {
    static_regex!(PARENTHESES <- r"\(.+?\)");
    PARENTHESES.replace_all(line, "").trim().to_string()
}

fn is_noise(line: &str, labels: &Labels) -> bool {
    let lower = line.to_lowercase();
    labels
        .noise_prefixes
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

fn normalize(line: &str) -> String {
    let line = line.replace('\u{a0}', " ");
    remove_excess_whitespace(&line)
        .trim_end_matches(['-', ' '])
        .replace(LINE_BREAK, "\n")
}

/// Places a tag for every dietary icon next to its dish name.
///
/// Two layouts exist: the icon's parent holds the dish name `<span>` (the tag goes
/// right before it), or the name is elsewhere and the tag goes right after the
/// price div of the icon's grandparent. Icons fitting neither are left without a tag.
fn annotate_icons(page: &mut Html, extended: bool) {
    static_selector!(ICON_SELECTOR <- "div.vegan_icon");
    // the special offers box has no icon div, the images sit right in the dish name
    static_selector!(ANY_ICON_SELECTOR <- "div.vegan_icon, div.spmenuname");
    static_selector!(IMG_SELECTOR <- "img");
    static_selector!(NAME_SELECTOR <- "span");
    static_selector!(PRICE_SELECTOR <- "div.price");

    let holders = if extended {
        &ANY_ICON_SELECTOR
    } else {
        &ICON_SELECTOR
    };
    let mut before_name = vec![];
    let mut after_price = vec![];
    for holder in page.select(holders) {
        let diets = holder
            .select(&IMG_SELECTOR)
            .filter_map(|img| img.value().attr("src"))
            .filter_map(Diet::from_icon_src);
        let parent = holder.parent().and_then(ElementRef::wrap);
        if let Some(name) = parent.and_then(|p| p.select(&NAME_SELECTOR).next()) {
            before_name.extend(diets.map(|diet| (name.id(), diet)));
        } else if let Some(price) = parent
            .and_then(|p| p.parent())
            .and_then(ElementRef::wrap)
            .and_then(|grandparent| grandparent.select(&PRICE_SELECTOR).next())
        {
            after_price.extend(diets.map(|diet| (price.id(), diet)));
        } else {
            for diet in diets {
                log::debug!("no dish name or price next to {diet} icon, dropping the tag");
            }
        }
    }

    for (id, diet) in before_name {
        if let Some(mut name) = page.tree.get_mut(id) {
            name.insert_before(diet.marker_node());
        }
    }
    // inserting right after the price reverses the order, so go backwards
    for (id, diet) in after_price.into_iter().rev() {
        if let Some(mut price) = page.tree.get_mut(id) {
            price.insert_after(diet.marker_node());
        }
    }
}

/// Wraps the name of every special counter into a `###` heading line.
fn mark_special_counters(page: &mut Html) {
    static_selector!(SPECIAL_COUNTER_SELECTOR <- "div.specialcounter");
    static_selector!(NAME_SELECTOR <- "span");

    let names: Vec<_> = page
        .select(&SPECIAL_COUNTER_SELECTOR)
        .filter_map(|counter| counter.select(&NAME_SELECTOR).next())
        .map(|name| name.id())
        .collect();
    for id in names {
        if let Some(mut name) = page.tree.get_mut(id) {
            name.insert_before(text_node("### "));
            name.insert_after(text_node(LINE_BREAK));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use std::fs;

    fn texts(lines: &[DishLine]) -> Vec<&str> {
        lines.iter().map(DishLine::text).collect()
    }

    fn scrub_file(path: &str, extended: bool) -> Vec<DishLine> {
        let html = fs::read_to_string(path).unwrap();
        scrub(&Html::parse_document(&html), extended, Language::German.labels())
    }

    #[test]
    fn test_scrub_day() {
        let lines = scrub_file("./src/parse/html_examples/day.html", false);
        assert_eq!(
            texts(&lines),
            [
                "Ausgabe 1",
                "[Vegan]",
                "Gemüsecurry mit Reis",
                "2,50 €",
                "Ausgabe 2",
                "Schweineschnitzel mit Pommes",
                "3,20 €",
                "Ausgabe 3",
                "[Veggi]",
                "Käsespätzle mit Röstzwiebeln",
                "2,90 €",
                "Salatbuffet",
            ]
        );
        assert_eq!(lines[1].diet(), Some(Diet::Vegan));
        assert_eq!(lines[2].diet(), None);
        assert_eq!(lines[8].diet(), Some(Diet::Vegetarian));
    }

    #[test]
    fn test_icon_after_price_layout() {
        let lines = scrub_file("./src/parse/html_examples/saturday.html", false);
        assert_eq!(
            texts(&lines),
            ["Ausgabe 1", "Linsensuppe", "1,80 €", "[Vegan]", "Ausgabe 2", "Bratwurst", "2,10 €"]
        );
    }

    #[test]
    fn test_icon_tag_appears_once() {
        for path in [
            "./src/parse/html_examples/day.html",
            "./src/parse/html_examples/saturday.html",
        ] {
            let lines = scrub_file(path, false);
            let vegan = lines
                .iter()
                .filter(|l| l.diet() == Some(Diet::Vegan))
                .count();
            assert_eq!(vegan, 1, "{path}");
        }
    }

    #[test]
    fn test_scrub_special_offers() {
        let lines = scrub_file("./src/parse/html_examples/mensaria.html", true);
        assert_eq!(
            texts(&lines),
            [
                "Ausgabe 1",
                "Pizza Margherita",
                "3,00 €",
                "\n",
                "###",
                "Snack",
                "\n",
                "[Veggi]",
                "Laugenbrezel",
                "0,90 €",
            ]
        );
    }

    #[test]
    fn test_scrub_leaves_input_alone() {
        let html = fs::read_to_string("./src/parse/html_examples/day.html").unwrap();
        let doc = Html::parse_document(&html);
        let before = doc.html();
        let first = scrub(&doc, true, Language::German.labels());
        assert_eq!(doc.html(), before);
        assert_eq!(scrub(&doc, true, Language::German.labels()), first);
    }

    #[test]
    fn test_noise_is_dropped() {
        let labels = Language::German.labels();
        let lines = clean_lines(
            ["kJ 1500", "KJ 800 / kcal 190", "Menü 3", "Menu 3", "", "Ausgabe 1 -", "Tofu"],
            labels,
        );
        assert_eq!(texts(&lines), ["Ausgabe 1", "Tofu"]);
        // English pages use the same spellings
        let lines = clean_lines(["menü 2", "Menu 2", "kj 10", "Soup"], Language::English.labels());
        assert_eq!(texts(&lines), ["Soup"]);
    }

    #[test]
    fn test_whitespace_normalization() {
        let lines = clean_lines(
            ["Nudeln\u{a0} mit   Soße", "Ausgabe 2 - ", "|"],
            Language::German.labels(),
        );
        assert_eq!(texts(&lines), ["Nudeln mit Soße", "Ausgabe 2", "\n"]);
    }

    #[test]
    fn test_strip_annotations() {
        assert_eq!(strip_annotations("Schnitzel (1,2,Gl) mit Pommes (3)"), "Schnitzel  mit Pommes");
        assert_eq!(strip_annotations("(A,B)"), "");
    }

    #[test]
    fn test_clean_lines_is_idempotent() {
        let labels = Language::German.labels();
        for (path, extended) in [
            ("./src/parse/html_examples/day.html", false),
            ("./src/parse/html_examples/mensaria.html", true),
        ] {
            let once = scrub_file(path, extended);
            let twice = clean_lines(texts(&once), labels);
            assert_eq!(once, twice);
            assert!(once.iter().all(|l| !l.text().contains('(')));
            assert!(once.iter().all(|l| !l.text().contains("  ")));
        }
    }

    #[test]
    fn test_diet_from_icon_src() {
        assert_eq!(
            Diet::from_icon_src("/fileadmin/templates/images/speiseplan/Vegan.png"),
            Some(Diet::Vegan)
        );
        assert_eq!(Diet::from_icon_src("images/Veggi.png"), Some(Diet::Vegetarian));
        assert_eq!(Diet::from_icon_src("images/Vegxx.png"), None);
        assert_eq!(Diet::from_icon_src("images/Fisch.png"), None);
    }
}
