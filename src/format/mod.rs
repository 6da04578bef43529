//! Renders scrubbed dish lines as Markdown, optionally with icon images, or as
//! colored terminal text.

use colored::Colorize;
use regex::Captures;

use crate::config::{fill, Labels, Rendering, Venue, IMAGE_BASE_URL};
use crate::parse::{Diet, DishLine, MenuDocument};
use crate::static_regex;

static_regex!(DIET_TAG <- r"\[(Veg[^\]]*)\]");

/// Formats the dishes of one day. Without a day label the venue's
/// "recommends" heading is used instead.
pub fn format_day(
    dishes: &[DishLine],
    day: Option<&str>,
    venue: Venue,
    labels: &Labels,
    rendering: Rendering,
) -> String {
    // the page is always German, the heading follows the output language
    static_regex!(COUNTER_HEADING <- r"\s*Ausgabe\s(\d+)");
    static_regex!(LEADING_SPACE <- r"\n\s");
    static_regex!(SALAD_BUFFET <- r"\s+Salatbuffet");

    let mut menu = match day {
        Some(day) => format!("\n \n# {day}\n"),
        None => fill(labels.recommends, &[("venue", venue.name())]),
    };
    menu.push_str(&dishes.iter().map(DishLine::text).collect::<Vec<_>>().join(" "));

    let menu = COUNTER_HEADING.replace_all(&menu, |caps: &Captures| {
        format!("\n \n## {} {}\n", labels.counter, &caps[1])
    });
    let menu = LEADING_SPACE.replace_all(&menu, "\n");
    // the salad buffet has no counter of its own and ends up glued to the last dish
    let menu = SALAD_BUFFET.replace_all(&menu, "\nSalatbuffet");

    match rendering {
        Rendering::Markdown => menu.into_owned(),
        Rendering::MarkdownImages => DIET_TAG
            .replace_all(&menu, format!("![${{1}}]({IMAGE_BASE_URL}${{1}}.png)").as_str())
            .into_owned(),
        Rendering::Terminal => to_terminal(&menu),
    }
}

/// Formats a whole document: the week heading and every day, or a single day.
pub fn format_document(document: &MenuDocument, rendering: Rendering) -> String {
    let labels = document.labels();
    let dishes = document.dishes();
    let days = dishes
        .iter()
        .map(|(day, lines)| format_day(lines, *day, document.venue, labels, rendering));

    match dishes.first() {
        Some((Some(_), _)) => {
            let heading = fill(
                labels.week_plan,
                &[
                    ("venue", document.venue.name()),
                    ("kind", labels.kind(document.query)),
                ],
            );
            let heading = match rendering {
                Rendering::Terminal => to_terminal(&heading),
                Rendering::Markdown | Rendering::MarkdownImages => heading,
            };
            std::iter::once(heading).chain(days).collect()
        }
        _ => days.collect(),
    }
}

fn to_terminal(menu: &str) -> String {
    let menu = DIET_TAG.replace_all(menu, |caps: &Captures| {
        let tag = &caps[0];
        match Diet::from_tag(&caps[1]) {
            Some(Diet::Vegan) => tag.green().to_string(),
            Some(Diet::Vegetarian) => tag.red().to_string(),
            None => tag.to_string(),
        }
    });
    menu.split('\n')
        .map(|line| {
            if line.starts_with('#') {
                line.trim_start_matches('#')
                    .trim_start()
                    .bold()
                    .underline()
                    .to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
