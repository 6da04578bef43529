#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod config;
mod error;
mod fetch;
mod format;
mod parse;

use std::future::Future;
use std::process::ExitCode;

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use reqwest::Client;
use scraper::Html;

use crate::config::{fill, Language, Options, QueryKind, Venue, DEFAULT_DISH};
use crate::parse::{check_dish, extract_days, title_case, MenuDocument};

pub use error::Result;

/// Exit status when a dish check finds nothing in this or next week.
const NOT_FOUND: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "mensa_menu", about = "Show the menu of the Mensa or Mensaria")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Use the Mensaria instead of the Mensa
    #[arg(long, global = true)]
    mensaria: bool,

    /// Plain Markdown, without icon images
    #[arg(long, global = true)]
    no_img: bool,

    /// Colored terminal output instead of Markdown
    #[arg(long, global = true)]
    terminal: bool,

    /// Language of headings and answers
    #[arg(long, value_enum, default_value_t = Language::German, global = true)]
    lang: Language,

    /// Only name the day in `check` answers
    #[arg(long, global = true)]
    no_detail: bool,

    /// Hour after which today's menu counts as over
    #[arg(long, default_value_t = config::CUTOFF_HOUR, global = true)]
    cutoff_hour: u32,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Today's menu (default)
    Day,
    /// This week's menu
    Week,
    /// Next week's menu
    Next,
    /// When is a dish served this or next week?
    Check {
        #[arg(default_value = DEFAULT_DISH)]
        dish: String,
    },
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        let (query, dish) = match cli.command {
            None | Some(Command::Day) => (QueryKind::Day, None),
            Some(Command::Week) => (QueryKind::Week, None),
            Some(Command::Next) => (QueryKind::NextWeek, None),
            Some(Command::Check { dish }) => (QueryKind::Day, Some(dish)),
        };
        Self {
            query,
            venue: if cli.mensaria {
                Venue::Mensaria
            } else {
                Venue::Mensa
            },
            language: cli.lang,
            detail: !cli.no_detail,
            image_rendering: !cli.no_img,
            terminal_rendering: cli.terminal,
            dish,
            cutoff_hour: cli.cutoff_hour,
        }
    }
}

/// Prints the menu, returns `false` if a dish check found nothing.
async fn run(options: &Options) -> Result<bool> {
    options.validate()?;
    let client = fetch::make_client()?;
    match &options.dish {
        Some(dish) => check(&client, options, dish).await,
        None => {
            let html = fetch::menu_page(&client, options.venue, options.query).await?;
            let document =
                MenuDocument::from_html(&html, options.query, options.venue, options.language)?;
            println!("{}", format::format_document(&document, options.rendering()));
            Ok(true)
        }
    }
}

async fn check(client: &Client, options: &Options, dish: &str) -> Result<bool> {
    let labels = options.labels();
    let title = title_case(dish);
    println!(
        "{}",
        fill(
            labels.checking,
            &[("dish", title.as_str()), ("venue", options.venue.name())]
        )
    );
    let pages = move |query| fetch::menu_page(client, options.venue, query);
    match find_in_weeks(pages, options, dish, Local::now().naive_local()).await? {
        Some(answer) => {
            println!("{answer}");
            Ok(true)
        }
        None => {
            println!("{}", fill(labels.not_found, &[("dish", title.as_str())]));
            Ok(false)
        }
    }
}

/// Looks for `dish` in this week's plan, and in next week's only if this week has
/// nothing. `fetch` hands out one page per query kind.
async fn find_in_weeks<F, Fut>(
    mut fetch: F,
    options: &Options,
    dish: &str,
    now: NaiveDateTime,
) -> Result<Option<String>>
where
    F: FnMut(QueryKind) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    for query in [QueryKind::Week, QueryKind::NextWeek] {
        let html = fetch(query).await?;
        let page = Html::parse_document(&html);
        let plan = extract_days(&page)?;
        if plan.is_empty() {
            log::warn!("the {query:?} page lists no days");
        }
        let answer = check_dish(
            &plan,
            dish,
            options.venue,
            options.detail,
            options.labels(),
            now,
            options.cutoff_hour,
        )?;
        if answer.is_some() {
            return Ok(answer);
        }
        log::debug!("no {dish} in {query:?}");
    }
    Ok(None)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    pretty_env_logger::init();
    let options = Options::from(Cli::parse());
    match run(&options).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(NOT_FOUND),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> Options {
        Options::from(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_defaults() {
        let options = options(&["mensa_menu"]);
        assert_eq!(options.query, QueryKind::Day);
        assert_eq!(options.venue, Venue::Mensa);
        assert_eq!(options.language, Language::German);
        assert!(options.detail);
        assert!(options.image_rendering);
        assert!(!options.terminal_rendering);
        assert_eq!(options.dish, None);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_week_queries() {
        assert_eq!(options(&["mensa_menu", "week"]).query, QueryKind::Week);
        let next = options(&["mensa_menu", "next", "--mensaria", "--no-img"]);
        assert_eq!(next.query, QueryKind::NextWeek);
        assert_eq!(next.venue, Venue::Mensaria);
        assert!(!next.image_rendering);
    }

    #[test]
    fn test_check_command() {
        let check = options(&["mensa_menu", "check"]);
        assert_eq!(check.dish.as_deref(), Some(DEFAULT_DISH));
        let check = options(&["mensa_menu", "check", "pizza", "--no-detail", "--lang", "en"]);
        assert_eq!(check.dish.as_deref(), Some("pizza"));
        assert!(!check.detail);
        assert_eq!(check.language, Language::English);
        assert!(check.validate().is_ok());
    }

    #[test]
    fn test_unknown_options_are_rejected() {
        assert!(Cli::try_parse_from(["mensa_menu", "tomorrow"]).is_err());
        assert!(Cli::try_parse_from(["mensa_menu", "--lang", "fr"]).is_err());
        let no_detail = options(&["mensa_menu", "week", "--no-detail"]);
        assert!(no_detail.validate().is_err());
    }

    const NO_SPAETZLE: &str = r#"<div class="speiseplan">
        <div class="speiseplan_date">Montag 05-10-2026</div>
        <div class="speiseplan_day"><div class="counter_box">
        <div class="counter_name">Ausgabe 1</div><span>Pizza</span></div></div></div>"#;
    const CLOSED: &str = "<p>Heute geschlossen</p>";

    async fn search(week: &str, next: &str) -> (Result<Option<String>>, Vec<QueryKind>) {
        let mut fetched = vec![];
        let options = Options {
            dish: Some(DEFAULT_DISH.to_string()),
            ..Options::default()
        };
        let now = NaiveDateTime::parse_from_str("2026-10-12 09:00", "%Y-%m-%d %H:%M").unwrap();
        let result = find_in_weeks(
            |query| {
                fetched.push(query);
                let html = match query {
                    QueryKind::NextWeek => next,
                    _ => week,
                };
                std::future::ready(Ok(html.to_string()))
            },
            &options,
            DEFAULT_DISH,
            now,
        )
        .await;
        (result, fetched)
    }

    fn week_page() -> String {
        std::fs::read_to_string("./src/parse/html_examples/week.html").unwrap()
    }

    #[tokio::test]
    async fn test_match_this_week_fetches_once() {
        let (answer, fetched) = search(&week_page(), CLOSED).await;
        assert_eq!(
            answer.unwrap().as_deref(),
            Some("Am Dienstag, 13.10. gibt's Käsespätzle mit Salat an Ausgabe 2")
        );
        assert_eq!(fetched, [QueryKind::Week]);
    }

    #[tokio::test]
    async fn test_no_match_falls_back_to_next_week() {
        let (answer, fetched) = search(NO_SPAETZLE, &week_page()).await;
        assert!(answer.unwrap().is_some());
        assert_eq!(fetched, [QueryKind::Week, QueryKind::NextWeek]);

        let (answer, fetched) = search(NO_SPAETZLE, NO_SPAETZLE).await;
        assert_eq!(answer.unwrap(), None);
        assert_eq!(fetched, [QueryKind::Week, QueryKind::NextWeek]);
    }

    #[tokio::test]
    async fn test_broken_page_aborts_without_next_week() {
        let (answer, fetched) = search(CLOSED, &week_page()).await;
        assert!(matches!(
            answer,
            Err(error::Error::Parse(parse::Error::Structure(_)))
        ));
        assert_eq!(fetched, [QueryKind::Week]);
    }

    #[tokio::test]
    async fn test_invalid_options_fail_before_fetching() {
        let options = Options {
            dish: Some(String::new()),
            ..Options::default()
        };
        assert!(matches!(
            run(&options).await,
            Err(error::Error::UnsupportedOption(_))
        ));
    }
}
