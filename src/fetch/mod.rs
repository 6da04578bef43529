use std::env;

use reqwest::Client;
use tracing::{instrument, Level};
use url::Url;

use crate::config::{QueryKind, Venue};
use crate::error::{Error, Result};

static MENU_URL: &str = "https://www.studierendenwerk-mainz.de/speiseplan/frontend/index.php";

pub fn make_client() -> Result<Client> {
    Client::builder().gzip(true).build().map_err(From::from)
}

/// The page for one venue and query kind. `MENU_URL` in the environment replaces the
/// default host and path.
pub fn menu_url(venue: Venue, query: QueryKind) -> Result<Url> {
    let base = env::var("MENU_URL").unwrap_or_else(|_| MENU_URL.to_string());
    menu_url_from(&base, venue, query)
}

fn menu_url_from(base: &str, venue: Venue, query: QueryKind) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("building_id", &venue.building_id().to_string())
        .append_pair("display_type", &query.display_type().to_string());
    Ok(url)
}

#[instrument(skip(client), level = Level::TRACE)]
pub async fn menu_page(client: &Client, venue: Venue, query: QueryKind) -> Result<String> {
    let url = menu_url(venue, query)?;
    let start = std::time::Instant::now();
    let res = client.get(url).send().await?;
    let status = res.status();
    if !status.is_success() {
        return Err(Error::Status(status));
    }
    let text = res.text().await?;
    log::trace!("Got text of menu page in \t {:?}", start.elapsed());
    Ok(text)
}
