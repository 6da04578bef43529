mod days;
mod document;
mod error;
mod find_dish;
mod markup;
mod remove_excess_whitespace;
mod scrub;
pub(crate) mod static_regex;
pub(crate) mod static_selector;

pub use days::extract_days;
pub use document::MenuDocument;
pub use error::{Error, Result};
pub use find_dish::{check_dish, dish_pattern, title_case};
pub use remove_excess_whitespace::remove_excess_whitespace;
pub use scrub::{Diet, DishLine};
