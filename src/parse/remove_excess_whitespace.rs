use std::borrow::Cow;

use crate::static_regex;

pub fn remove_excess_whitespace(s: &str) -> Cow<'_, str> {
    static_regex!(RE <- r"\s\s+");
    RE.replace_all(s, " ")
}
