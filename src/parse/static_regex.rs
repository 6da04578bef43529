use std::sync::OnceLock;

use regex::Regex;

/// A regex that is compiled on first use and shared afterwards.
#[derive(Debug)]
pub struct StaticRegex<'a> {
    cell: OnceLock<Regex>,
    pattern: &'a str,
}

impl<'a> StaticRegex<'a> {
    pub const fn new(pattern: &'a str) -> Self {
        Self {
            cell: OnceLock::new(),
            pattern,
        }
    }
}

impl<'a> core::ops::Deref for StaticRegex<'a> {
    type Target = Regex;

    fn deref(&self) -> &Self::Target {
        self.cell.get_or_init(|| match Regex::new(self.pattern) {
            Ok(re) => re,
            Err(e) => panic!("Error compiling static regex {}: {:?}", self.pattern, e),
        })
    }
}

#[macro_export]
macro_rules! static_regex {
    ($x: ident <- $re: literal) => {
        static $x: $crate::parse::static_regex::StaticRegex =
            $crate::parse::static_regex::StaticRegex::new($re);
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_static_regex_is_shared() {
        static_regex!(DIGITS <- r"\d+");
        assert!(DIGITS.is_match("Ausgabe 3"));
        assert!(std::ptr::eq(&*DIGITS, &*DIGITS));
    }
}
