//! Keyword listing for the `keywords` command

use std::fmt::Write;

use crate::grammar::{self, Category};

use super::CliError;

const SHAPE_LEGEND: &str = "\
SHAPES

  c        classifier (string literal or parameter)
  v        value of any kind
  filter   nested constraint of that category (also order, require)
  int      value of that type (also string, locale, currency, ...)
  A|B      one of the listed enum values or forms
  x?  optional   x*  zero or more   x+  one or more
";

/// All categories with their keywords.
pub fn get_keywords_overview() -> String {
    let mut out = String::from("EVITAQL KEYWORDS\n");
    for category in Category::ALL {
        out.push('\n');
        write_category(&mut out, category);
    }
    out.push('\n');
    out.push_str(SHAPE_LEGEND);
    out.push_str("\nRun 'evitaql keywords <category>' to list a single category.\n");
    out
}

/// Keywords of one category, `name` matched case-insensitively.
pub fn get_keyword_category(name: &str) -> Result<String, CliError> {
    let category =
        Category::from_name(name).ok_or_else(|| CliError::UnknownCategory(name.to_string()))?;
    let mut out = String::new();
    write_category(&mut out, category);
    Ok(out)
}

fn write_category(out: &mut String, category: Category) {
    let _ = writeln!(out, "{}", category.name().to_uppercase());
    let width = grammar::keywords_in(category)
        .map(|keyword| keyword.name.len())
        .max()
        .unwrap_or(0);
    for keyword in grammar::keywords_in(category) {
        let _ = writeln!(out, "  {:width$}  {}", keyword.name, keyword.shape, width = width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_every_category() {
        let overview = get_keywords_overview();
        for heading in ["HEAD", "FILTER", "ORDER", "REQUIRE"] {
            assert!(overview.contains(heading), "missing {}", heading);
        }
        assert!(overview.contains("attributeEquals"));
    }

    #[test]
    fn single_category() {
        let listing = get_keyword_category("Order").unwrap();
        assert!(listing.starts_with("ORDER\n"));
        assert!(listing.contains("attributeNatural"));
        assert!(!listing.contains("attributeEquals"));
    }

    #[test]
    fn unknown_category() {
        assert!(matches!(
            get_keyword_category("select"),
            Err(CliError::UnknownCategory(name)) if name == "select"
        ));
    }
}
