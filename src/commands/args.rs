use std::sync::OnceLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::error::CommandError;

fn slug_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug regex must compile"))
}

#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    slug_regex().is_match(value)
}

/// Fails with a usage error unless `args` is empty.
pub(super) fn expect_none(args: &[String], usage: &str) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::usage(usage))
    }
}

/// Returns the single argument, or a usage error for zero or surplus args.
pub(super) fn expect_one<'a>(args: &'a [String], usage: &str) -> Result<&'a str, CommandError> {
    match args {
        [only] => Ok(only.as_str()),
        _ => Err(CommandError::usage(usage)),
    }
}

/// Returns the optional single argument; surplus args are a usage error.
pub(super) fn expect_optional<'a>(
    args: &'a [String],
    usage: &str,
) -> Result<Option<&'a str>, CommandError> {
    match args {
        [] => Ok(None),
        [only] => Ok(Some(only.as_str())),
        _ => Err(CommandError::usage(usage)),
    }
}

pub(super) fn expect_slug<'a>(args: &'a [String], usage: &str) -> Result<&'a str, CommandError> {
    let slug = expect_one(args, usage)?;
    if is_valid_slug(slug) {
        Ok(slug)
    } else {
        Err(CommandError::usage(usage))
    }
}

/// Right-pads `value` with spaces to `width` terminal columns.
#[must_use]
pub fn pad_to_width(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(value.width());
    format!("{value}{}", " ".repeat(padding))
}

/// Widest entry in terminal columns.
pub(super) fn column_width<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    values.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0)
}
