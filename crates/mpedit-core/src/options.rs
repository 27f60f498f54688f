//! Engine options — the `:set` layer.
//!
//! Parses Vim-style `:set` directives and applies them to [`Options`].
//!
//! # Supported syntax
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `:set option`    | Enable boolean / show numeric |
//! | `:set nooption`  | Disable boolean               |
//! | `:set option!`   | Toggle boolean                |
//! | `:set option?`   | Query current value           |
//! | `:set option=N`  | Assign numeric value          |
//! | `:set`           | Show changed options          |
//! | `:set all`       | Show all options              |
//!
//! # Option names
//!
//! | Full name    | Abbrev | Type    | Default |
//! |--------------|--------|---------|---------|
//! | `autoindent` | `ai`   | bool    | true    |
//! | `outdent`    | `od`   | bool    | true    |
//! | `comments`   | `com`  | bool    | false   |
//! | `undolevels` | `ul`   | integer | 1000    |

use crate::error::OptionError;

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `:set option` — enable a boolean option.
    On(String),

    /// `:set nooption` — disable a boolean option.
    Off(String),

    /// `:set option!` — toggle a boolean option.
    Toggle(String),

    /// `:set option?` — query the current value.
    Query(String),

    /// `:set option=value` — assign a value.
    Assign(String, String),

    /// `:set` with no arguments — show changed options.
    ShowChanged,

    /// `:set all` — show all options.
    ShowAll,
}

/// Canonical full name for an option name or abbreviation.
#[must_use]
pub fn canonical_name(name: &str) -> Option<&'static str> {
    match name {
        "autoindent" | "ai" => Some("autoindent"),
        "outdent" | "od" => Some("outdent"),
        "comments" | "com" => Some("comments"),
        "undolevels" | "ul" => Some("undolevels"),
        _ => None,
    }
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    matches!(
        name,
        "autoindent" | "ai" | "outdent" | "od" | "comments" | "com"
    )
}

/// Returns `true` if `name` is a known numeric option (full name or abbreviation).
#[must_use]
pub fn is_numeric_option(name: &str) -> bool {
    matches!(name, "undolevels" | "ul")
}

/// Parse the full `:set` arguments string into directives.
///
/// Multiple space-separated arguments are supported. An empty argument
/// string produces [`SetDirective::ShowChanged`].
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single `:set` argument into a directive.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }

    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }

    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }

    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }

    // Only strip "no" when the rest is a boolean option, so an option whose
    // name starts with "no" is never misread.
    if let Some(name) = arg
        .strip_prefix("no")
        .filter(|name| is_bool_option(name))
    {
        return SetDirective::Off(name.to_string());
    }

    // Bare numeric option name = query its value (Vim behavior).
    if is_numeric_option(arg) {
        return SetDirective::Query(arg.to_string());
    }

    SetDirective::On(arg.to_string())
}

/// Format a boolean option for display.
///
/// Returns `"name"` when true, `"noname"` when false.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Option values owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Enter continues the current line's indentation.
    pub autoindent: bool,
    /// Backspace inside a line's indentation steps back one indent level.
    pub outdent: bool,
    /// `%` starts a comment that runs to the end of the line.
    pub comments: bool,
    /// Maximum number of undoable edits kept.
    pub undolevels: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            autoindent: true,
            outdent: true,
            comments: false,
            undolevels: 1000,
        }
    }
}

impl Options {
    /// Apply one directive.
    ///
    /// Returns a message to show for queries and listings, `None` for
    /// silent updates.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionError`] for unknown names, type mismatches, and
    /// unparsable values. The options are unchanged on error.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>, OptionError> {
        match directive {
            SetDirective::On(name) => {
                *self.bool_mut(name)? = true;
                Ok(None)
            }
            SetDirective::Off(name) => {
                *self.bool_mut(name)? = false;
                Ok(None)
            }
            SetDirective::Toggle(name) => {
                let flag = self.bool_mut(name)?;
                *flag = !*flag;
                Ok(None)
            }
            SetDirective::Query(name) => {
                let full = canonical_name(name).ok_or_else(|| OptionError::Unknown(name.clone()))?;
                Ok(Some(self.describe(full)))
            }
            SetDirective::Assign(name, value) => {
                let full = canonical_name(name).ok_or_else(|| OptionError::Unknown(name.clone()))?;
                if full != "undolevels" {
                    return Err(OptionError::NotNumeric(name.clone()));
                }
                self.undolevels = value.parse().map_err(|_| OptionError::InvalidValue {
                    name: full.to_string(),
                    value: value.clone(),
                })?;
                Ok(None)
            }
            SetDirective::ShowChanged => {
                let defaults = Self::default();
                let changed: Vec<String> = Self::NAMES
                    .iter()
                    .filter(|name| self.describe(name) != defaults.describe(name))
                    .map(|name| self.describe(name))
                    .collect();
                Ok(Some(changed.join("  ")))
            }
            SetDirective::ShowAll => {
                let all: Vec<String> = Self::NAMES.iter().map(|name| self.describe(name)).collect();
                Ok(Some(all.join("  ")))
            }
        }
    }

    /// Parse and apply a whole `:set` argument string, stopping at the
    /// first error. Messages from queries are joined with newlines.
    ///
    /// # Errors
    ///
    /// Returns the first [`OptionError`]; directives before it stay
    /// applied.
    pub fn set(&mut self, args: &str) -> Result<Option<String>, OptionError> {
        let mut messages = Vec::new();
        for directive in parse_set(args) {
            if let Some(msg) = self.apply(&directive)? {
                messages.push(msg);
            }
        }
        Ok((!messages.is_empty()).then(|| messages.join("\n")))
    }

    const NAMES: [&'static str; 4] = ["autoindent", "comments", "outdent", "undolevels"];

    /// `name` or `noname` for booleans, `name=N` for numbers. `full` must
    /// be a canonical name.
    fn describe(&self, full: &str) -> String {
        match full {
            "autoindent" => format_bool(full, self.autoindent),
            "outdent" => format_bool(full, self.outdent),
            "comments" => format_bool(full, self.comments),
            _ => format!("{full}={}", self.undolevels),
        }
    }

    fn bool_mut(&mut self, name: &str) -> Result<&mut bool, OptionError> {
        match canonical_name(name) {
            Some("autoindent") => Ok(&mut self.autoindent),
            Some("outdent") => Ok(&mut self.outdent),
            Some("comments") => Ok(&mut self.comments),
            Some(_) => Err(OptionError::NotBoolean(name.to_string())),
            None => Err(OptionError::Unknown(name.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_set_arg ─────────────────────────────────────────────────────

    #[test]
    fn parse_boolean_on() {
        assert_eq!(
            parse_set_arg("autoindent"),
            SetDirective::On("autoindent".into())
        );
        assert_eq!(parse_set_arg("com"), SetDirective::On("com".into()));
    }

    #[test]
    fn parse_boolean_off() {
        assert_eq!(
            parse_set_arg("noautoindent"),
            SetDirective::Off("autoindent".into())
        );
        assert_eq!(parse_set_arg("noai"), SetDirective::Off("ai".into()));
        assert_eq!(parse_set_arg("nood"), SetDirective::Off("od".into()));
    }

    #[test]
    fn parse_toggle_query_assign() {
        assert_eq!(
            parse_set_arg("comments!"),
            SetDirective::Toggle("comments".into())
        );
        assert_eq!(
            parse_set_arg("outdent?"),
            SetDirective::Query("outdent".into())
        );
        assert_eq!(
            parse_set_arg("ul=50"),
            SetDirective::Assign("ul".into(), "50".into())
        );
    }

    #[test]
    fn parse_numeric_bare_is_query() {
        assert_eq!(
            parse_set_arg("undolevels"),
            SetDirective::Query("undolevels".into())
        );
        assert_eq!(parse_set_arg("ul"), SetDirective::Query("ul".into()));
    }

    #[test]
    fn parse_unknown_option_still_parses() {
        assert_eq!(parse_set_arg("foobar"), SetDirective::On("foobar".into()));
        assert_eq!(
            parse_set_arg("nofoobar"),
            SetDirective::On("nofoobar".into())
        );
        assert_eq!(parse_set_arg("no"), SetDirective::On("no".into()));
        assert_eq!(parse_set_arg("noul"), SetDirective::On("noul".into()));
    }

    #[test]
    fn parse_empty_and_all() {
        assert_eq!(parse_set(""), vec![SetDirective::ShowChanged]);
        assert_eq!(parse_set("  "), vec![SetDirective::ShowChanged]);
        assert_eq!(parse_set("all"), vec![SetDirective::ShowAll]);
    }

    #[test]
    fn parse_multiple_args() {
        assert_eq!(
            parse_set("noai comments ul=10"),
            vec![
                SetDirective::Off("ai".into()),
                SetDirective::On("comments".into()),
                SetDirective::Assign("ul".into(), "10".into()),
            ]
        );
    }

    #[test]
    fn name_tables_agree() {
        for name in ["autoindent", "ai", "outdent", "od", "comments", "com", "undolevels", "ul"] {
            assert!(is_bool_option(name) != is_numeric_option(name), "{name}");
            assert!(canonical_name(name).is_some(), "{name}");
        }
        assert!(canonical_name("number").is_none());
    }

    #[test]
    fn format_bool_on_off() {
        assert_eq!(format_bool("comments", true), "comments");
        assert_eq!(format_bool("comments", false), "nocomments");
    }

    // ── Options::apply ───────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert!(opts.autoindent);
        assert!(opts.outdent);
        assert!(!opts.comments);
        assert_eq!(opts.undolevels, 1000);
    }

    #[test]
    fn set_toggle_and_assign() {
        let mut opts = Options::default();
        assert_eq!(opts.set("noai com! ul=5"), Ok(None));
        assert!(!opts.autoindent);
        assert!(opts.comments);
        assert_eq!(opts.undolevels, 5);
    }

    #[test]
    fn query_reports_value() {
        let mut opts = Options::default();
        assert_eq!(opts.set("comments?"), Ok(Some("nocomments".into())));
        assert_eq!(opts.set("ul"), Ok(Some("undolevels=1000".into())));
    }

    #[test]
    fn show_changed_lists_only_changes() {
        let mut opts = Options::default();
        assert_eq!(opts.set(""), Ok(Some(String::new())));
        opts.set("nood").unwrap();
        assert_eq!(opts.set(""), Ok(Some("nooutdent".into())));
        assert_eq!(
            opts.set("all"),
            Ok(Some(
                "autoindent  nocomments  nooutdent  undolevels=1000".into()
            ))
        );
    }

    #[test]
    fn errors() {
        let mut opts = Options::default();
        assert_eq!(
            opts.set("number"),
            Err(OptionError::Unknown("number".into()))
        );
        assert_eq!(
            opts.set("ul!"),
            Err(OptionError::NotBoolean("ul".into()))
        );
        assert_eq!(
            opts.set("ai=3"),
            Err(OptionError::NotNumeric("ai".into()))
        );
        assert_eq!(
            opts.set("ul=many"),
            Err(OptionError::InvalidValue {
                name: "undolevels".into(),
                value: "many".into()
            })
        );
        assert_eq!(opts, Options::default());
    }
}
