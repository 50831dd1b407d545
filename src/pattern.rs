//! Compiles route patterns into anchored regular expressions.
//!
//! A pattern is split on `/` and every segment is translated on its own:
//!
//! | segment   | matches                          | captured as |
//! |-----------|----------------------------------|-------------|
//! | `*`       | any run, `/` included            | -           |
//! | `*name`   | any run, `/` included            | `name`      |
//! | `\*rest`  | the literal `*rest`              | -           |
//! | `:`       | one segment, possibly empty      | unnamed     |
//! | `:name`   | one segment, possibly empty      | `name`      |
//! | `\:rest`  | the literal `:rest`              | -           |
//! | otherwise | the literal segment              | -           |
//!
//! A per-variable override replaces the body of a named group verbatim.

use crate::router::{Result, RouterError};

use std::borrow::Cow;

use regex::Regex;
use url::{ParseError, Url};

const STAR: char = '*';
const COLON: char = ':';
const BACKSLASH: char = '\\';
const SLASH: char = '/';

const SEGMENT_BODY: &str = "[^/]*";
const WILDCARD_BODY: &str = ".*";

const NETWORK_PATH_BASE: &str = "http://localhost/";

/// A named capture: the variable name and the index of its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: Box<str>,
    pub group: usize,
}

/// The result of compiling a pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub matcher: Regex,
    pub variables: Vec<Variable>,
}

impl CompiledPattern {
    pub fn variable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.iter().map(|v| &*v.name)
    }
}

/// Reduces a pattern or request path to the form matchers run against.
///
/// Absolute URLs (`https://host/a`) and network-path references
/// (`//host/a`) go through [`Url`], which keeps the path alone; the
/// path it returns is percent-encoded. Anything else is taken as a path
/// as written, with the query and the fragment cut off. Surrounding slashes
/// are trimmed.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    match url_path(raw) {
        Some(path) => Cow::Owned(path.trim_matches(SLASH).to_owned()),
        None => Cow::Borrowed(local_path(raw).trim_matches(SLASH)),
    }
}

fn url_path(raw: &str) -> Option<String> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) if is_network_path(raw) => {
            Url::parse(NETWORK_PATH_BASE).and_then(|base| base.join(raw)).ok()?
        }
        Err(_) => return None,
    };
    // `users:list` parses as an opaque URL with scheme `users`
    if url.cannot_be_a_base() {
        return None;
    }
    Some(url.path().to_owned())
}

fn is_network_path(raw: &str) -> bool {
    raw.starts_with("//") && !raw.starts_with("///")
}

fn local_path(raw: &str) -> &str {
    match raw.find(|c: char| c == '?' || c == '#') {
        Some(end) => &raw[..end],
        None => raw,
    }
}

/// Compiles `pattern`, using `rules` to override the group body of named
/// variables.
pub fn compile(pattern: &str, rules: &[(&str, &str)]) -> Result<CompiledPattern> {
    let mut expr = String::from("^");
    let mut variables: Vec<Variable> = Vec::new();
    let mut groups: usize = 0;

    let path = normalize(pattern);
    for (i, part) in path.split(SLASH).enumerate() {
        if i > 0 {
            expr.push(SLASH);
        }

        if part == "*" {
            expr.push_str(WILDCARD_BODY);
        } else if let Some(name) = part.strip_prefix(STAR) {
            let body = body_for(pattern, name, rules, WILDCARD_BODY)?;
            push_group(&mut expr, &mut groups, &mut variables, Some(name), body);
        } else if part == ":" {
            push_group(&mut expr, &mut groups, &mut variables, None, Body::plain(SEGMENT_BODY));
        } else if let Some(name) = part.strip_prefix(COLON) {
            let body = body_for(pattern, name, rules, SEGMENT_BODY)?;
            push_group(&mut expr, &mut groups, &mut variables, Some(name), body);
        } else if let Some(rest) = part.strip_prefix(BACKSLASH) {
            // `\*x` and `\:x` stand for the literal `*x` and `:x`
            if rest.starts_with(STAR) || rest.starts_with(COLON) {
                expr.push_str(&regex::escape(rest));
            } else {
                expr.push_str(&regex::escape(part));
            }
        } else {
            expr.push_str(&regex::escape(part));
        }
    }

    expr.push('$');

    let matcher = Regex::new(&expr).map_err(|source| RouterError::Pattern {
        pattern: pattern.to_owned(),
        source,
    })?;

    debug_assert_eq!(matcher.captures_len(), groups + 1);

    Ok(CompiledPattern { matcher, variables })
}

struct Body<'a> {
    text: &'a str,
    inner_groups: usize,
}

impl<'a> Body<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            inner_groups: 0,
        }
    }
}

fn body_for<'a>(
    pattern: &str,
    name: &str,
    rules: &[(&'a str, &'a str)],
    default: &'static str,
) -> Result<Body<'a>> {
    let rule = match rules.iter().find(|&&(k, _)| k == name) {
        Some(&(_, rule)) => rule,
        None => return Ok(Body::plain(default)),
    };
    let checked = Regex::new(rule).map_err(|source| RouterError::Pattern {
        pattern: format!("{} ({} = {:?})", pattern, name, rule),
        source,
    })?;
    Ok(Body {
        text: rule,
        inner_groups: checked.captures_len() - 1,
    })
}

fn push_group(
    expr: &mut String,
    groups: &mut usize,
    variables: &mut Vec<Variable>,
    name: Option<&str>,
    body: Body<'_>,
) {
    *groups += 1;
    if let Some(name) = name {
        variables.push(Variable {
            name: name.into(),
            group: *groups,
        });
    }
    *groups += body.inner_groups;
    expr.push('(');
    expr.push_str(body.text);
    expr.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_origin_query_and_slashes() {
        assert_eq!(normalize("/a/b/"), "a/b");
        assert_eq!(normalize("http://example.com/a/b?x=1#top"), "a/b");
        assert_eq!(normalize("https://example.com"), "");
        assert_eq!(normalize("/redirect/http://x"), "redirect/http://x");
        assert_eq!(normalize("//"), "");
        assert_eq!(normalize("users:list"), "users:list");
    }

    #[test]
    fn normalize_network_path_reference() {
        assert_eq!(normalize("//host/a"), "a");
        assert_eq!(normalize("//host/a/b?x=1"), "a/b");
        assert_eq!(normalize("//host"), "");
    }

    #[test]
    fn normalize_absolute_form() {
        assert_eq!(normalize("http://example.com:8080/a/b/"), "a/b");
        assert_eq!(normalize("ftp://user@files.example.com/pub/x"), "pub/x");
        assert_eq!(normalize("http://example.com/a b"), "a%20b");
    }

    #[test]
    fn empty_runs_are_captured() {
        let p = compile("/a/:id/b", &[]).unwrap();
        let caps = p.matcher.captures("a//b").unwrap();
        assert_eq!(&caps[p.variables[0].group], "");

        let p = compile("/*", &[]).unwrap();
        assert!(p.matcher.is_match(&normalize("/")));
    }

    #[test]
    fn source_of_mixed_pattern() {
        let p = compile("/u/:id/*rest", &[]).unwrap();
        assert_eq!(p.matcher.as_str(), "^u/([^/]*)/(.*)$");
        assert_eq!(p.variable_names().collect::<Vec<_>>(), ["id", "rest"]);
    }

    #[test]
    fn override_groups_do_not_shift_later_variables() {
        let p = compile("/:date/:slug", &[("date", r"(\d{4})-(\d{2})")]).unwrap();
        assert_eq!(p.variables[0].group, 1);
        assert_eq!(p.variables[1].group, 4);

        let caps = p.matcher.captures("2020-01/hello").unwrap();
        assert_eq!(&caps[p.variables[0].group], "2020-01");
        assert_eq!(&caps[p.variables[1].group], "hello");
    }

    #[test]
    fn malformed_override_is_an_error() {
        let err = compile("/:id", &[("id", "[0-9")]).unwrap_err();
        assert!(matches!(err, RouterError::Pattern { .. }));
    }
}
