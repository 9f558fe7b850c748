//! URL assembly
//!
//! Templates use positional placeholders (`{0}`, `{1}`, ...) with `{{` and
//! `}}` as escapes for literal braces. Arguments without a placeholder are
//! ignored.

use std::fmt::{self, Display};

use baasic_domain::constants::{
    DEFAULT_EMBED, DEFAULT_FIELDS, DEFAULT_MAX_NUMBER_OF_RESULTS, DEFAULT_PAGE,
    DEFAULT_SEARCH_QUERY, DEFAULT_SORTING,
};
use baasic_domain::{BaasicError, Result};

/// Substitute positional arguments into `template`.
///
/// # Errors
/// `BaasicError::InvalidInput` for an unbalanced brace, a non-numeric
/// placeholder, or an index without a matching argument.
pub fn format_template(template: &str, args: &[&dyn Display]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) if c.is_ascii_digit() => digits.push(c),
                        _ => return Err(malformed(template, position)),
                    }
                }

                let index: usize = digits.parse().map_err(|_| malformed(template, position))?;
                let arg = args.get(index).ok_or_else(|| {
                    BaasicError::InvalidInput(format!(
                        "placeholder {{{index}}} in '{template}' has no argument ({} given)",
                        args.len()
                    ))
                })?;
                out.push_str(&arg.to_string());
            }
            '}' => return Err(malformed(template, position)),
            c => out.push(c),
        }
    }

    Ok(out)
}

fn malformed(template: &str, position: usize) -> BaasicError {
    BaasicError::InvalidInput(format!("malformed placeholder at byte {position} in '{template}'"))
}

/// Join a base address and a relative path with exactly one `/`.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Paging, sorting and projection options of a list call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindParams {
    pub search_query: String,
    pub page: u32,
    pub rpp: u32,
    pub sort: String,
    pub embed: String,
    pub fields: String,
}

impl Default for FindParams {
    fn default() -> Self {
        Self {
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            page: DEFAULT_PAGE,
            rpp: DEFAULT_MAX_NUMBER_OF_RESULTS,
            sort: DEFAULT_SORTING.to_string(),
            embed: DEFAULT_EMBED.to_string(),
            fields: DEFAULT_FIELDS.to_string(),
        }
    }
}

impl FindParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn rpp(mut self, rpp: u32) -> Self {
        self.rpp = rpp;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    #[must_use]
    pub fn embed(mut self, embed: impl Into<String>) -> Self {
        self.embed = embed.into();
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }
}

/// Ordered query string; every pair is emitted even when its value is empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `?searchQuery=&page=&rpp=&sort=&embed=&fields=`
    #[must_use]
    pub fn from_find(params: &FindParams) -> Self {
        Self::new()
            .push("searchQuery", &params.search_query)
            .push("page", params.page)
            .push("rpp", params.rpp)
            .push("sort", &params.sort)
            .push("embed", &params.embed)
            .push("fields", &params.fields)
    }

    /// `?embed=&fields=`
    #[must_use]
    pub fn for_item(embed: &str, fields: &str) -> Self {
        Self::new().push("embed", embed).push("fields", fields)
    }

    #[must_use]
    pub fn push(mut self, key: &'static str, value: impl Display) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{separator}{key}={}", urlencoding::encode(value))?;
        }
        Ok(())
    }
}
