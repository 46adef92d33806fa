//! Server-side HTML rendering.
//!
//! Templates live in `templates/` and are embedded into the binary. Every page extends
//! `layouts/base.html`. Two helpers are available to templates:
//!
//! - `eq(a, b)`: equality test, used to mark the selected option in dropdowns
//! - `date(value, format)`: formats `"now"`, an RFC 3339 timestamp or a `YYYY-MM-DD` date with a
//!   strftime format (default `%Y-%m-%d`); usable as a function or as a filter

use crate::errors::{Error, Result};
use axum::response::Html;
use chrono::{DateTime, NaiveDate, Utc, format::Item, format::StrftimeItems};
use minijinja::{Environment, ErrorKind, Value};
use rust_embed::RustEmbed;
use serde::Serialize;
use std::sync::Arc;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Shared, immutable template environment
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}

impl Views {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| {
            Ok(Templates::get(name).map(|file| String::from_utf8_lossy(&file.data).into_owned()))
        });
        env.add_function("eq", eq);
        env.add_function("date", date);
        env.add_filter("date", date);

        Self { env: Arc::new(env) }
    }

    /// Render the named view with the given context.
    #[tracing::instrument(skip(self, context))]
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<Html<String>> {
        let render_error = |source| Error::Render {
            template: name.to_string(),
            source,
        };

        let template = self.env.get_template(name).map_err(render_error)?;
        let html = template.render(context).map_err(render_error)?;
        Ok(Html(html))
    }
}

fn eq(a: Value, b: Value) -> bool {
    a == b
}

fn date(value: String, format: Option<String>) -> std::result::Result<String, minijinja::Error> {
    let format = format.unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        return Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid date format {format:?}"),
        ));
    }

    let value = value.trim();
    let formatted = if value.eq_ignore_ascii_case("now") {
        Utc::now().format(&format).to_string()
    } else if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        timestamp.format(&format).to_string()
    } else if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        day.format(&format).to_string()
    } else {
        return Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot parse {value:?} as a date"),
        ));
    };

    Ok(formatted)
}
