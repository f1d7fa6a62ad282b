//! Message catalogue and locale-aware formatting.
//!
//! User-facing messages are looked up by (context, source string) in a
//! translation catalogue and then filled in with positional arguments.
//! Translations are free to reorder placeholders, so substitution always
//! goes by position, never by source-language word order.
//!
//! Lookup falls back to the source string itself when the catalogue has no
//! entry, which makes an empty or missing catalogue behave as plain
//! English output.
//!
//! # Example
//!
//! ```
//! use tilestream::i18n::Translator;
//!
//! let tr = Translator::for_locale("ja");
//! let msg = tr.format("TileLayer", "{0} of {1} files downloaded.", &[&7, &10]);
//! assert_eq!(msg, "10ファイルのうち7ファイルをダウンロードしました.");
//! ```

mod catalog;
mod format;

pub use catalog::{Catalog, CatalogError, ContextBlock, MessageEntry, SourceLocation};
pub use format::{format_positional, placeholder_set};

use std::borrow::Cow;

/// Locale-bound front end over a [`Catalog`].
///
/// A translator without a catalogue passes source strings through
/// unchanged, so callers never need to special-case the unlocalized path.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    catalog: Option<Catalog>,
}

impl Translator {
    /// Creates a translator for the given locale identifier.
    ///
    /// Locale matching is by primary language subtag ("ja", "ja_JP" and
    /// "ja-JP" all select the Japanese catalogue). Unknown locales produce
    /// a pass-through translator.
    pub fn for_locale(locale: &str) -> Self {
        let lang = locale
            .split(['_', '-', '.'])
            .next()
            .unwrap_or(locale)
            .to_ascii_lowercase();
        match lang.as_str() {
            "ja" => Self {
                catalog: Some(Catalog::japanese()),
            },
            _ => Self { catalog: None },
        }
    }

    /// Creates a translator backed by an explicit catalogue.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    /// Creates a pass-through translator (source strings unchanged).
    pub fn passthrough() -> Self {
        Self { catalog: None }
    }

    /// Looks up the template for (context, source).
    ///
    /// Returns the recorded translation, or the source string itself when
    /// the catalogue has no entry for the pair.
    pub fn tr<'a>(&'a self, context: &str, source: &'a str) -> Cow<'a, str> {
        match &self.catalog {
            Some(catalog) => match catalog.lookup(context, source) {
                Some(translation) => Cow::Borrowed(translation),
                None => Cow::Borrowed(source),
            },
            None => Cow::Borrowed(source),
        }
    }

    /// Looks up and formats a message with positional arguments.
    pub fn format(
        &self,
        context: &str,
        source: &str,
        args: &[&dyn std::fmt::Display],
    ) -> String {
        format_positional(&self.tr(context, source), args)
    }
}
