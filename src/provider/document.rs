//! HTML document queries over provider pages.

use scraper::{ElementRef, Html, Selector};

use crate::error::ProviderError;

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Every element matching a CSS selector, in document order.
    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>, ProviderError> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Trimmed text of every element matching a CSS selector.
    pub fn texts(&self, css: &str) -> Result<Vec<String>, ProviderError> {
        Ok(self.select(css)?.into_iter().map(element_text).collect())
    }

    /// Attribute of the first matching element; a missing node or attribute is an error.
    pub fn first_attr(&self, css: &str, attr: &str) -> Result<String, ProviderError> {
        let selector = selector(css)?;
        self.html
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(str::to_string)
            .ok_or_else(|| ProviderError::MissingNode(format!("{css}[{attr}]")))
    }
}

/// Compiles a selector, reporting bad syntax as a missing node.
pub(crate) fn selector(css: &str) -> Result<Selector, ProviderError> {
    Selector::parse(css).map_err(|e| ProviderError::MissingNode(format!("{css} ({e})")))
}

/// Concatenated, trimmed text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
