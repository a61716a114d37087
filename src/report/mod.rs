//! Report formatting.
//!
//! Formatters are pure functions from typed records to a [`Report`]. They
//! never fetch and never see the inbound message, so every template can be
//! tested against a fixed record set.

pub mod clan;
pub mod player;
pub mod table;
pub mod tank;

pub use table::{Align, Table};

use crate::error::ReportError;
use crate::record::Scalar;

/// A rendered reply: optional name header, body sections and source citation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    title: Option<String>,
    sections: Vec<String>,
    source: Option<String>,
}

impl Report {
    /// Starts a report headed `##Name: <name>`.
    pub fn titled(name: impl Into<String>) -> Self {
        Self {
            title: Some(name.into()),
            ..Self::default()
        }
    }

    /// Starts a report without a header.
    pub fn untitled() -> Self {
        Self::default()
    }

    pub fn section(mut self, text: impl Into<String>) -> Self {
        self.sections.push(text.into());
        self
    }

    pub fn table(self, table: &Table) -> Self {
        self.section(table.render())
    }

    pub fn source(mut self, url: impl Into<String>) -> Self {
        self.source = Some(url.into());
        self
    }

    /// Final reply text. Blocks are separated by blank lines.
    pub fn render(&self) -> String {
        let mut blocks = Vec::with_capacity(self.sections.len() + 2);
        if let Some(title) = &self.title {
            blocks.push(format!("##Name: {title}"));
        }
        blocks.extend(self.sections.iter().cloned());
        if let Some(source) = &self.source {
            blocks.push(format!("Source: {source}"));
        }
        blocks.join("\n\n")
    }
}

/// `0.5123` → `51.230%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.3}%", fraction * 100.0)
}

/// Fails with [`ReportError::Schema`] when a field the template prints is null or absent.
pub fn required<'a>(value: &'a Scalar, field: &'static str) -> Result<&'a Scalar, ReportError> {
    match value {
        Scalar::Null => Err(ReportError::Schema(field)),
        value => Ok(value),
    }
}

/// Required field printed the way the provider sent it.
pub fn display(value: &Scalar, field: &'static str) -> Result<String, ReportError> {
    required(value, field).map(Scalar::to_string)
}

/// Required fraction field rendered as a percentage.
pub fn percent(value: &Scalar, field: &'static str) -> Result<String, ReportError> {
    required(value, field)?
        .as_f64()
        .map(format_percent)
        .ok_or(ReportError::Schema(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5123), "51.230%");
        assert_eq!(format_percent(1.0), "100.000%");
        assert_eq!(format_percent(0.0), "0.000%");
    }

    #[test]
    fn test_percent_requires_number() {
        assert_eq!(percent(&Scalar::Float(0.25), "X").unwrap(), "25.000%");
        assert_eq!(percent(&Scalar::Null, "X"), Err(ReportError::Schema("X")));
        assert_eq!(
            percent(&Scalar::from("n/a"), "X"),
            Err(ReportError::Schema("X"))
        );
    }

    #[test]
    fn test_render_layout() {
        let report = Report::titled("RDDT")
            .section("body")
            .source("https://wotclans.com.br/api/clan/rddt");

        assert_eq!(
            report.render(),
            "##Name: RDDT\n\nbody\n\nSource: https://wotclans.com.br/api/clan/rddt"
        );
        assert_eq!(Report::untitled().section("only").render(), "only");
    }
}
