//! Markdown tables for replies.

/// Column alignment marker used in the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

impl Align {
    fn marker(&self) -> &'static str {
        match self {
            Self::Left => ":--",
            Self::Center => ":-:",
        }
    }
}

/// A Markdown table: header row, alignment row, one row per record.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    align: Align,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Two unlabeled columns of `label|value` rows.
    pub fn key_value<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let mut table = Self::new(["", ""]);
        for (label, value) in pairs {
            table.push_row([label.to_string(), value]);
        }
        table
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    /// Appends a row. Missing cells render empty; extra cells are dropped.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(|cell| escape_cell(&cell.to_string()))
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let framed = self.headers.len() == 1;
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        lines.push(format!("|{}|", self.headers.join("|")));

        let markers = vec![self.align.marker(); self.headers.len()].join("|");
        lines.push(if framed { format!("|{markers}|") } else { markers });

        for row in &self.rows {
            let line = row.join("|");
            // A lone cell without pipes would not parse as a table row.
            lines.push(if framed { format!("|{line}|") } else { line });
        }

        lines.join("\n")
    }
}

/// Keeps a value inside its cell.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}
