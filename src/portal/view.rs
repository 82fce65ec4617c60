// src/portal/view.rs

//! Structured page output and its plain-text rendering.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::portal::pagination::Pager;

/// A table cell or stat value, optionally linking to another route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub link: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(href.into()),
        }
    }

    fn render(&self) -> String {
        match &self.link {
            Some(href) => format!("{} <{}>", self.text, href),
            None => self.text.clone(),
        }
    }
}

/// Previous/next controls of one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    /// Name used to address the list in `next <list>`/`prev <list>`.
    pub list: &'static str,
    pub page: u32,
    pub can_prev: bool,
    pub can_next: bool,
}

impl PagerView {
    pub fn of(list: &'static str, pager: &Pager) -> Self {
        Self {
            list,
            page: pager.page(),
            can_prev: pager.can_prev(),
            can_next: pager.can_next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Stats {
        title: String,
        items: Vec<(String, Cell)>,
    },
    Table {
        title: String,
        columns: Vec<&'static str>,
        rows: Vec<Vec<Cell>>,
        /// Shown instead of the table when there are no rows.
        empty: String,
    },
    Text {
        title: String,
        body: String,
    },
    Links {
        title: String,
        links: Vec<Cell>,
    },
    Pager(PagerView),
    /// One request of the page failed; the other sections still render.
    Error {
        title: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
}

impl PageView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            sections: Vec::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Finds a table by title.
    pub fn table(&self, title: &str) -> Option<&[Vec<Cell>]> {
        self.sections.iter().find_map(|section| match section {
            Section::Table { title: t, rows, .. } if t == title => Some(rows.as_slice()),
            _ => None,
        })
    }

    /// Finds the pager of a list.
    pub fn pager(&self, list: &str) -> Option<&PagerView> {
        self.sections.iter().find_map(|section| match section {
            Section::Pager(pager) if pager.list == list => Some(pager),
            _ => None,
        })
    }

    /// `(section title, message)` of every failed request on the page.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                Section::Error { title, message } => Some((title.as_str(), message.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Renders the page as terminal text.
    pub fn render(&self, theme: Theme) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", theme.heading(&self.title, 1));
        if let Some(subtitle) = &self.subtitle {
            let _ = writeln!(out, "{}", subtitle);
        }

        for section in &self.sections {
            out.push('\n');
            match section {
                Section::Stats { title, items } => {
                    let _ = writeln!(out, "{}", theme.heading(title, 2));
                    let width = items.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
                    for (label, value) in items {
                        let _ = writeln!(out, "  {:<width$}  {}", label, value.render(), width = width);
                    }
                }
                Section::Table {
                    title,
                    columns,
                    rows,
                    empty,
                } => {
                    let _ = writeln!(out, "{}", theme.heading(title, 2));
                    if rows.is_empty() {
                        let _ = writeln!(out, "  {}", empty);
                    } else {
                        render_table(&mut out, columns, rows);
                    }
                }
                Section::Text { title, body } => {
                    let _ = writeln!(out, "{}", theme.heading(title, 2));
                    for line in body.lines() {
                        let _ = writeln!(out, "  {}", line);
                    }
                }
                Section::Links { title, links } => {
                    let _ = writeln!(out, "{}", theme.heading(title, 2));
                    if links.is_empty() {
                        let _ = writeln!(out, "  (none)");
                    }
                    for link in links {
                        let _ = writeln!(out, "  - {}", link.render());
                    }
                }
                Section::Pager(pager) => {
                    let prev = if pager.can_prev { "< prev" } else { "  ----" };
                    let next = if pager.can_next { "next >" } else { "----  " };
                    let _ = writeln!(out, "  {}  page {}  {}   ({})", prev, pager.page, next, pager.list);
                }
                Section::Error { title, message } => {
                    let _ = writeln!(out, "{}", theme.heading(title, 2));
                    let _ = writeln!(out, "  failed to load: {}", message);
                }
            }
        }
        out
    }
}

fn render_table(out: &mut String, columns: &[&'static str], rows: &[Vec<Cell>]) {
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(Cell::render).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rendered
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "  {}", line(columns.to_vec()));
    let _ = writeln!(
        out,
        "  {}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
    );
    for row in &rendered {
        let _ = writeln!(out, "  {}", line(row.iter().map(String::as_str).collect()));
    }
}

/// Appearance preference from the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    /// Plain text; leaves colors to the terminal.
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    fn heading(&self, text: &str, level: u8) -> String {
        let underline = if level == 1 { '=' } else { '-' };
        let rule: String = std::iter::repeat_n(underline, text.chars().count()).collect();
        match self {
            Theme::System => format!("{}\n{}", text, rule),
            // bold + black / bold + bright white
            Theme::Light => format!("\x1b[1;30m{}\x1b[0m\n{}", text, rule),
            Theme::Dark => format!("\x1b[1;97m{}\x1b[0m\n{}", text, rule),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{}' (light, dark, system)", other)),
        }
    }
}

/// Timestamp as shown in tables, e.g. `Feb 10, 2025, 9:30 AM`.
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Percentage without a trailing `.0`.
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}%", value)
    } else {
        format!("{:.1}%", value)
    }
}
