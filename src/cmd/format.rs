/*!
format.rs - human output helpers for `drush-wrap`.

  StyleOptions::detect()          NO_COLOR / NO_EMOJI / COLUMNS
  color(role, text, &style)       ANSI role colors
  icon(Icon, &style)              optional glyphs
  box_header(title, sub, &style)  framed heading
  table(headers, rows, &style)    aligned columns, shrinking the widest first
  truncate_ellipsis(s, n)

JSON output paths never go through this module.
*/

use std::borrow::Cow;

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl StyleOptions {
    pub fn detect() -> Self {
        let term_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);
        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width,
        }
    }

    /// No color, no glyphs.
    #[cfg(test)]
    pub fn plain(term_width: usize) -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Title,
    Secondary,
    Accent,
    Success,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Title => "38;5;45",
        Role::Secondary => "38;5;250",
        Role::Accent => "38;5;213",
        Role::Success => "38;5;82",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

#[derive(Debug, Clone, Copy)]
pub enum Icon {
    List,
    Info,
    Error,
    Command,
}

pub fn icon(which: Icon, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match which {
        Icon::List => "📜",
        Icon::Info => "ℹ",
        Icon::Error => "✖",
        Icon::Command => "🛠",
    }
}

/// Single-line framed heading: `title  subtitle`, truncated to the terminal.
pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let title = title.as_ref().trim();
    let plain = match &subtitle {
        Some(s) => format!("{title}  {}", s.as_ref()),
        None => title.to_string(),
    };
    let max_inner = style.term_width.saturating_sub(4).max(10);
    let plain = truncate_ellipsis(&plain, max_inner);
    let inner_width = display_width(&plain);

    // Color only after truncation so escape codes are never cut.
    let styled = match plain.split_once("  ") {
        Some((t, rest)) if subtitle.is_some() => format!(
            "{}  {}",
            color(Role::Title, t, style),
            color(Role::Secondary, rest, style)
        ),
        _ => color(Role::Title, &plain, style),
    };

    let bar = "─".repeat(inner_width + 2);
    format!("┌{bar}┐\n│ {styled} │\n└{bar}┘")
}

/// Render rows under `headers`, two spaces between columns.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let gaps = (cols - 1) * 2;
    let mut total: usize = widths.iter().sum::<usize>() + gaps;
    while total > style.term_width {
        let (idx, widest) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
            .unwrap_or((0, 0));
        if widest <= 4 {
            break;
        }
        let shrink = (total - style.term_width).min(widest - 4);
        widths[idx] -= shrink;
        total -= shrink;
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(color(
        Role::Accent,
        render_row(headers.iter().copied(), &widths),
        style,
    ));
    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push(color(Role::Dim, sep.join("  "), style));
    for row in rows {
        let cells = (0..cols).map(|i| row.get(i).map(String::as_str).unwrap_or(""));
        out.push(render_row(cells, &widths));
    }
    out.join("\n")
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&fit(cell, *width));
    }
    line.trim_end().to_string()
}

fn fit(s: &str, width: usize) -> String {
    let s = truncate_ellipsis(s, width);
    let pad = width.saturating_sub(display_width(&s));
    format!("{s}{}", " ".repeat(pad))
}

pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Drop `ESC [ ... letter` sequences.
fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for n in chars.by_ref() {
                if n.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}
