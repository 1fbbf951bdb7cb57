//! Terminal rendering of cluster groups.
//!
//! Each cluster is printed under a `Cluster N:` heading with its members
//! laid out row-major into a fixed number of side-by-side columns: four for
//! images, three for articles. A row's cells are held in a fixed-size
//! column sequence and filled by index.

use crate::models::{ClusterGroups, Display, Item, ItemKind};

/// Character width of one image cell.
const IMAGE_CELL_WIDTH: usize = 28;
/// Character width of one article cell.
const ARTICLE_CELL_WIDTH: usize = 40;
/// Spacing between adjacent cells.
const GUTTER: &str = "  ";

fn cell_width(kind: ItemKind) -> usize {
    match kind {
        ItemKind::Image => IMAGE_CELL_WIDTH,
        ItemKind::Article => ARTICLE_CELL_WIDTH,
    }
}

/// Render all clusters as text.
pub fn render_text(groups: &ClusterGroups) -> String {
    let columns = groups.kind.columns();
    let width = cell_width(groups.kind);
    let mut out = String::new();

    for group in &groups.groups {
        out.push_str(&format!("Cluster {}:\n", group.id + 1));

        if group.items.is_empty() {
            out.push_str("(empty)\n");
        }

        for (row_idx, row) in group.items.chunks(columns).enumerate() {
            let mut cells: Vec<Vec<String>> = vec![Vec::new(); columns];
            for (j, item) in row.iter().enumerate() {
                let number = row_idx * columns + j + 1;
                cells[j] = wrap(&cell_text(item, number), width);
            }
            out.push_str(&render_row(&cells, width));
            out.push('\n');
        }

        if groups.kind == ItemKind::Article {
            out.push_str("---\n");
        }
        out.push('\n');
    }

    out
}

fn cell_text(item: &Item, number: usize) -> String {
    match &item.display {
        Display::Image { url, caption } => format!("{}\n{}", caption, url),
        Display::Text { body } => format!("{}. {}", number, body),
    }
}

/// Print cells side by side, padding every cell to `width`.
fn render_row(cells: &[Vec<String>], width: usize) -> String {
    let height = cells.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut out = String::new();
    for line in 0..height {
        let parts: Vec<String> = cells
            .iter()
            .map(|cell| {
                let text = cell.get(line).map(String::as_str).unwrap_or("");
                pad(text, width)
            })
            .collect();
        out.push_str(parts.join(GUTTER).trim_end());
        out.push('\n');
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut s = text.to_string();
    s.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    s
}

/// Greedy word wrap at `width` characters. Explicit newlines start a new
/// line; words longer than `width` are hard-split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();

            while chars.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = chars.split_off(width);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }

            let word_len = chars.len();
            if word_len == 0 {
                continue;
            }
            let needed = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(chars);
            current_len += word_len;
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}
