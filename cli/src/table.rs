// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
    header: bool,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
            header: true,
        }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    fn compute_widths(&self, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths: Vec<usize> = match self.header {
            true => self.columns.iter().map(|c| c.name().width()).collect(),
            false => vec![0; self.columns.len()],
        };
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }

    fn write_row<'c>(
        &self,
        f: &mut fmt::Formatter<'_>,
        cells: impl Iterator<Item = (usize, Cow<'c, str>, Option<Color>, bool)>,
        widths: &[usize],
    ) -> fmt::Result {
        let last = widths.len().saturating_sub(1);
        for (i, cell, color, bold) in cells {
            let col = &self.columns[i];
            let text = pad(&cell, widths[i], col.padding_direction(), i == last);
            let text = match (color, bold) {
                (_, true) => text.bold().to_string(),
                (Some(color), false) => text.color(color).to_string(),
                (None, false) => text,
            };
            f.write_str(&text)?;
            if i < last {
                f.write_str(self.separator)?;
            }
        }
        writeln!(f)
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return Ok(());
        }

        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|c| c.format(item)).collect())
            .collect();
        let widths = self.compute_widths(&rows);

        if self.header {
            let names = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, c)| (i, c.name(), None, true));
            self.write_row(f, names, &widths)?;
        }

        for (item, row) in self.data.iter().zip(rows) {
            let cells = row
                .into_iter()
                .enumerate()
                .map(|(i, cell)| (i, cell, self.columns[i].get_color(item), false));
            self.write_row(f, cells, &widths)?;
        }
        Ok(())
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, is_last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        // last column does not need padding if it's left-aligned
        PaddingDirection::Left if is_last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Col(usize, &'static str, PaddingDirection);

    impl TableColumn<Vec<&'static str>> for Col {
        fn name(&self) -> Cow<'_, str> {
            self.1.into()
        }

        fn format<'a>(&self, data: &'a Vec<&'static str>) -> Cow<'a, str> {
            data[self.0].into()
        }

        fn padding_direction(&self) -> PaddingDirection {
            self.2
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        colored::control::set_override(false);
        let columns = [
            Col(0, "ID", PaddingDirection::Right),
            Col(1, "Title", PaddingDirection::Left),
        ];
        let data = vec![vec!["1", "Meetup"], vec!["12", "中文 talk"]];

        let out = Table::new(&columns, &data).to_string();

        assert_eq!(out, "ID  Title\n 1  Meetup\n12  中文 talk\n");
    }

    #[test]
    fn test_table_without_header() {
        colored::control::set_override(false);
        let columns = [Col(0, "Path", PaddingDirection::Left)];
        let data = vec![vec!["a.jpg"]];

        let out = Table::new(&columns, &data).with_header(false).to_string();

        assert_eq!(out, "a.jpg\n");
    }
}
