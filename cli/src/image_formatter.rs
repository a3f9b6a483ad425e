// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use eventful_core::Image;

use crate::table::{Table, TableColumn};
use crate::util::ArgOutputFormat;

#[derive(Debug)]
pub struct ImageFormatter {
    columns: Vec<ImageColumn>,
    format: ArgOutputFormat,
}

impl ImageFormatter {
    pub fn new(format: ArgOutputFormat) -> Self {
        Self {
            columns: vec![ImageColumn::Path, ImageColumn::Caption],
            format,
        }
    }

    pub fn format<'a>(&'a self, images: &'a [Image]) -> Display<'a> {
        Display {
            images,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    images: &'a [Image],
    formatter: &'a ImageFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.images).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            ArgOutputFormat::Table if self.images.is_empty() => writeln!(f, "No images found."),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(&self.formatter.columns, self.images)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ImageColumn {
    Path,
    Caption,
}

impl TableColumn<Image> for ImageColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ImageColumn::Path => "Path".into(),
            ImageColumn::Caption => "Caption".into(),
        }
    }

    fn format<'a>(&self, data: &'a Image) -> Cow<'a, str> {
        match self {
            ImageColumn::Path => data.path.as_str().into(),
            ImageColumn::Caption => data.caption.as_str().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_table() {
        colored::control::set_override(false);
        let images = vec![
            Image {
                path: "images/park.jpg".to_string(),
                caption: "A park".to_string(),
            },
            Image {
                path: "images/x.jpg".to_string(),
                caption: String::new(),
            },
        ];

        let out = ImageFormatter::new(ArgOutputFormat::Table)
            .format(&images)
            .to_string();

        assert_eq!(
            out,
            "Path             Caption\nimages/park.jpg  A park\nimages/x.jpg     \n"
        );
    }
}
