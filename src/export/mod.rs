//! Tabular export of themes and products (xlsx, CSV, JSON).

use crate::catalog::{Discount, ProductRecord, Theme};
use crate::config::ExportFormat;
use anyhow::{Context, Result};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File stem of the themes table.
pub const THEMES_FILE: &str = "themes";

/// File stem of the products table.
pub const PRODUCTS_FILE: &str = "final_result";

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn optional(value: &Option<String>) -> Self {
        value.as_ref().map(|v| Cell::Text(v.clone())).unwrap_or(Cell::Empty)
    }

    fn as_csv(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// A record that can be written as one table row.
pub trait TableRow: Serialize {
    /// Column headers, in cell order.
    const HEADERS: &'static [&'static str];

    /// Cells for this row.
    fn cells(&self) -> Vec<Cell>;
}

impl TableRow for Theme {
    const HEADERS: &'static [&'static str] = &["name", "url"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Text(self.name.clone()), Cell::Text(self.url.clone())]
    }
}

impl TableRow for ProductRecord {
    const HEADERS: &'static [&'static str] =
        &["name", "collection", "age", "pieces", "rating", "price", "discount"];

    fn cells(&self) -> Vec<Cell> {
        let discount = match &self.discount {
            Discount::NotDiscounted => Cell::Number(0.0),
            Discount::Price(p) => Cell::Text(p.clone()),
            Discount::Unavailable => Cell::Text(self.discount.to_string()),
        };

        vec![
            Cell::Text(self.name.clone()),
            Cell::Text(self.collection.clone()),
            Cell::optional(&self.age),
            Cell::optional(&self.pieces),
            Cell::optional(&self.rating),
            Cell::Text(self.price.clone()),
            discount,
        ]
    }
}

/// Writes tables to files in an output directory, overwriting existing files.
pub struct Exporter {
    format: ExportFormat,
    output_dir: PathBuf,
}

impl Exporter {
    /// Creates a new exporter.
    pub fn new(format: ExportFormat, output_dir: impl Into<PathBuf>) -> Self {
        Self { format, output_dir: output_dir.into() }
    }

    /// Path a table with the given stem is written to.
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", stem, self.format.extension()))
    }

    /// Writes the themes table.
    pub fn write_themes(&self, themes: &[Theme]) -> Result<PathBuf> {
        self.write_table(THEMES_FILE, themes)
    }

    /// Writes the products table.
    pub fn write_products(&self, products: &[ProductRecord]) -> Result<PathBuf> {
        self.write_table(PRODUCTS_FILE, products)
    }

    /// Writes `rows` to `<output_dir>/<stem>.<ext>`.
    pub fn write_table<T: TableRow>(&self, stem: &str, rows: &[T]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory: {}", self.output_dir.display())
        })?;

        let path = self.path_for(stem);
        debug!("Writing {} rows to {}", rows.len(), path.display());

        let written = match self.format {
            ExportFormat::Xlsx => write_xlsx(&path, rows),
            ExportFormat::Csv => write_csv(&path, rows),
            ExportFormat::Json => write_json(&path, rows),
        };
        written.with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Data saved successfully to {}", path.display());
        Ok(path)
    }
}

fn write_xlsx<T: TableRow>(path: &Path, rows: &[T]) -> Result<()> {
    let mut workbook = Workbook::new();

    // Pinned so repeated runs produce identical files
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let worksheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (col, name) in T::HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, n)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv<T: TableRow>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(T::HEADERS)?;

    for row in rows {
        writer.write_record(row.cells().iter().map(Cell::as_csv))?;
    }

    writer.flush()?;
    Ok(())
}

fn write_json<T: TableRow>(path: &Path, rows: &[T]) -> Result<()> {
    let mut json = serde_json::to_string_pretty(rows)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}
