use anyhow::Result;
use contracts::dashboards::d400_sales_dashboard::dto::SalesRow;
use std::io::Cursor;

pub const EXPORT_FILE_NAME: &str = "sales_report.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub const XLSX_FILE_NAME: &str = "sales_report.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Name of the single worksheet holding the raw rows
pub const XLSX_SHEET_NAME: &str = "Data_Cruda";

/// Column order shared by both export formats
pub const COLUMNS: [&str; 6] = ["date", "total", "product", "category", "customer", "sector"];

/// Serialize rows as CSV with a header line
/// (`date,total,product,category,customer,sector`).
pub fn rows_to_csv(rows: &[SalesRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        // serialize() only emits the header together with the first record
        writer.write_record(COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV export: {}", e))
}

/// Serialize rows as an xlsx workbook with one sheet: a header row, then one
/// row per order. `total` is written as a number, everything else as text.
pub fn rows_to_xlsx(rows: &[SalesRow]) -> Result<Vec<u8>> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(XLSX_SHEET_NAME)
        .map_err(|e| anyhow::anyhow!("Failed to create sheet {}: {}", XLSX_SHEET_NAME, e))?;

    // cell coordinates are (column, row), both 1-based
    for (col, name) in (1u32..).zip(COLUMNS) {
        sheet.get_cell_mut((col, 1)).set_value(name);
    }
    for (row, sale) in (2u32..).zip(rows) {
        sheet
            .get_cell_mut((1, row))
            .set_value(sale.date.format("%Y-%m-%d").to_string());
        sheet.get_cell_mut((2, row)).set_value_number(sale.total);
        sheet.get_cell_mut((3, row)).set_value(sale.product.clone());
        sheet.get_cell_mut((4, row)).set_value(sale.category.code());
        sheet.get_cell_mut((5, row)).set_value(sale.customer.clone());
        sheet.get_cell_mut((6, row)).set_value(sale.sector.code());
    }

    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out)
        .map_err(|e| anyhow::anyhow!("Failed to serialize workbook: {}", e))?;
    Ok(out.into_inner())
}
