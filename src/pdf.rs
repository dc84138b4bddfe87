use std::io::BufWriter;

use printpdf::*;

use crate::error::{Result, VergerError};
use crate::fmt::money;
use crate::repo::FaithfulRow;
use crate::reports::{GroupTotal, MatrixReport};

// A4 dimensions (mm)
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_TOP: f32 = 25.4;
const MARGIN_BOTTOM: f32 = 25.4;
const MARGIN_LEFT: f32 = 19.05;
const MARGIN_RIGHT: f32 = 19.05;
const ROW_H: f32 = 5.0;
const FONT_SIZE: f32 = 10.0;
const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 10.0;

const CONTENT_W: f32 = PAGE_W - MARGIN_LEFT - MARGIN_RIGHT;

fn approx_text_width(text: &str, size: f32) -> f32 {
    text.len() as f32 * size * 0.18
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Col {
    width: f32,
    align: Align,
}

struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    current_page: PdfPageIndex,
    current_layer: PdfLayerIndex,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| VergerError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| VergerError::Pdf(format!("{e:?}")))?;
        Ok(Self {
            doc,
            font,
            font_bold,
            current_page: page,
            current_layer: layer,
            y: MARGIN_TOP,
        })
    }

    fn pdf_y(&self) -> f32 {
        PAGE_H - self.y
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer");
        self.current_page = page;
        self.current_layer = layer;
        self.y = MARGIN_TOP;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > PAGE_H - MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn text(&self, s: &str, x: f32, size: f32, bold: bool) {
        let font = if bold {
            self.font_bold.clone()
        } else {
            self.font.clone()
        };
        let layer = self
            .doc
            .get_page(self.current_page)
            .get_layer(self.current_layer);
        layer.use_text(s, size, Mm(x), Mm(self.pdf_y()), &font);
    }

    fn hline(&self, x1: f32, x2: f32) {
        let layer = self
            .doc
            .get_page(self.current_page)
            .get_layer(self.current_layer);
        layer.set_outline_thickness(0.5);
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.pdf_y())), false),
                (Point::new(Mm(x2), Mm(self.pdf_y())), false),
            ],
            is_closed: false,
        };
        layer.add_line(line);
    }

    fn header(&mut self, title: &str, parish: &str, scope_label: &str) {
        self.text(title, MARGIN_LEFT, TITLE_SIZE, true);
        self.y += 7.0;
        if !parish.is_empty() {
            self.text(parish, MARGIN_LEFT, SUBTITLE_SIZE, false);
            self.y += 5.0;
        }
        self.text(scope_label, MARGIN_LEFT, SUBTITLE_SIZE, false);
        self.y += 5.0;
        let ts = chrono::Local::now()
            .format("Generated %Y-%m-%d %H:%M")
            .to_string();
        self.text(&ts, MARGIN_LEFT, 8.0, false);
        self.y += 5.0;
        self.hline(MARGIN_LEFT, PAGE_W - MARGIN_RIGHT);
        self.y += 5.0;
    }

    fn table_header(&mut self, cols: &[Col], headers: &[&str]) {
        self.ensure_space(ROW_H * 2.0);
        let mut x = MARGIN_LEFT;
        for (i, col) in cols.iter().enumerate() {
            if i < headers.len() {
                match col.align {
                    Align::Left => self.text(headers[i], x, FONT_SIZE, true),
                    Align::Right => {
                        let tw = approx_text_width(headers[i], FONT_SIZE);
                        self.text(headers[i], x + col.width - tw, FONT_SIZE, true);
                    }
                }
            }
            x += col.width;
        }
        self.y += ROW_H;
        self.hline(MARGIN_LEFT, PAGE_W - MARGIN_RIGHT);
        self.y += 2.0;
    }

    fn table_row(&mut self, cols: &[Col], values: &[&str], bold: bool) {
        self.ensure_space(ROW_H);
        let mut x = MARGIN_LEFT;
        for (i, col) in cols.iter().enumerate() {
            if i < values.len() {
                match col.align {
                    Align::Left => self.text(values[i], x, FONT_SIZE, bold),
                    Align::Right => {
                        let tw = approx_text_width(values[i], FONT_SIZE);
                        self.text(values[i], x + col.width - tw, FONT_SIZE, bold);
                    }
                }
            }
            x += col.width;
        }
        self.y += ROW_H;
    }

    fn separator(&mut self) {
        self.hline(MARGIN_LEFT, PAGE_W - MARGIN_RIGHT);
        self.y += 2.0;
    }

    fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| VergerError::Pdf(format!("{e:?}")))?;
        Ok(buf
            .into_inner()
            .map_err(|e| VergerError::Pdf(e.to_string()))?)
    }
}

// ---------------------------------------------------------------------------
// Render functions
// ---------------------------------------------------------------------------

/// Contribution matrix: one column per year plus a totals column.
pub fn render_matrix(report: &MatrixReport, parish: &str, scope_label: &str) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new("Contribution Report")?;
    pdf.header("Contribution Report", parish, scope_label);

    let name_w: f32 = 55.0;
    let total_w: f32 = 32.0;
    let year_w = if report.years.is_empty() {
        0.0
    } else {
        (CONTENT_W - name_w - total_w) / report.years.len() as f32
    };

    let mut cols = vec![Col { width: name_w, align: Align::Left }];
    for _ in &report.years {
        cols.push(Col { width: year_w, align: Align::Right });
    }
    cols.push(Col { width: total_w, align: Align::Right });

    let year_headers: Vec<String> = report.years.iter().map(|y| y.to_string()).collect();
    let mut headers: Vec<&str> = vec!["Name"];
    headers.extend(year_headers.iter().map(String::as_str));
    headers.push("Total");
    pdf.table_header(&cols, &headers);

    for row in &report.rows {
        let amounts: Vec<String> = report
            .years
            .iter()
            .map(|y| money(row.yearly[y]))
            .collect();
        let total = money(row.total);
        let mut values: Vec<&str> = vec![&row.name];
        values.extend(amounts.iter().map(String::as_str));
        values.push(&total);
        pdf.table_row(&cols, &values, false);
    }

    let grand: rust_decimal::Decimal = report.rows.iter().map(|r| r.total).sum();
    pdf.separator();
    let grand_label = money(grand);
    let mut footer: Vec<&str> = vec!["Total"];
    let blanks: Vec<&str> = report.years.iter().map(|_| "").collect();
    footer.extend(blanks);
    footer.push(&grand_label);
    pdf.table_row(&cols, &footer, true);

    pdf.to_bytes()
}

/// Grouped totals (by sub-parish, or by BEC within one sub-parish).
pub fn render_summary(
    totals: &[GroupTotal],
    group_label: &str,
    parish: &str,
    scope_label: &str,
) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new("Contribution Summary")?;
    pdf.header("Contribution Summary", parish, scope_label);

    let cols = &[
        Col { width: 120.0, align: Align::Left },
        Col { width: 51.9, align: Align::Right },
    ];
    pdf.table_header(cols, &[group_label, "Amount"]);

    for item in totals {
        let amt = money(item.total);
        pdf.table_row(cols, &[&item.name, &amt], false);
    }

    let grand: rust_decimal::Decimal = totals.iter().map(|t| t.total).sum();
    pdf.separator();
    let total = money(grand);
    pdf.table_row(cols, &["Total", &total], true);

    pdf.to_bytes()
}

/// Member roster with contact details.
pub fn render_roster(rows: &[FaithfulRow], parish: &str, scope_label: &str) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new("Faithful Roster")?;
    pdf.header("Faithful Roster", parish, scope_label);

    let cols = &[
        Col { width: 50.0, align: Align::Left },
        Col { width: 32.0, align: Align::Left },
        Col { width: 35.0, align: Align::Left },
        Col { width: 27.0, align: Align::Left },
        Col { width: 27.9, align: Align::Left },
    ];
    pdf.table_header(cols, &["Name", "Contact", "BEC", "Sub-parish", "Baptized"]);

    for r in rows {
        let contact = r.contact_number.as_deref().unwrap_or("");
        let baptized = r.baptism_year.as_deref().unwrap_or("");
        pdf.table_row(
            cols,
            &[&r.name, contact, &r.bec_name, &r.subparish_name, baptized],
            false,
        );
    }

    pdf.to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::repo::{
        add_bec, add_contribution, add_faithful, add_subparish, list_faithful, NewContribution,
        NewFaithful,
    };
    use crate::reports::{contribution_matrix, totals_by_subparish, MatrixKey, MatrixScope};
    use chrono::NaiveDate;

    fn test_db() -> (tempfile::TempDir, rusqlite::Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn seed(conn: &rusqlite::Connection) {
        add_subparish(conn, "Musha").unwrap();
        let bec = add_bec(conn, "Musha", "St. Paul").unwrap();
        let jean = add_faithful(
            conn,
            &NewFaithful {
                name: "Jean Bosco",
                contact_number: Some("0788000001"),
                address: None,
                baptism_year: Some("1990"),
                occupation: None,
                bec_id: bec.id,
            },
        )
        .unwrap();
        for (year, amount) in [(2023, "1000"), (2024, "500")] {
            add_contribution(
                conn,
                &NewContribution {
                    faithful_id: jean,
                    amount: amount.parse().unwrap(),
                    date: NaiveDate::from_ymd_opt(year, 4, 10).unwrap(),
                    year: Some(year),
                    notes: None,
                },
            )
            .unwrap();
        }
    }

    #[test]
    fn test_render_matrix_produces_pdf() {
        let (_dir, conn) = test_db();
        seed(&conn);
        let report = contribution_matrix(&conn, &MatrixScope::Parish, MatrixKey::Name).unwrap();
        let bytes = render_matrix(&report, "Musha Parish", "Whole parish").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_matrix_empty_report() {
        let (_dir, conn) = test_db();
        let report = contribution_matrix(&conn, &MatrixScope::Parish, MatrixKey::Name).unwrap();
        let bytes = render_matrix(&report, "Musha Parish", "Whole parish").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_summary_produces_pdf() {
        let (_dir, conn) = test_db();
        seed(&conn);
        let totals = totals_by_subparish(&conn, None).unwrap();
        let bytes = render_summary(&totals, "Sub-parish", "Musha Parish", "All years").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_roster_produces_pdf() {
        let (_dir, conn) = test_db();
        seed(&conn);
        let rows = list_faithful(&conn).unwrap();
        let bytes = render_roster(&rows, "Musha Parish", "Whole parish").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
