//! The layout engine: `ManuscriptRecord` + metadata → paginated journal PDF.
//!
//! Layout is a single synchronous pass over the record. Page one carries the
//! front matter (masthead, title block, author and citation boxes, abstract
//! region); body sections flow through a [`cursor::FlowCursor`] in one or
//! two columns; each table gets its own page. Footers are stamped in a
//! post-pass once the total page count is known — the buffered pages of
//! [`surface::PdfSurface`] exist exactly for that.
//!
//! Layout never partially fails: empty record fields draw as empty regions
//! so the template silhouette is identical whatever the extractor found.
//! The only error path is a rejected page geometry, checked before any
//! drawing happens.

pub mod cursor;
pub mod surface;
pub mod table;
pub mod wrap;

use crate::config::{ColumnMode, ConvertConfig, JournalMetadata, JournalProfile, PageGeometry, Rgb};
use crate::error::ConvertError;
use crate::manuscript::{ManuscriptRecord, Section, TableBlock};
use cursor::{FlowCursor, FlowStep};
use surface::{Align, Font, PdfSurface};
use tracing::{debug, info};

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Y of the title block's first baseline on page one, mm.
const TITLE_TOP: f32 = 45.0;
/// Advance per wrapped title line (20 pt), mm.
const TITLE_LINE_H: f32 = 8.0;
/// Advance for a section heading (14 pt), mm.
const SECTION_TITLE_H: f32 = 7.0;
/// Advance per body line (10 pt), mm.
const BODY_LINE_H: f32 = 4.5;
/// Advance per small-text line (8–9 pt), mm.
const SMALL_LINE_H: f32 = 4.2;
/// The abstract box never shrinks below the template's fixed height, mm.
const ABSTRACT_MIN_HEIGHT: f32 = 120.0;

/// A finished layout run.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    /// The complete PDF document.
    pub bytes: Vec<u8>,
    /// Derived download name, e.g. `IJSR_Manuscript_2026.pdf`.
    pub filename: String,
    /// Pages produced, after table pagination.
    pub page_count: usize,
}

/// Lay out `record` under `metadata` and the configured geometry/profile.
pub fn render_pdf(
    record: &ManuscriptRecord,
    metadata: &JournalMetadata,
    config: &ConvertConfig,
) -> Result<RenderedPdf, ConvertError> {
    config
        .geometry
        .validate()
        .map_err(ConvertError::InvalidGeometry)?;

    let mut engine = Engine {
        surface: PdfSurface::new(config.geometry.page_width, config.geometry.page_height),
        geometry: config.geometry.clone(),
        profile: &config.profile,
        metadata,
    };

    engine.surface.new_page();
    engine.masthead();

    let mut y = engine.title_block(&record.title);
    y = engine.author_box(record, y);
    y = engine.citation_box(record, y);

    let mut flow = engine.abstract_region(record, y);
    for section in &record.sections {
        engine.section(section, &mut flow);
    }
    for (index, block) in record.tables.iter().enumerate() {
        engine.table_page(block, index);
    }
    engine.stamp_footers();

    let page_count = engine.surface.page_count();
    let bytes = engine.surface.finish();
    let filename = output_filename(&config.profile, metadata);
    info!(
        "Rendered {} pages ({} bytes) as {}",
        page_count,
        bytes.len(),
        filename
    );

    Ok(RenderedPdf {
        bytes,
        filename,
        page_count,
    })
}

/// `{short_name}_Manuscript_{year}.pdf`, timestamp when the year is blank,
/// sanitized to filesystem-safe characters.
pub fn output_filename(profile: &JournalProfile, metadata: &JournalMetadata) -> String {
    let year = metadata.year.trim();
    let stamp = if year.is_empty() {
        chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
    } else {
        year.to_string()
    };
    format!(
        "{}.pdf",
        sanitize_filename(&format!("{}_Manuscript_{}", profile.short_name, stamp))
    )
}

fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '_',
        })
        .collect()
}

struct Engine<'a> {
    surface: PdfSurface,
    geometry: PageGeometry,
    profile: &'a JournalProfile,
    metadata: &'a JournalMetadata,
}

impl Engine<'_> {
    fn left(&self) -> f32 {
        self.geometry.margin_left
    }

    fn right(&self) -> f32 {
        self.geometry.page_width - self.geometry.margin_right
    }

    /// Masthead band drawn at the top of every page.
    fn masthead(&mut self) {
        let theme = &self.profile.theme;
        let (l, r) = (self.left(), self.right());
        self.surface.line(l, 15.0, r, 15.0, theme.main, 0.3);
        self.surface.line(l, 28.0, r, 28.0, theme.main, 0.3);

        self.surface
            .text(l, 21.0, &self.profile.name, Font::TimesBold, 16.0, theme.main, Align::Left);
        self.surface
            .text(l, 25.0, &self.profile.tagline, Font::TimesItalic, 9.0, theme.main, Align::Left);

        let email = format!("Email: {}", self.profile.email);
        let website = format!("Website: {}", self.profile.website);
        self.surface
            .text(r, 21.0, &email, Font::Helvetica, 8.0, theme.text_muted, Align::Right);
        self.surface
            .text(r, 25.0, &website, Font::Helvetica, 8.0, theme.text_muted, Align::Right);
    }

    /// Footer band; only drawn by the post-pass, when `total` is final.
    fn footer(&mut self, page_no: usize, total: usize) {
        let theme = &self.profile.theme;
        let (_, page_h) = self.surface.page_size();
        let y = page_h - 10.0;
        self.surface
            .line(self.left(), y - 4.0, self.right(), y - 4.0, theme.border, 0.2);
        let text = format!(
            "{} | ISSN: {} | Page {} of {}",
            self.profile.name, self.metadata.issn, page_no, total
        );
        let center = self.geometry.page_width / 2.0;
        self.surface
            .text(center, y, &text, Font::TimesRoman, 8.0, theme.text_muted, Align::Center);
    }

    /// Centered, uppercased, wrapped title. Returns the y below the block.
    fn title_block(&mut self, title: &str) -> f32 {
        let theme = &self.profile.theme;
        let center = self.geometry.page_width / 2.0;
        let lines = wrap::wrap(&title.to_uppercase(), 20.0, self.geometry.content_width());
        for (index, line) in lines.iter().enumerate() {
            let y = TITLE_TOP + index as f32 * TITLE_LINE_H;
            self.surface
                .text(center, y, line, Font::TimesBold, 20.0, theme.main, Align::Center);
        }
        TITLE_TOP + lines.len() as f32 * TITLE_LINE_H + 5.0
    }

    /// Bordered author/affiliation box, fixed 35 mm tall.
    fn author_box(&mut self, record: &ManuscriptRecord, y: f32) -> f32 {
        let theme = &self.profile.theme;
        let (l, w) = (self.left(), self.geometry.content_width());
        self.surface.rect(l, y, w, 35.0, None, Some(theme.main));

        self.surface
            .text(l + 5.0, y + 7.0, &record.authors, Font::TimesBold, 11.0, BLACK, Align::Left);

        let joined = record.affiliations.join("\n");
        let mut line_y = y + 13.0;
        for line in wrap::wrap_lines(&joined, 9.0, w - 10.0) {
            if line_y > y + 33.0 {
                break; // the box height is part of the template
            }
            self.surface
                .text(l + 5.0, line_y, &line, Font::TimesRoman, 9.0, BLACK, Align::Left);
            line_y += SMALL_LINE_H;
        }
        y + 40.0
    }

    /// Light-filled dates/citation box, fixed 15 mm tall.
    fn citation_box(&mut self, record: &ManuscriptRecord, y: f32) -> f32 {
        let theme = &self.profile.theme;
        let (l, w) = (self.left(), self.geometry.content_width());
        self.surface.rect(l, y, w, 15.0, Some(theme.light_fill), None);

        let dates = format!(
            "Received: [{}]    |    Accepted: [{}]",
            self.metadata.received, self.metadata.accepted
        );
        self.surface
            .text(self.right() - 5.0, y + 5.0, &dates, Font::TimesRoman, 8.0, BLACK, Align::Right);

        self.surface
            .text(l + 5.0, y + 11.0, "How to cite:", Font::TimesBold, 8.0, BLACK, Align::Left);
        let citation = format!(
            "{} ({}). {}. {}, ISSN: {}.",
            record.first_author(),
            self.metadata.year,
            record.title,
            self.profile.name,
            self.metadata.issn
        );
        let mut cite_y = y + 11.0;
        for line in wrap::wrap(&citation, 8.0, w - 30.0) {
            self.surface
                .text(l + 22.0, cite_y, &line, Font::TimesRoman, 8.0, BLACK, Align::Left);
            cite_y += 3.8;
        }
        y + 25.0
    }

    /// Abstract + keywords region. Returns the flow cursor body sections
    /// start from: top of the right column in double mode, below the box
    /// in single mode.
    fn abstract_region(&mut self, record: &ManuscriptRecord, y: f32) -> FlowCursor {
        match self.geometry.columns {
            ColumnMode::Double => self.abstract_boxed_column(record, y),
            ColumnMode::Single => self.abstract_full_width(record, y),
        }
    }

    fn abstract_boxed_column(&mut self, record: &ManuscriptRecord, y: f32) -> FlowCursor {
        let theme = &self.profile.theme;
        let l = self.left();
        let col_w = self.geometry.column_width();

        let (drop_cap, rest) = split_drop_cap(&record.abstract_text);
        let abs_lines = wrap::wrap(&rest, 9.0, col_w - 12.0);
        let keywords = record.keywords.join(", ");
        let key_lines = wrap::wrap(&keywords, 9.0, col_w - 25.0);

        // Box height grows with content so text never overflows its box;
        // the template's fixed height is kept as the minimum.
        let text_h = 8.0
            + abs_lines.len() as f32 * SMALL_LINE_H
            + 8.0
            + key_lines.len().max(1) as f32 * SMALL_LINE_H
            + 6.0;
        let box_h = text_h.max(ABSTRACT_MIN_HEIGHT);
        self.surface.rect(l, y - 5.0, col_w, box_h, None, Some(theme.main));

        self.surface
            .text(l + col_w / 2.0, y, "Abstract", Font::TimesBold, 12.0, BLACK, Align::Center);
        let body_top = y + 8.0;

        if let Some(cap) = drop_cap {
            self.surface
                .text(l + 2.0, body_top + 6.0, &cap.to_string(), Font::TimesBold, 30.0, theme.main, Align::Left);
        }
        let mut line_y = body_top + 2.0;
        for line in &abs_lines {
            self.surface
                .text(l + 11.0, line_y, line, Font::TimesRoman, 9.0, BLACK, Align::Left);
            line_y += SMALL_LINE_H;
        }

        let key_y = line_y + 8.0;
        self.surface
            .text(l + 5.0, key_y, "Keywords:", Font::TimesBold, 9.0, BLACK, Align::Left);
        let mut ky = key_y;
        for line in &key_lines {
            self.surface
                .text(l + 20.0, ky, line, Font::TimesRoman, 9.0, BLACK, Align::Left);
            ky += SMALL_LINE_H;
        }

        // Body flow starts at the top of the right column, level with the
        // abstract box — not below it.
        FlowCursor::new(self.geometry.clone(), y, 1)
    }

    fn abstract_full_width(&mut self, record: &ManuscriptRecord, y: f32) -> FlowCursor {
        let theme = &self.profile.theme;
        let (l, w) = (self.left(), self.geometry.content_width());

        let (drop_cap, rest) = split_drop_cap(&record.abstract_text);
        let abs_lines = wrap::wrap(&rest, 9.0, w - 12.0);
        let box_h = (8.0 + abs_lines.len() as f32 * SMALL_LINE_H + 8.0).max(40.0);
        self.surface.rect(l, y - 5.0, w, box_h, None, Some(theme.main));

        let center = self.geometry.page_width / 2.0;
        self.surface
            .text(center, y, "Abstract", Font::TimesBold, 12.0, BLACK, Align::Center);
        let body_top = y + 8.0;
        if let Some(cap) = drop_cap {
            self.surface
                .text(l + 2.0, body_top + 6.0, &cap.to_string(), Font::TimesBold, 30.0, theme.main, Align::Left);
        }
        let mut line_y = body_top + 2.0;
        for line in &abs_lines {
            self.surface
                .text(l + 11.0, line_y, line, Font::TimesRoman, 9.0, BLACK, Align::Left);
            line_y += SMALL_LINE_H;
        }

        // Keywords trail on their own line below the box.
        let key_y = y - 5.0 + box_h + 6.0;
        self.surface
            .text(l, key_y, "Keywords:", Font::TimesBold, 9.0, BLACK, Align::Left);
        let keywords = record.keywords.join(", ");
        let key_lines = wrap::wrap(&keywords, 9.0, w - 25.0);
        let mut ky = key_y;
        for line in &key_lines {
            self.surface
                .text(l + 20.0, ky, line, Font::TimesRoman, 9.0, BLACK, Align::Left);
            ky += SMALL_LINE_H;
        }

        FlowCursor::new(self.geometry.clone(), ky.max(key_y + SMALL_LINE_H) + 4.0, 0)
    }

    /// Make room in the flow, creating the page the cursor moved to.
    fn flow_room(&mut self, flow: &mut FlowCursor, height: f32) {
        if flow.ensure_room(height) == FlowStep::PageBreak {
            self.surface.new_page();
            self.masthead();
        }
    }

    /// One body section: bold heading kept with its first line, then the
    /// wrapped content through the flow cursor.
    fn section(&mut self, section: &Section, flow: &mut FlowCursor) {
        let theme = &self.profile.theme;
        debug!("Flowing section '{}'", section.title);

        let title_lines = wrap::wrap(&section.title, 14.0, flow.width());
        self.flow_room(
            flow,
            title_lines.len() as f32 * SECTION_TITLE_H + BODY_LINE_H,
        );
        for line in &title_lines {
            self.surface.text(
                flow.x(),
                flow.y() + SECTION_TITLE_H - 1.5,
                line,
                Font::TimesBold,
                14.0,
                theme.main,
                Align::Left,
            );
            flow.advance(SECTION_TITLE_H);
        }

        for line in wrap::wrap_lines(&section.content, 10.0, flow.width()) {
            self.flow_room(flow, BODY_LINE_H);
            self.surface.text(
                flow.x(),
                flow.y() + BODY_LINE_H - 1.0,
                &line,
                Font::TimesRoman,
                10.0,
                BLACK,
                Align::Left,
            );
            flow.advance(BODY_LINE_H);
        }
        flow.advance(4.0);
    }

    /// One table on its own page: caption, then the striped grid. Rows that
    /// would cross the bottom continue on a fresh page with the head row
    /// repeated.
    fn table_page(&mut self, block: &TableBlock, index: usize) {
        self.surface.new_page();
        self.masthead();
        let mut y = self.geometry.body_top() + 5.0;

        // Word captions usually already read "Table 1: …"; only number the
        // caption ourselves when the source had none.
        let caption = if block.caption.is_empty() {
            format!("Table {}", index + 1)
        } else {
            block.caption.clone()
        };
        self.surface
            .text(self.left(), y, &caption, Font::TimesBold, 10.0, BLACK, Align::Left);
        y += 7.0;

        let widths = table::column_widths(block, self.geometry.content_width());
        y += self.table_row(&block.head, &widths, y, true, false);

        for (row_index, row) in block.body.iter().enumerate() {
            let h = table::row_height(row, &widths);
            if y + h > self.geometry.bottom_limit() {
                self.surface.new_page();
                self.masthead();
                y = self.geometry.body_top() + 5.0;
                y += self.table_row(&block.head, &widths, y, true, false);
            }
            y += self.table_row(row, &widths, y, false, row_index % 2 == 1);
        }
    }

    /// Draw one grid row at `y`; returns its height.
    fn table_row(&mut self, cells: &[String], widths: &[f32], y: f32, header: bool, banded: bool) -> f32 {
        let theme = &self.profile.theme;
        let h = table::row_height(cells, widths);
        let fill = if header {
            Some(theme.main)
        } else if banded {
            Some(theme.light_fill)
        } else {
            Some(WHITE)
        };
        let (font, color) = if header {
            (Font::TimesBold, WHITE)
        } else {
            (Font::TimesRoman, BLACK)
        };

        let mut x = self.left();
        for (column, width) in widths.iter().enumerate() {
            self.surface.rect(x, y, *width, h, fill, Some(theme.border));
            let text = cells.get(column).map(String::as_str).unwrap_or("");
            let inner = (width - 2.0 * table::CELL_PAD_X).max(1.0);
            let mut line_y = y + 3.8;
            for line in wrap::wrap(text, table::CELL_FONT_SIZE, inner) {
                self.surface.text(
                    x + table::CELL_PAD_X,
                    line_y,
                    &line,
                    font,
                    table::CELL_FONT_SIZE,
                    color,
                    Align::Left,
                );
                line_y += table::CELL_LINE_HEIGHT;
            }
            x += width;
        }
        h
    }

    /// Revisit every page and stamp `Page n of total`.
    fn stamp_footers(&mut self) {
        let total = self.surface.page_count();
        for page in 0..total {
            self.surface.select_page(page);
            self.footer(page + 1, total);
        }
    }
}

/// First character (for the drop cap) and the remainder of a paragraph.
fn split_drop_cap(text: &str) -> (Option<char>, String) {
    let mut chars = text.chars();
    let cap = chars.next();
    (cap, chars.as_str().trim_start().to_string())
}
