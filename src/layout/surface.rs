//! The drawing surface: buffered pages over `pdf-writer`.
//!
//! Every page keeps its content stream open in memory until [`finish`],
//! which is what makes the footer post-pass possible — after all content
//! pages exist, [`select_page`] can revisit any of them and append the
//! footer with the final page total. Streams are written uncompressed so
//! tests can assert on the drawn text directly.
//!
//! Fonts are the base-14 Type1 set (Times and Helvetica families) with
//! WinAnsi encoding; text is sanitized to that encoding before drawing,
//! which keeps the superscript digits ¹²³ from author lines intact.
//! All public coordinates are millimetres from the top-left corner; the
//! surface converts to PDF points bottom-up internally.
//!
//! [`finish`]: PdfSurface::finish
//! [`select_page`]: PdfSurface::select_page

use crate::config::Rgb;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use super::wrap;

const MM_TO_PT: f32 = 72.0 / 25.4;

/// The base-14 faces the journal template uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    TimesRoman,
    TimesBold,
    TimesItalic,
    Helvetica,
    HelveticaBold,
}

impl Font {
    fn base_name(self) -> &'static [u8] {
        match self {
            Font::TimesRoman => b"Times-Roman",
            Font::TimesBold => b"Times-Bold",
            Font::TimesItalic => b"Times-Italic",
            Font::Helvetica => b"Helvetica",
            Font::HelveticaBold => b"Helvetica-Bold",
        }
    }

    fn resource_name(self) -> Name<'static> {
        match self {
            Font::TimesRoman => Name(b"F1"),
            Font::TimesBold => Name(b"F2"),
            Font::TimesItalic => Name(b"F3"),
            Font::Helvetica => Name(b"F4"),
            Font::HelveticaBold => Name(b"F5"),
        }
    }

    const ALL: [Font; 5] = [
        Font::TimesRoman,
        Font::TimesBold,
        Font::TimesItalic,
        Font::Helvetica,
        Font::HelveticaBold,
    ];
}

/// Horizontal anchoring for [`PdfSurface::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `x` is the left edge of the text.
    Left,
    /// `x` is the center of the text.
    Center,
    /// `x` is the right edge of the text.
    Right,
}

struct PageStream {
    page_id: Ref,
    content_id: Ref,
    content: Content,
}

/// An in-progress PDF document with one open content stream per page.
pub struct PdfSurface {
    pdf: Pdf,
    page_tree_id: Ref,
    font_ids: [Ref; 5],
    next_ref: i32,
    pages: Vec<PageStream>,
    current: usize,
    page_width: f32,
    page_height: f32,
}

impl PdfSurface {
    /// Create an empty surface for pages of the given size (mm). No page
    /// exists yet; call [`new_page`](Self::new_page) before drawing.
    pub fn new(page_width: f32, page_height: f32) -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        pdf.catalog(catalog_id).pages(page_tree_id);

        let mut next_ref = 3;
        let mut font_ids = [Ref::new(1); 5];
        for (slot, font) in font_ids.iter_mut().zip(Font::ALL) {
            let id = Ref::new(next_ref);
            next_ref += 1;
            pdf.type1_font(id)
                .base_font(Name(font.base_name()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            *slot = id;
        }

        Self {
            pdf,
            page_tree_id,
            font_ids,
            next_ref,
            pages: Vec::new(),
            current: 0,
            page_width,
            page_height,
        }
    }

    /// Append a fresh page and make it current.
    pub fn new_page(&mut self) {
        let page_id = self.alloc();
        let content_id = self.alloc();
        self.pages.push(PageStream {
            page_id,
            content_id,
            content: Content::new(),
        });
        self.current = self.pages.len() - 1;
    }

    /// Number of pages created so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Redirect subsequent drawing to page `index` (0-based). Out-of-range
    /// indices are clamped to the last page.
    pub fn select_page(&mut self, index: usize) {
        self.current = index.min(self.pages.len().saturating_sub(1));
    }

    /// Page size in millimetres.
    pub fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    /// Draw `text` with its baseline at `(x, y)` mm.
    pub fn text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Rgb, align: Align) {
        if text.is_empty() {
            return;
        }
        let x = match align {
            Align::Left => x,
            Align::Center => x - wrap::text_width(text, size) / 2.0,
            Align::Right => x - wrap::text_width(text, size),
        };
        let (px, py) = self.to_pt(x, y);
        let bytes = to_win_ansi(text);
        let content = self.content();
        content.begin_text();
        content.set_font(font.resource_name(), size);
        content.set_fill_rgb(
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
        );
        content.next_line(px, py);
        content.show(Str(&bytes));
        content.end_text();
    }

    /// Stroke a straight line between two points, `width` mm thick.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, width: f32) {
        let (px1, py1) = self.to_pt(x1, y1);
        let (px2, py2) = self.to_pt(x2, y2);
        let content = self.content();
        content.set_stroke_rgb(
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
        );
        content.set_line_width(width * MM_TO_PT);
        content.move_to(px1, py1);
        content.line_to(px2, py2);
        content.stroke();
    }

    /// Draw a rectangle at `(x, y)` mm (top-left corner) of `w x h` mm,
    /// filled and/or stroked.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Option<Rgb>, stroke: Option<Rgb>) {
        // PDF rects anchor at the bottom-left corner.
        let (px, py) = self.to_pt(x, y + h);
        let (pw, ph) = (w * MM_TO_PT, h * MM_TO_PT);
        if let Some(c) = fill {
            let content = self.content();
            content.set_fill_rgb(c.r as f32 / 255.0, c.g as f32 / 255.0, c.b as f32 / 255.0);
            content.rect(px, py, pw, ph);
            content.fill_nonzero();
        }
        if let Some(c) = stroke {
            let content = self.content();
            content.set_stroke_rgb(c.r as f32 / 255.0, c.g as f32 / 255.0, c.b as f32 / 255.0);
            content.set_line_width(0.3 * MM_TO_PT);
            content.rect(px, py, pw, ph);
            content.stroke();
        }
    }

    /// Close every page and assemble the document bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let page_box = Rect::new(
            0.0,
            0.0,
            self.page_width * MM_TO_PT,
            self.page_height * MM_TO_PT,
        );
        let page_ids: Vec<Ref> = self.pages.iter().map(|p| p.page_id).collect();

        for page in self.pages {
            let stream = page.content.finish();
            self.pdf.stream(page.content_id, &stream);

            let mut writer = self.pdf.page(page.page_id);
            writer.media_box(page_box);
            writer.parent(self.page_tree_id);
            writer.contents(page.content_id);
            {
                let mut resources = writer.resources();
                let mut fonts = resources.fonts();
                for (font, id) in Font::ALL.into_iter().zip(self.font_ids) {
                    fonts.pair(font.resource_name(), id);
                }
            }
            writer.finish();
        }

        self.pdf
            .pages(self.page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);
        self.pdf.finish()
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_ref);
        self.next_ref += 1;
        id
    }

    fn content(&mut self) -> &mut Content {
        &mut self.pages[self.current].content
    }

    /// Top-down mm to bottom-up pt.
    fn to_pt(&self, x: f32, y: f32) -> (f32, f32) {
        (x * MM_TO_PT, (self.page_height - y) * MM_TO_PT)
    }
}

/// Encode to WinAnsi, replacing anything outside it with `?`.
///
/// WinAnsi coincides with Latin-1 over 0xA0..=0xFF (covering the
/// superscript markers ¹²³) and overlays the 0x80..=0x9F range with
/// typographic characters, the ones Word documents actually contain.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u8,
            '\u{20AC}' => 0x80, // euro
            '\u{201A}' => 0x82,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}
