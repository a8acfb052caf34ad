//! The landing page drawn over the particle field.

use chrono::{Datelike, Local};
use log::debug;
use mote_core::{Palette, Theme};
use mote_field::hsl_to_rgb;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use crate::effects::{SmoothScroll, Tilt, anchor_target, should_reveal, visible_fraction};

/// In-page navigation link.
#[derive(Debug)]
struct Link {
    label: &'static str,
    href: &'static str,
}

/// Bordered card that tilts toward the pointer.
#[derive(Debug)]
struct Card {
    title: &'static str,
    lines: [&'static str; 2],
}

/// A titled block of the page, revealed when scrolled into view.
#[derive(Debug)]
struct Section {
    id: &'static str,
    title: &'static str,
    body: &'static [&'static str],
    cards: &'static [Card],
}

const NAME: &str = "Mira Okafor";
const TAGLINE: &str = "systems programmer, occasional typographer";

const NAV: &[Link] = &[
    Link {
        label: "About",
        href: "#about",
    },
    Link {
        label: "Work",
        href: "#work",
    },
    Link {
        label: "Writing",
        href: "#writing",
    },
    Link {
        label: "Contact",
        href: "#contact",
    },
];

const SECTIONS: &[Section] = &[
    Section {
        id: "about",
        title: "About",
        body: &[
            "I build small, fast tools: storage engines, parsers and the odd",
            "terminal toy. Most of my week goes into making slow things quick",
            "and quick things boring enough to trust.",
        ],
        cards: &[],
    },
    Section {
        id: "work",
        title: "Selected work",
        body: &["A few projects I keep coming back to."],
        cards: &[
            Card {
                title: "tinylog",
                lines: ["append-only log store", "crash-safe, 40k LOC"],
            },
            Card {
                title: "quill",
                lines: ["incremental markdown", "parser with spans"],
            },
            Card {
                title: "orbit",
                lines: ["terminal orrery", "drawn in braille"],
            },
        ],
    },
    Section {
        id: "writing",
        title: "Writing",
        body: &[
            "Notes on write-ahead logs and why fsync lies to you",
            "A gentle tour of Pratt parsing",
            "Half-blocks: drawing pixels in a terminal",
            "What a profiler will not tell you",
        ],
        cards: &[],
    },
    Section {
        id: "contact",
        title: "Contact",
        body: &[
            "mira@okafor.dev",
            "Open to contract work on storage and developer tooling.",
        ],
        cards: &[],
    },
];

const HEADER_ROWS: u16 = 6;
const NAV_ROW: u16 = 4;
const SECTION_GAP: u16 = 2;
const CARD_ROWS: u16 = 5;
const CARD_WIDTH: u16 = 28;
const CARD_GAP: u16 = 2;
const FOOTER_ROWS: u16 = 3;
const MARGIN: u16 = 3;

/// Something on screen the pointer or keyboard can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Link(usize),
    ThemeToggle,
    Card { section: usize, card: usize },
}

/// Request from the page to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    ToggleTheme,
}

/// Rows a section occupies in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    top: u16,
    height: u16,
}

/// Text colors for the current theme.
#[derive(Debug, Clone, Copy)]
struct Ink {
    text: Color,
    muted: Color,
    accent: Color,
}

impl Ink {
    fn for_palette(palette: &Palette) -> Self {
        match palette.theme {
            Theme::Dark => Self {
                text: Color::Rgb(226, 232, 240),
                muted: Color::Rgb(148, 163, 184),
                accent: hsl_to_rgb(palette.bg_hue, 0.85, 0.68),
            },
            Theme::Light => Self {
                text: Color::Rgb(30, 27, 46),
                muted: Color::Rgb(91, 85, 112),
                accent: hsl_to_rgb(palette.bg_hue, 0.6, 0.45),
            },
        }
    }
}

/// Scroll position, reveal flags, focus and hover state of the page.
#[derive(Debug)]
pub struct Page {
    blocks: Vec<Block>,
    /// Total document rows.
    height: u16,
    revealed: Vec<bool>,
    scroll: f32,
    smooth: Option<SmoothScroll>,
    viewport_rows: u16,
    /// Index into the focus order: nav links, then the theme toggle.
    focus: Option<usize>,
    /// Focus markers stay hidden until the keyboard is used to move focus.
    show_focus: bool,
    tilt: Option<(Target, Tilt)>,
    /// Hit areas recorded by the last render.
    targets: Vec<(Rect, Target)>,
    year: i32,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        let mut blocks = Vec::with_capacity(SECTIONS.len());
        let mut cursor = HEADER_ROWS;
        for section in SECTIONS {
            let mut height = 2 + section.body.len() as u16;
            if !section.cards.is_empty() {
                height += 1 + CARD_ROWS;
            }
            blocks.push(Block {
                top: cursor,
                height,
            });
            cursor += height + SECTION_GAP;
        }

        Self {
            blocks,
            height: cursor + FOOTER_ROWS,
            revealed: vec![false; SECTIONS.len()],
            scroll: 0.0,
            smooth: None,
            viewport_rows: 0,
            focus: None,
            show_focus: false,
            tilt: None,
            targets: Vec::new(),
            year: Local::now().year(),
        }
    }

    fn max_scroll(&self) -> f32 {
        self.height.saturating_sub(self.viewport_rows) as f32
    }

    /// Advance smooth scrolling and reveal sections that came into view.
    pub fn tick(&mut self, now_ms: f64, viewport_rows: u16) {
        self.viewport_rows = viewport_rows;
        if let Some(smooth) = self.smooth {
            self.scroll = smooth.position(now_ms);
            if smooth.is_done(now_ms) {
                self.smooth = None;
            }
        }
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());

        for (block, revealed) in self.blocks.iter().zip(self.revealed.iter_mut()) {
            if *revealed {
                continue;
            }
            let fraction = visible_fraction(
                block.top as f32,
                block.height as f32,
                self.scroll,
                viewport_rows as f32,
            );
            *revealed = should_reveal(fraction);
        }
    }

    /// Scroll by `rows`, cancelling any smooth scroll in flight.
    pub fn scroll_by(&mut self, rows: f32) {
        self.smooth = None;
        self.scroll = (self.scroll + rows).clamp(0.0, self.max_scroll());
    }

    /// Scroll by whole viewports, keeping two rows of overlap.
    pub fn scroll_pages(&mut self, pages: f32) {
        let rows = self.viewport_rows.saturating_sub(2).max(1);
        self.scroll_by(pages * rows as f32);
    }

    pub fn scroll_to_top(&mut self) {
        self.smooth = None;
        self.scroll = 0.0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.smooth = None;
        self.scroll = self.max_scroll();
    }

    /// Smoothly bring the section `href` points at to the top of the
    /// viewport. Returns false when the link has no target on this page.
    pub fn scroll_to_anchor(&mut self, href: &str, now_ms: f64) -> bool {
        let Some(id) = anchor_target(href) else {
            return false;
        };
        let Some(index) = SECTIONS.iter().position(|s| s.id == id) else {
            debug!("no section for anchor {href}");
            return false;
        };
        let target = (self.blocks[index].top as f32).min(self.max_scroll());
        if self.smooth.is_some_and(|s| s.target() == target) {
            return true;
        }
        self.smooth = Some(SmoothScroll::new(self.scroll, target, now_ms));
        true
    }

    fn focus_len() -> usize {
        NAV.len() + 1
    }

    fn focus_target(index: usize) -> Target {
        if index < NAV.len() {
            Target::Link(index)
        } else {
            Target::ThemeToggle
        }
    }

    /// Move keyboard focus forward (Tab).
    pub fn focus_next(&mut self) {
        self.show_focus = true;
        self.focus = Some(match self.focus {
            Some(i) => (i + 1) % Self::focus_len(),
            None => 0,
        });
    }

    /// Move keyboard focus backward (BackTab).
    pub fn focus_prev(&mut self) {
        self.show_focus = true;
        self.focus = Some(match self.focus {
            Some(0) | None => Self::focus_len() - 1,
            Some(i) => i - 1,
        });
    }

    /// Follow the focused element (Enter).
    pub fn activate(&mut self, now_ms: f64) -> Option<PageAction> {
        let target = Self::focus_target(self.focus?);
        self.act_on(target, now_ms)
    }

    fn act_on(&mut self, target: Target, now_ms: f64) -> Option<PageAction> {
        match target {
            Target::Link(i) => {
                self.scroll_to_anchor(NAV[i].href, now_ms);
                None
            }
            Target::ThemeToggle => Some(PageAction::ToggleTheme),
            Target::Card { .. } => None,
        }
    }

    fn target_at(&self, col: u16, row: u16) -> Option<(Rect, Target)> {
        self.targets
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains((col, row).into()))
            .copied()
    }

    /// Mouse click at a cell.
    pub fn click(&mut self, col: u16, row: u16, now_ms: f64) -> Option<PageAction> {
        let (_, target) = self.target_at(col, row)?;
        match target {
            Target::Link(i) => self.focus = Some(i),
            Target::ThemeToggle => self.focus = Some(NAV.len()),
            Target::Card { .. } => {}
        }
        self.act_on(target, now_ms)
    }

    /// Pointer moved to a cell: tilt the card under it, if any.
    pub fn hover(&mut self, col: u16, row: u16) {
        self.tilt = match self.target_at(col, row) {
            Some((rect, target @ Target::Card { .. })) => {
                let x = (col - rect.x) as f32 + 0.5;
                let y = (row - rect.y) as f32 + 0.5;
                let tilt = Tilt::from_pointer(
                    x / rect.width as f32 - 0.5,
                    y / rect.height as f32 - 0.5,
                );
                Some((target, tilt))
            }
            _ => None,
        };
    }

    /// Pointer left the window.
    pub fn leave(&mut self) {
        self.tilt = None;
    }

    /// Draw the page into `area` of `buf`, recording hit areas.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        self.targets.clear();
        let ink = Ink::for_palette(palette);
        let origin = area.y as i32 - self.scroll.round() as i32;
        let left = (area.x + MARGIN) as i32;

        // Header
        put(
            buf,
            area,
            left,
            origin + 1,
            NAME,
            Style::new().fg(ink.accent).add_modifier(Modifier::BOLD),
        );
        put(buf, area, left, origin + 2, TAGLINE, Style::new().fg(ink.muted));

        let nav_y = origin + NAV_ROW as i32;
        let mut x = left;
        for (i, link) in NAV.iter().enumerate() {
            let style = self.focus_style(i, Style::new().fg(ink.text).add_modifier(Modifier::UNDERLINED));
            put(buf, area, x, nav_y, link.label, style);
            self.record(area, x, nav_y, link.label.len() as u16, 1, Target::Link(i));
            x += link.label.len() as i32 + 3;
        }

        let toggle = format!("[ {} ]", palette.theme);
        let toggle_x = area.right() as i32 - MARGIN as i32 - toggle.len() as i32;
        let style = self.focus_style(NAV.len(), Style::new().fg(ink.accent));
        put(buf, area, toggle_x, nav_y, &toggle, style);
        self.record(area, toggle_x, nav_y, toggle.len() as u16, 1, Target::ThemeToggle);

        // Sections
        for (index, section) in SECTIONS.iter().enumerate() {
            if !self.revealed[index] {
                continue;
            }
            let top = origin + self.blocks[index].top as i32;
            put(
                buf,
                area,
                left,
                top,
                section.title,
                Style::new().fg(ink.accent).add_modifier(Modifier::BOLD),
            );
            for (i, line) in section.body.iter().enumerate() {
                put(buf, area, left, top + 2 + i as i32, line, Style::new().fg(ink.text));
            }

            let card_top = top + 3 + section.body.len() as i32;
            for (i, card) in section.cards.iter().enumerate() {
                let target = Target::Card {
                    section: index,
                    card: i,
                };
                let x = left + (i as u16 * (CARD_WIDTH + CARD_GAP)) as i32;
                self.record(area, x, card_top, CARD_WIDTH, CARD_ROWS, target);
                let tilt = self.tilt.filter(|(t, _)| *t == target).map(|(_, tilt)| tilt);
                draw_card(buf, area, x, card_top, card, tilt, ink);
            }
        }

        // Footer
        let footer = format!("© {} {NAME}", self.year);
        let footer_y = origin + self.height as i32 - 2;
        let footer_x = area.x as i32 + (area.width as i32 - footer.chars().count() as i32) / 2;
        put(buf, area, footer_x, footer_y, &footer, Style::new().fg(ink.muted));
    }

    fn focus_style(&self, index: usize, base: Style) -> Style {
        if self.show_focus && self.focus == Some(index) {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    }

    /// Remember the on-screen part of a hit area.
    fn record(&mut self, area: Rect, x: i32, y: i32, width: u16, height: u16, target: Target) {
        if let Some(rect) = clip(area, x, y, width, height) {
            self.targets.push((rect, target));
        }
    }
}

fn draw_card(
    buf: &mut Buffer,
    area: Rect,
    x: i32,
    y: i32,
    card: &Card,
    tilt: Option<Tilt>,
    ink: Ink,
) {
    let (dx, dy) = tilt.map(Tilt::cell_offset).unwrap_or((0, 0));
    let (x, y) = (x + dx, y + dy);
    let border = match tilt {
        Some(_) => Style::new().fg(ink.accent).add_modifier(Modifier::BOLD),
        None => Style::new().fg(ink.muted),
    };
    let inner = CARD_WIDTH as usize - 2;
    let rule = "─".repeat(inner);

    put(buf, area, x, y, &format!("╭{rule}╮"), border);
    for row in 1..CARD_ROWS as i32 - 1 {
        put(buf, area, x, y + row, "│", border);
        put(buf, area, x + CARD_WIDTH as i32 - 1, y + row, "│", border);
    }
    put(buf, area, x, y + CARD_ROWS as i32 - 1, &format!("╰{rule}╯"), border);

    put(
        buf,
        area,
        x + 2,
        y + 1,
        card.title,
        Style::new().fg(ink.text).add_modifier(Modifier::BOLD),
    );
    for (i, line) in card.lines.iter().enumerate() {
        put(buf, area, x + 2, y + 2 + i as i32, line, Style::new().fg(ink.muted));
    }
}

/// Write the visible glyphs of `text` at (`x`, `y`), clipped to `clip`.
/// Spaces are skipped so the field behind stays visible.
fn put(buf: &mut Buffer, clip: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < clip.top() as i32 || y >= clip.bottom() as i32 {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if ch == ' ' || cx < clip.left() as i32 || cx >= clip.right() as i32 {
            continue;
        }
        if let Some(cell) = buf.cell_mut((cx as u16, y as u16)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

/// Part of the rectangle at (`x`, `y`) that lies inside `area`.
fn clip(area: Rect, x: i32, y: i32, width: u16, height: u16) -> Option<Rect> {
    let x0 = x.max(area.left() as i32);
    let y0 = y.max(area.top() as i32);
    let x1 = (x + width as i32).min(area.right() as i32);
    let y1 = (y + height as i32).min(area.bottom() as i32);
    (x0 < x1 && y0 < y1).then(|| Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(page: &mut Page, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        page.render(area, &mut buf, &Palette::default());
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn section_index(id: &str) -> usize {
        SECTIONS.iter().position(|s| s.id == id).unwrap()
    }

    #[test]
    fn test_layout_is_contiguous() {
        let page = Page::new();
        assert_eq!(page.blocks[0].top, HEADER_ROWS);
        for pair in page.blocks.windows(2) {
            assert_eq!(pair[1].top, pair[0].top + pair[0].height + SECTION_GAP);
        }
        let last = page.blocks.last().unwrap();
        assert_eq!(page.height, last.top + last.height + SECTION_GAP + FOOTER_ROWS);
    }

    #[test]
    fn test_reveal_on_scroll_is_sticky() {
        let mut page = Page::new();
        assert!(page.revealed.iter().all(|r| !r));

        page.tick(0.0, 12);
        assert!(page.revealed[0]);
        assert!(!page.revealed[section_index("contact")]);

        page.scroll_to_bottom();
        page.tick(0.0, 12);
        assert!(page.revealed[section_index("contact")]);

        page.scroll_to_top();
        page.tick(0.0, 12);
        assert!(page.revealed.iter().all(|r| *r));
    }

    #[test]
    fn test_reveal_needs_threshold() {
        let mut page = Page::new();
        let about = page.blocks[0];
        // One row of a five-row section is 20%, just above the threshold.
        page.tick(0.0, about.top + 1);
        assert!(page.revealed[0]);

        let mut page = Page::new();
        page.tick(0.0, about.top);
        assert!(!page.revealed[0]);
    }

    #[test]
    fn test_manual_scroll_clamps() {
        let mut page = Page::new();
        page.tick(0.0, 10);
        page.scroll_by(-5.0);
        assert_eq!(page.scroll, 0.0);
        page.scroll_pages(1.0);
        assert_eq!(page.scroll, 8.0);
        page.scroll_pages(100.0);
        assert_eq!(page.scroll, page.max_scroll());
        page.scroll_to_top();
        assert_eq!(page.scroll, 0.0);
    }

    #[test]
    fn test_manual_scroll_cancels_anchor() {
        let mut page = Page::new();
        page.tick(0.0, 10);
        assert!(page.scroll_to_anchor("#contact", 0.0));
        page.scroll_by(1.0);
        assert!(page.smooth.is_none());
        page.tick(1000.0, 10);
        assert_eq!(page.scroll, 1.0);
    }

    #[test]
    fn test_anchor_scrolls_smoothly() {
        let mut page = Page::new();
        page.tick(0.0, 10);
        assert!(page.scroll_to_anchor("#writing", 100.0));

        page.tick(150.0, 10);
        let target = page.blocks[section_index("writing")].top as f32;
        assert!(page.scroll > 0.0 && page.scroll < target);

        page.tick(1000.0, 10);
        assert_eq!(page.scroll, target);
        assert!(page.smooth.is_none());
    }

    #[test]
    fn test_anchor_edge_cases() {
        let mut page = Page::new();
        page.tick(0.0, 10);
        assert!(!page.scroll_to_anchor("#", 0.0));
        assert!(!page.scroll_to_anchor("#missing", 0.0));
        assert!(page.smooth.is_none());
    }

    #[test]
    fn test_anchor_clamps_to_document_end() {
        let mut page = Page::new();
        page.tick(0.0, 30);
        assert!(page.scroll_to_anchor("#contact", 0.0));
        page.tick(10_000.0, 30);
        assert_eq!(page.scroll, page.max_scroll());
    }

    #[test]
    fn test_focus_cycles() {
        let mut page = Page::new();
        assert!(!page.show_focus);
        assert_eq!(page.activate(0.0), None);

        page.focus_next();
        assert!(page.show_focus);
        assert_eq!(page.focus, Some(0));
        for _ in 0..NAV.len() {
            page.focus_next();
        }
        assert_eq!(page.focus, Some(NAV.len()));
        assert_eq!(page.activate(0.0), Some(PageAction::ToggleTheme));
        page.focus_next();
        assert_eq!(page.focus, Some(0));
        page.focus_prev();
        assert_eq!(page.focus, Some(NAV.len()));
    }

    #[test]
    fn test_enter_follows_link() {
        let mut page = Page::new();
        page.tick(0.0, 10);
        page.focus_next();
        page.focus_next();
        assert_eq!(page.activate(0.0), None);
        page.tick(1000.0, 10);
        assert_eq!(page.scroll, page.blocks[section_index("work")].top as f32);
    }

    #[test]
    fn test_render_header_and_toggle_click() {
        let area = Rect::new(0, 0, 100, 20);
        let mut page = Page::new();
        page.tick(0.0, area.height);
        let buf = rendered(&mut page, area);

        assert!(row_text(&buf, 1).contains("Mira"));
        assert!(row_text(&buf, NAV_ROW).contains("About"));
        assert!(row_text(&buf, NAV_ROW).contains("[ dark ]"));

        let toggle_x = area.right() - MARGIN - 4;
        assert_eq!(page.click(toggle_x, NAV_ROW, 0.0), Some(PageAction::ToggleTheme));
        assert_eq!(page.click(0, 0, 0.0), None);
    }

    #[test]
    fn test_click_nav_link_scrolls() {
        let area = Rect::new(0, 0, 100, 20);
        let mut page = Page::new();
        page.tick(0.0, area.height);
        rendered(&mut page, area);

        assert_eq!(page.click(MARGIN + 1, NAV_ROW, 0.0), None);
        assert_eq!(page.focus, Some(0));
        assert!(!page.show_focus);
        page.tick(1000.0, area.height);
        assert_eq!(page.scroll, page.blocks[section_index("about")].top as f32);
    }

    #[test]
    fn test_hover_tilts_card() {
        let area = Rect::new(0, 0, 100, 40);
        let mut page = Page::new();
        page.tick(0.0, area.height);
        rendered(&mut page, area);

        let work = page.blocks[section_index("work")];
        let card_top = work.top + 3 + SECTIONS[section_index("work")].body.len() as u16;
        // Top-right corner of the first card.
        page.hover(MARGIN + CARD_WIDTH - 1, card_top);
        let (target, tilt) = page.tilt.unwrap();
        assert_eq!(
            target,
            Target::Card {
                section: section_index("work"),
                card: 0
            }
        );
        assert!(tilt.ry > 0.0 && tilt.rx > 0.0);

        page.hover(0, 0);
        assert!(page.tilt.is_none());
        page.hover(MARGIN + 1, card_top + 1);
        assert!(page.tilt.is_some());
        page.leave();
        assert!(page.tilt.is_none());
    }

    #[test]
    fn test_footer_shows_year() {
        let area = Rect::new(0, 0, 80, 12);
        let mut page = Page::new();
        page.tick(0.0, area.height);
        page.scroll_to_bottom();
        page.tick(0.0, area.height);
        let buf = rendered(&mut page, area);
        let year = Local::now().year().to_string();
        assert!((0..area.height).any(|y| row_text(&buf, y).contains(&year)));
    }
}
