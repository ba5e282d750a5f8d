//! # Print-Grid Composition
//!
//! Lays rendered cards into print pages. The page is the fundamental unit:
//! a card is placed whole on a page or moved to the next one — it never
//! breaks across a boundary. The grid repeats one fixed-width column track
//! (the template's physical card width) as many times as fit the printable
//! width, with a configurable gap between cells and a fixed outer margin.
//!
//! Input order is the output order. No sorting, no dedup.

use serde::Serialize;

use crate::card::CardFace;
use crate::model::PageSize;

/// Fixed outer margin around the card grid.
pub const PAGE_MARGIN_MM: f64 = 10.0;
/// Inter-card gap when the job doesn't supply one.
pub const DEFAULT_GRID_GAP_PX: f64 = 20.0;
/// CSS reference pixel: 96 per inch.
const MM_PER_PX: f64 = 25.4 / 96.0;

/// A composed sheet: grid geometry plus the cards placed page by page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    /// Number of card tracks per row.
    pub columns: usize,
    /// Width of each track — exactly the card width.
    pub column_width_mm: f64,
    pub gap_mm: f64,
    pub margin_mm: f64,
    pub pages: Vec<SheetPage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPage {
    pub cards: Vec<PlacedCard>,
}

/// A card pinned to a page, positioned from the page's top-left corner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCard {
    /// Ordinal in the input batch; placement preserves it.
    pub index: usize,
    pub x_mm: f64,
    pub y_mm: f64,
    pub card: CardFace,
}

impl SheetLayout {
    pub fn card_count(&self) -> usize {
        self.pages.iter().map(|p| p.cards.len()).sum()
    }
}

pub fn px_to_mm(px: f64) -> f64 {
    px * MM_PER_PX
}

/// Compose rendered cards into a paginated grid.
///
/// Track math: with printable span `S`, track size `t`, and gap `g`, the
/// number of tracks is `floor((S + g) / (t + g))`, clamped to at least 1 so
/// an oversized card still prints (scaled down by the print backend if it
/// must).
pub fn compose_sheet(
    cards: Vec<CardFace>,
    card_width_mm: f64,
    card_height_mm: f64,
    gap_px: Option<f64>,
    page: PageSize,
) -> SheetLayout {
    let (page_width_mm, page_height_mm) = page.dimensions_mm();
    let gap_mm = px_to_mm(gap_px.unwrap_or(DEFAULT_GRID_GAP_PX));

    let printable_w = (page_width_mm - 2.0 * PAGE_MARGIN_MM).max(0.0);
    let printable_h = (page_height_mm - 2.0 * PAGE_MARGIN_MM).max(0.0);
    let columns = tracks_that_fit(printable_w, card_width_mm, gap_mm);
    let rows = tracks_that_fit(printable_h, card_height_mm, gap_mm);
    let per_page = columns * rows;

    let mut pages = Vec::new();
    let mut batch = cards.into_iter().enumerate();
    loop {
        let placed: Vec<PlacedCard> = batch
            .by_ref()
            .take(per_page)
            .map(|(index, card)| {
                let slot = index % per_page;
                let col = slot % columns;
                let row = slot / columns;
                PlacedCard {
                    index,
                    x_mm: PAGE_MARGIN_MM + col as f64 * (card_width_mm + gap_mm),
                    y_mm: PAGE_MARGIN_MM + row as f64 * (card_height_mm + gap_mm),
                    card,
                }
            })
            .collect();
        if placed.is_empty() {
            break;
        }
        pages.push(SheetPage { cards: placed });
    }

    SheetLayout {
        page_width_mm,
        page_height_mm,
        columns,
        column_width_mm: card_width_mm,
        gap_mm,
        margin_mm: PAGE_MARGIN_MM,
        pages,
    }
}

fn tracks_that_fit(span: f64, track: f64, gap: f64) -> usize {
    if track <= 0.0 {
        return 1;
    }
    let n = ((span + gap) / (track + gap)).floor() as usize;
    n.max(1)
}
