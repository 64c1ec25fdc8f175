//! Signature planning
//!
//! Maps a linear run of logical pages onto physical sheets.
//!
//! ## Saddle-stitched signatures
//!
//! `k` sheets are stacked, folded once down the middle and nested. Sheet `s`
//! (0 = outermost) of a signature with `4k` pages carries:
//!
//! ```text
//! backOutside  = 4k - 2s
//! frontOutside = 2s + 1
//! frontInside  = 2s + 2
//! backInside   = 4k - 2s - 1
//! ```
//!
//! One sheet gives `[4, 1, 2, 3]`, two sheets `[8, 1, 2, 7], [6, 3, 4, 5]`.
//!
//! ## Physical sides
//!
//! Left-start fold: front `[backOutside, frontOutside]`,
//! back `[frontInside, backInside]`.
//! Right-start fold swaps each pair: front `[frontOutside, backOutside]`,
//! back `[backInside, frontInside]`. Numbering is unchanged.
//!
//! With four regions per side the sheet holds two strips that are cut apart
//! before folding: the top strip carries planner sheet `2j`, the bottom strip
//! planner sheet `2j + 1`.

use crate::constants::PAGES_PER_SHEET;
use crate::types::{FoldDirection, ImposeError, Result};

use super::{PlacementPlan, PlacementSlot, SheetPageSet, SheetSide};

// =============================================================================
// Signature Calculation
// =============================================================================

/// Page sets of one signature of `sheets` nested sheets, outermost first.
///
/// Numbering is local to the signature (`1..=4 * sheets`); `0` sheets yields
/// an empty plan.
pub fn plan_signature(sheets: usize) -> Vec<SheetPageSet> {
    let total = PAGES_PER_SHEET * sheets;
    (0..sheets)
        .map(|s| SheetPageSet {
            back_outside: total - 2 * s,
            front_outside: 2 * s + 1,
            front_inside: 2 * s + 2,
            back_inside: total - 2 * s - 1,
        })
        .collect()
}

/// Round `total_pages` up to whole signatures
pub fn padded_page_count(total_pages: usize, sheets_per_signature: usize) -> usize {
    let per_signature = PAGES_PER_SHEET * sheets_per_signature;
    if per_signature == 0 {
        return 0;
    }
    total_pages.div_ceil(per_signature) * per_signature
}

/// Number of signatures needed for `total_pages`
pub fn signature_count(total_pages: usize, sheets_per_signature: usize) -> usize {
    let per_signature = PAGES_PER_SHEET * sheets_per_signature;
    if per_signature == 0 {
        return 0;
    }
    total_pages.div_ceil(per_signature)
}

/// Page sets of every sheet of the document, in global numbering.
///
/// Signatures are independent; each one's local numbers are shifted by the
/// pages of the signatures before it.
pub fn plan_signatures(total_pages: usize, sheets_per_signature: usize) -> Vec<SheetPageSet> {
    let per_signature = PAGES_PER_SHEET * sheets_per_signature;
    let local = plan_signature(sheets_per_signature);

    (0..signature_count(total_pages, sheets_per_signature))
        .flat_map(|sig| {
            let offset = sig * per_signature;
            local.iter().map(move |set| set.offset(offset))
        })
        .collect()
}

// =============================================================================
// Physical Side Order
// =============================================================================

/// Left-to-right pages of the front and back of a folded strip
pub fn side_pairs(set: &SheetPageSet, fold: FoldDirection) -> ([usize; 2], [usize; 2]) {
    match fold {
        FoldDirection::LeftStart => (
            [set.back_outside, set.front_outside],
            [set.front_inside, set.back_inside],
        ),
        FoldDirection::RightStart => (
            [set.front_outside, set.back_outside],
            [set.back_inside, set.front_inside],
        ),
    }
}

// =============================================================================
// Placement Plans
// =============================================================================

/// Plan folded signatures for `total_pages` logical pages.
///
/// Pages past `total_pages` become `None` padding at the end of the
/// sequence.
pub fn plan_booklet(
    total_pages: usize,
    sheets_per_signature: usize,
    fold: FoldDirection,
    regions_per_side: usize,
) -> Result<PlacementPlan> {
    check_regions(regions_per_side)?;
    if sheets_per_signature == 0 && total_pages > 0 {
        return Err(ImposeError::Config(
            "Sheets per signature must be at least 1".to_string(),
        ));
    }

    let strips = plan_signatures(total_pages, sheets_per_signature);
    let strips_per_sheet = regions_per_side / 2;
    let sheet_count = strips.len().div_ceil(strips_per_sheet);
    let present = |page: usize| (page <= total_pages).then_some(page);

    let mut slots = Vec::with_capacity(sheet_count * regions_per_side * 2);
    for sheet_index in 0..sheet_count {
        let sheet_strips: Vec<Option<&SheetPageSet>> = (0..strips_per_sheet)
            .map(|row| strips.get(sheet_index * strips_per_sheet + row))
            .collect();

        for side in [SheetSide::Front, SheetSide::Back] {
            for (row, strip) in sheet_strips.iter().enumerate() {
                let pair = strip.map(|set| {
                    let (front, back) = side_pairs(set, fold);
                    match side {
                        SheetSide::Front => front,
                        SheetSide::Back => back,
                    }
                });
                for col in 0..2 {
                    slots.push(PlacementSlot {
                        sheet_index,
                        side,
                        quadrant: row * 2 + col,
                        page: pair.and_then(|p| present(p[col])),
                    });
                }
            }
        }
    }

    Ok(PlacementPlan {
        regions_per_side,
        sheet_count,
        total_pages,
        padded_pages: padded_page_count(total_pages, sheets_per_signature),
        signatures: Some(signature_count(total_pages, sheets_per_signature)),
        slots,
    })
}

/// Where logical page `page` lands when sheets carry reading spreads.
///
/// Every side carries the next `regions_per_side` pages in reading order,
/// each row left to right (right to left for a right-start fold). The
/// position does not depend on the total page count.
pub fn spread_position(
    page: usize,
    fold: FoldDirection,
    regions_per_side: usize,
) -> (usize, SheetSide, usize) {
    let index = page.saturating_sub(1);
    let side_number = index / regions_per_side;
    let within = index % regions_per_side;
    let side = if side_number % 2 == 0 {
        SheetSide::Front
    } else {
        SheetSide::Back
    };
    let col = match fold {
        FoldDirection::LeftStart => within % 2,
        FoldDirection::RightStart => 1 - within % 2,
    };
    (side_number / 2, side, (within / 2) * 2 + col)
}

/// Plan unfolded reading spreads (see [`spread_position`])
pub fn plan_spreads(
    total_pages: usize,
    fold: FoldDirection,
    regions_per_side: usize,
) -> Result<PlacementPlan> {
    check_regions(regions_per_side)?;
    let per_sheet = regions_per_side * 2;
    let padded_pages = total_pages.div_ceil(per_sheet) * per_sheet;

    let mut slots: Vec<PlacementSlot> = (1..=padded_pages)
        .map(|page| {
            let (sheet_index, side, quadrant) = spread_position(page, fold, regions_per_side);
            PlacementSlot {
                sheet_index,
                side,
                quadrant,
                page: (page <= total_pages).then_some(page),
            }
        })
        .collect();
    slots.sort_by_key(|s| (s.sheet_index, s.side == SheetSide::Back, s.quadrant));

    Ok(PlacementPlan {
        regions_per_side,
        sheet_count: padded_pages / per_sheet,
        total_pages,
        padded_pages,
        signatures: None,
        slots,
    })
}

fn check_regions(regions_per_side: usize) -> Result<()> {
    if regions_per_side == 2 || regions_per_side == 4 {
        Ok(())
    } else {
        Err(ImposeError::Layout(format!(
            "A sheet side holds 2 or 4 regions, got {}",
            regions_per_side
        )))
    }
}

// =============================================================================
// Tests
// =============================================================================
