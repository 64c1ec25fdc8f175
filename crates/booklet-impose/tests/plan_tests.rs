use booklet_impose::layout::*;
use booklet_impose::*;
use std::collections::BTreeSet;

#[test]
fn test_golden_signatures() {
    let one: Vec<_> = plan_signature(1).iter().map(|s| s.as_tuple()).collect();
    assert_eq!(one, vec![(4, 1, 2, 3)]);

    let two: Vec<_> = plan_signature(2).iter().map(|s| s.as_tuple()).collect();
    assert_eq!(two, vec![(8, 1, 2, 7), (6, 3, 4, 5)]);
}

#[test]
fn test_signature_uses_every_local_page_once() {
    for k in 1..=8 {
        let pages: Vec<usize> = plan_signature(k).iter().flat_map(|s| s.pages()).collect();
        let unique: BTreeSet<usize> = pages.iter().copied().collect();
        assert_eq!(pages.len(), 4 * k);
        assert_eq!(unique, (1..=4 * k).collect::<BTreeSet<_>>(), "k = {}", k);
    }
}

#[test]
fn test_folded_sheets_read_in_order() {
    // Reading a folded signature: for each sheet from the outside in, the
    // front-outside then front-inside pages come first; the back halves
    // follow from the innermost sheet outwards.
    for k in 1..=6 {
        let plan = plan_signature(k);
        let mut reading: Vec<usize> = Vec::new();
        for set in &plan {
            reading.push(set.front_outside);
            reading.push(set.front_inside);
        }
        for set in plan.iter().rev() {
            reading.push(set.back_inside);
            reading.push(set.back_outside);
        }
        assert_eq!(reading, (1..=4 * k).collect::<Vec<_>>(), "k = {}", k);
    }
}

#[test]
fn test_every_page_placed_exactly_once() {
    for total in [1, 3, 4, 13, 20, 21, 47] {
        for k in [1, 2, 5] {
            for regions in [2, 4] {
                for fold in [FoldDirection::LeftStart, FoldDirection::RightStart] {
                    let plan = plan_booklet(total, k, fold, regions).unwrap();
                    let placed: Vec<usize> = plan.slots.iter().filter_map(|s| s.page).collect();
                    let unique: BTreeSet<usize> = placed.iter().copied().collect();
                    assert_eq!(placed.len(), total);
                    assert_eq!(unique, (1..=total).collect::<BTreeSet<_>>());
                }
            }
        }
    }
}

#[test]
fn test_padding_at_end() {
    let plan = plan_booklet(13, 5, FoldDirection::LeftStart, 2).unwrap();
    assert_eq!(plan.padded_pages, 20);
    assert_eq!(plan.signatures, Some(1));
    assert_eq!(plan.sheet_count, 5);
    assert_eq!(plan.output_pages(), 10);

    // Outermost sheet front: [20, 1], with 20 a padding blank
    assert_eq!(plan.side_pages(0, SheetSide::Front), vec![None, Some(1)]);
    assert_eq!(plan.side_pages(0, SheetSide::Back), vec![Some(2), None]);
}

#[test]
fn test_second_signature_numbering() {
    let plan = plan_booklet(8, 1, FoldDirection::LeftStart, 2).unwrap();
    assert_eq!(plan.signatures, Some(2));
    assert_eq!(plan.side_pages(1, SheetSide::Front), vec![Some(8), Some(5)]);
    assert_eq!(plan.side_pages(1, SheetSide::Back), vec![Some(6), Some(7)]);
}

#[test]
fn test_right_start_mirrors_pairs() {
    let left = plan_booklet(8, 2, FoldDirection::LeftStart, 2).unwrap();
    let right = plan_booklet(8, 2, FoldDirection::RightStart, 2).unwrap();

    for (sheet, side) in left.sides() {
        let mut mirrored = left.side_pages(sheet, side);
        mirrored.reverse();
        assert_eq!(right.side_pages(sheet, side), mirrored);
    }
}

#[test]
fn test_slot_lookup() {
    let plan = plan_booklet(8, 2, FoldDirection::LeftStart, 2).unwrap();
    let slot = plan.slot_for_page(7).unwrap();
    assert_eq!((slot.sheet_index, slot.side, slot.quadrant), (0, SheetSide::Back, 1));
    assert!(plan.slot_for_page(9).is_none());
}

#[test]
fn test_zero_sheets_rejected() {
    assert!(matches!(
        plan_booklet(4, 0, FoldDirection::LeftStart, 2),
        Err(ImposeError::Config(_))
    ));
}

#[test]
fn test_spread_plan_reading_order() {
    let plan = plan_spreads(6, FoldDirection::LeftStart, 4).unwrap();
    assert_eq!(plan.sheet_count, 1);
    assert_eq!(plan.padded_pages, 8);
    assert_eq!(
        plan.side_pages(0, SheetSide::Front),
        vec![Some(1), Some(2), Some(3), Some(4)]
    );
    assert_eq!(
        plan.side_pages(0, SheetSide::Back),
        vec![Some(5), Some(6), None, None]
    );
}
