//! Bin-fill of allocation units onto dated slots.
//!
//! Units are placed in priority order onto the earliest day that still has
//! a contiguous empty run long enough for the unit's block count. Locked
//! and occupied slots are skipped, never reused; a day whose remaining run
//! is too short is passed over for that unit.

use crate::domain::SlotBoard;

use super::allocator::AllocationUnit;

/// Place units onto the board, stamping each placed unit's `date`.
///
/// Returns how many units found a home. Units that fit nowhere keep
/// `date: None` and their slots stay empty.
pub fn place_units(board: &mut SlotBoard, units: &mut [AllocationUnit]) -> usize {
    let dates: Vec<_> = board.dates().collect();
    let mut placed = 0;

    for (seq, unit) in units.iter_mut().enumerate() {
        let needed = unit.day.blocks.max(1);
        let group_id = format!("{}-{}", unit.topic_id, seq);

        for &date in &dates {
            let Some((start_pos, run_len)) = board.empty_run(date) else {
                continue;
            };
            if run_len < needed {
                continue;
            }
            if board.occupy_group(date, start_pos, needed, &unit.topic_id, &group_id) {
                unit.day.date = Some(date);
                placed += 1;
                break;
            }
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColorPalette, PlanSettings, SlotState, Topic};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).expect("date")
    }

    fn units_for(topics: Vec<Topic>, start: u32, end: u32) -> (PlanSettings, Vec<AllocationUnit>) {
        let settings = PlanSettings {
            start_date: d(start),
            end_date: d(end),
            buffer_days: 0,
            vacation_days: 0,
            blocks_per_day: 3,
            week_structure: Default::default(),
            topics,
        };
        let units = crate::plan::allocate(&settings, &ColorPalette::default());
        (settings, units)
    }

    #[test]
    fn units_land_on_consecutive_active_days() {
        // Mon Jan 5 .. Sun Jan 11: six active days.
        let (settings, mut units) = units_for(vec![Topic::new("zr", "ZR", 0)], 5, 12);
        let mut board = SlotBoard::new(crate::plan::active_days(&settings), 3);

        let placed = place_units(&mut board, &mut units);
        assert_eq!(placed, 6);
        assert_eq!(units[0].day.date, Some(d(5)));
        assert_eq!(units[5].day.date, Some(d(10)));
        // Sunday carries no slots at all.
        assert!(board.day(d(11)).is_none());
    }

    #[test]
    fn locked_slot_pushes_unit_to_next_day() {
        let (settings, mut units) = units_for(vec![Topic::new("zr", "ZR", 0)], 5, 12);
        let mut board = SlotBoard::new(crate::plan::active_days(&settings), 3);
        board.lock(d(5), 2);

        place_units(&mut board, &mut units);
        // Day one's longest empty run is a single slot; a 3-block unit skips it.
        assert_eq!(units[0].day.date, Some(d(6)));
        assert_eq!(board.slot(d(5), 2).expect("slot").state, SlotState::Locked);
        assert_eq!(board.slot(d(5), 1).expect("slot").state, SlotState::Empty);
    }

    #[test]
    fn overflow_units_stay_unplaced() {
        // One active day, three units from three topics on a tiny window.
        let topics = vec![
            Topic::new("a", "A", 0),
            Topic::new("b", "B", 1),
            Topic::new("c", "C", 2),
        ];
        let (_settings, mut units) = units_for(topics, 5, 8);
        // Board narrowed to a single day.
        let mut board = SlotBoard::new([d(5)], 3);

        let placed = place_units(&mut board, &mut units);
        assert_eq!(placed, 1);
        assert!(units[1].day.date.is_none());
        assert!(units[2].day.date.is_none());
    }

    #[test]
    fn placed_group_is_contiguous_with_one_group_id() {
        let (settings, mut units) = units_for(vec![Topic::new("zr", "ZR", 0)], 5, 12);
        let mut board = SlotBoard::new(crate::plan::active_days(&settings), 3);
        place_units(&mut board, &mut units);

        let day = board.day(d(5)).expect("day");
        let gid = day[0].group.as_ref().expect("group").group_id.clone();
        for (i, slot) in day.iter().enumerate() {
            let group = slot.group.as_ref().expect("group");
            assert_eq!(group.group_id, gid);
            assert_eq!(group.group_index as usize, i);
            assert_eq!(group.group_size, 3);
        }
    }
}
