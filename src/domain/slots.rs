//! Fixed-capacity daily slot containers.
//!
//! A `SlotBoard` holds `blocks_per_day` positions for every date in the
//! preparation window. Slots are created empty at plan-generation time and
//! are only ever re-emptied, never deleted. The allocator fills empty
//! slots; locked slots belong to the user and are never reassigned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TopicId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Empty,
    Occupied,
    Locked,
}

/// Ties a contiguous run of same-day slots to one multi-block unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotGroup {
    pub group_id: String,
    /// 0-based position within the group.
    pub group_index: u32,
    pub group_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date: NaiveDate,
    /// 1-based position within the day.
    pub position: u32,
    pub state: SlotState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant: Option<TopicId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<SlotGroup>,
}

impl Slot {
    fn empty(date: NaiveDate, position: u32) -> Self {
        Self { date, position, state: SlotState::Empty, occupant: None, group: None }
    }

    fn clear(&mut self) {
        self.state = SlotState::Empty;
        self.occupant = None;
        self.group = None;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotBoard {
    blocks_per_day: u32,
    slots: BTreeMap<NaiveDate, Vec<Slot>>,
}

impl SlotBoard {
    /// Create an empty board with `blocks_per_day` positions for each date.
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I, blocks_per_day: u32) -> Self {
        let blocks_per_day = blocks_per_day.max(1);
        let slots = dates
            .into_iter()
            .map(|date| {
                let day = (1..=blocks_per_day).map(|pos| Slot::empty(date, pos)).collect();
                (date, day)
            })
            .collect();
        Self { blocks_per_day, slots }
    }

    pub fn blocks_per_day(&self) -> u32 {
        self.blocks_per_day
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.keys().copied()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&[Slot]> {
        self.slots.get(&date).map(|v| v.as_slice())
    }

    pub fn slot(&self, date: NaiveDate, position: u32) -> Option<&Slot> {
        self.slots.get(&date)?.iter().find(|s| s.position == position)
    }

    /// Longest run of contiguous empty positions starting at the first
    /// empty slot of the day. Locked and occupied slots break the run.
    pub fn empty_run(&self, date: NaiveDate) -> Option<(u32, u32)> {
        let day = self.slots.get(&date)?;
        let start = day.iter().position(|s| s.state == SlotState::Empty)?;
        let len = day[start..].iter().take_while(|s| s.state == SlotState::Empty).count();
        Some((day[start].position, len as u32))
    }

    /// Occupy `size` contiguous positions starting at `start_pos` with one
    /// group. Refuses to touch anything that is not empty.
    pub fn occupy_group(
        &mut self,
        date: NaiveDate,
        start_pos: u32,
        size: u32,
        topic: &TopicId,
        group_id: &str,
    ) -> bool {
        let Some(day) = self.slots.get_mut(&date) else {
            return false;
        };
        let start = match day.iter().position(|s| s.position == start_pos) {
            Some(i) => i,
            None => return false,
        };
        let end = start + size as usize;
        if end > day.len() || day[start..end].iter().any(|s| s.state != SlotState::Empty) {
            return false;
        }
        for (offset, slot) in day[start..end].iter_mut().enumerate() {
            slot.state = SlotState::Occupied;
            slot.occupant = Some(topic.clone());
            slot.group = Some(SlotGroup {
                group_id: group_id.to_string(),
                group_index: offset as u32,
                group_size: size,
            });
        }
        true
    }

    /// Re-empty every slot belonging to `group_id`. Locked slots keep their
    /// lock even if they carried the group (user edits trump clearing).
    pub fn clear_group(&mut self, group_id: &str) -> usize {
        let mut cleared = 0;
        for day in self.slots.values_mut() {
            for slot in day.iter_mut() {
                let in_group =
                    slot.group.as_ref().map(|g| g.group_id == group_id).unwrap_or(false);
                if in_group && slot.state != SlotState::Locked {
                    slot.clear();
                    cleared += 1;
                }
            }
        }
        cleared
    }

    pub fn lock(&mut self, date: NaiveDate, position: u32) -> bool {
        self.set_state(date, position, SlotState::Locked)
    }

    pub fn unlock(&mut self, date: NaiveDate, position: u32) -> bool {
        if let Some(day) = self.slots.get_mut(&date) {
            if let Some(slot) = day.iter_mut().find(|s| s.position == position) {
                if slot.state == SlotState::Locked {
                    slot.clear();
                    return true;
                }
            }
        }
        false
    }

    fn set_state(&mut self, date: NaiveDate, position: u32, state: SlotState) -> bool {
        if let Some(day) = self.slots.get_mut(&date) {
            if let Some(slot) = day.iter_mut().find(|s| s.position == position) {
                slot.state = state;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).expect("valid date")
    }

    fn board() -> SlotBoard {
        SlotBoard::new([d(5), d(6)], 3)
    }

    #[test]
    fn new_board_is_all_empty() {
        let b = board();
        assert_eq!(b.day(d(5)).expect("day").len(), 3);
        assert!(b.day(d(5)).expect("day").iter().all(|s| s.state == SlotState::Empty));
    }

    #[test]
    fn occupy_group_sets_contiguous_indices() {
        let mut b = board();
        assert!(b.occupy_group(d(5), 1, 2, &"t1".to_string(), "g1"));

        let slot = b.slot(d(5), 2).expect("slot");
        assert_eq!(slot.state, SlotState::Occupied);
        assert_eq!(slot.occupant.as_deref(), Some("t1"));
        let group = slot.group.as_ref().expect("group");
        assert_eq!((group.group_index, group.group_size), (1, 2));
    }

    #[test]
    fn occupy_group_refuses_locked_slot() {
        let mut b = board();
        b.lock(d(5), 2);
        assert!(!b.occupy_group(d(5), 1, 2, &"t1".to_string(), "g1"));
        assert_eq!(b.slot(d(5), 1).expect("slot").state, SlotState::Empty);
    }

    #[test]
    fn empty_run_stops_at_lock() {
        let mut b = board();
        b.lock(d(5), 2);
        assert_eq!(b.empty_run(d(5)), Some((1, 1)));
    }

    #[test]
    fn clear_group_re_empties_but_keeps_locks() {
        let mut b = board();
        assert!(b.occupy_group(d(5), 1, 3, &"t1".to_string(), "g1"));
        b.lock(d(5), 3);

        let cleared = b.clear_group("g1");
        assert_eq!(cleared, 2);
        assert_eq!(b.slot(d(5), 1).expect("slot").state, SlotState::Empty);
        assert_eq!(b.slot(d(5), 3).expect("slot").state, SlotState::Locked);
    }
}
