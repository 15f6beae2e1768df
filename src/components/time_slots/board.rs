use super::models::{Slot, SlotPlan};
use crate::error::{Error, PlannerResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ready-made assignee payload: who holds a slot and how to show them
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Assignee {
    pub id: String,
    pub label: String,
}

impl Assignee {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Caller-side bookkeeping of who holds which slot of a plan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotBoard<P> {
    slots: Vec<Slot<P>>,
}

impl<P> SlotBoard<P> {
    /// Create a board from already computed slots
    pub fn new(slots: Vec<Slot<P>>) -> Self {
        Self { slots }
    }

    /// Create a board over a plan's slots
    pub fn from_plan(plan: SlotPlan<P>) -> Self {
        Self::new(plan.slots)
    }

    pub fn slots(&self) -> &[Slot<P>] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Slot<P>> {
        self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up a slot by its 1-based number
    pub fn slot(&self, slot_number: u32) -> Option<&Slot<P>> {
        let index = (slot_number as usize).checked_sub(1)?;
        self.slots.get(index)
    }

    /// Number of slots somebody holds
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_assigned()).count()
    }

    /// Slots still free, in order
    pub fn open_slots(&self) -> impl Iterator<Item = &Slot<P>> {
        self.slots.iter().filter(|slot| !slot.is_assigned())
    }

    /// Whether every slot is held
    pub fn is_full(&self) -> bool {
        self.filled_count() >= self.slots.len()
    }

    /// Give a free slot to `assignee`.
    ///
    /// A full board is reported before the slot number is looked at.
    pub fn assign(&mut self, slot_number: u32, assignee: P) -> PlannerResult<&Slot<P>> {
        if self.is_full() {
            return Err(Error::BoardFull {
                count: self.slots.len(),
            });
        }

        let slot = self.slot_mut(slot_number)?;
        if slot.is_assigned() {
            return Err(Error::SlotTaken { slot: slot_number });
        }

        slot.assignee = Some(assignee);
        slot.is_filled = true;
        debug!(slot = slot_number, "Slot assigned");

        Ok(&*slot)
    }

    /// Free a slot, returning whoever held it
    pub fn release(&mut self, slot_number: u32) -> PlannerResult<Option<P>> {
        let slot = self.slot_mut(slot_number)?;
        slot.is_filled = false;
        let previous = slot.assignee.take();
        debug!(slot = slot_number, "Slot released");

        Ok(previous)
    }

    fn slot_mut(&mut self, slot_number: u32) -> PlannerResult<&mut Slot<P>> {
        let count = self.slots.len();
        (slot_number as usize)
            .checked_sub(1)
            .and_then(|index| self.slots.get_mut(index))
            .ok_or(Error::SlotOutOfRange {
                slot: slot_number,
                count,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::time_slots::{validate_time_slots_for, SlotRequest};

    fn board() -> SlotBoard<Assignee> {
        let plan = validate_time_slots_for::<Assignee>(&SlotRequest::new("09:00", "11:00", 30, 10))
            .into_result()
            .unwrap();
        SlotBoard::from_plan(plan)
    }

    #[test]
    fn test_assign_and_release() {
        let mut board = board();
        assert_eq!(board.len(), 3);
        assert_eq!(board.filled_count(), 0);

        let slot = board.assign(2, Assignee::new("e-17", "Aino")).unwrap();
        assert!(slot.is_filled);
        assert_eq!(slot.start_time.to_string(), "09:40");
        assert_eq!(board.filled_count(), 1);
        assert_eq!(
            board.open_slots().map(|s| s.slot).collect::<Vec<_>>(),
            vec![1, 3]
        );

        let previous = board.release(2).unwrap();
        assert_eq!(previous, Some(Assignee::new("e-17", "Aino")));
        assert_eq!(board.filled_count(), 0);
        assert!(!board.slot(2).unwrap().is_filled);
    }

    #[test]
    fn test_assign_taken_slot() {
        let mut board = board();
        board.assign(1, Assignee::new("a", "A")).unwrap();

        let err = board.assign(1, Assignee::new("b", "B")).unwrap_err();
        assert!(matches!(err, Error::SlotTaken { slot: 1 }));
        assert_eq!(board.slot(1).unwrap().assignee.as_ref().unwrap().id, "a");
    }

    #[test]
    fn test_slot_number_range() {
        let mut board = board();
        assert!(board.slot(0).is_none());
        assert!(board.slot(4).is_none());

        let err = board.assign(0, Assignee::new("a", "A")).unwrap_err();
        assert!(matches!(err, Error::SlotOutOfRange { slot: 0, count: 3 }));

        let err = board.release(4).unwrap_err();
        assert!(matches!(err, Error::SlotOutOfRange { slot: 4, count: 3 }));
    }

    #[test]
    fn test_full_board_rejects_before_range_check() {
        let mut board = board();
        for slot in 1..=3 {
            board.assign(slot, Assignee::new(format!("e-{}", slot), "Staff")).unwrap();
        }
        assert!(board.is_full());

        let err = board.assign(2, Assignee::new("late", "Late")).unwrap_err();
        assert!(matches!(err, Error::BoardFull { count: 3 }));
        let err = board.assign(9, Assignee::new("late", "Late")).unwrap_err();
        assert!(matches!(err, Error::BoardFull { count: 3 }));

        board.release(3).unwrap();
        assert!(!board.is_full());
        assert!(board.assign(3, Assignee::new("late", "Late")).is_ok());
    }

    #[test]
    fn test_empty_board_is_full() {
        let mut board: SlotBoard<Assignee> = SlotBoard::new(Vec::new());
        let err = board.assign(1, Assignee::new("a", "A")).unwrap_err();
        assert!(matches!(err, Error::BoardFull { count: 0 }));
    }

    #[test]
    fn test_filled_flag_without_payload_counts_as_taken() {
        let mut slots = board().into_slots();
        slots[0].is_filled = true;
        let mut board = SlotBoard::new(slots);

        assert_eq!(board.filled_count(), 1);
        assert!(board.assign(1, Assignee::new("a", "A")).is_err());
        assert_eq!(board.release(1).unwrap(), None);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_board_deserializes_stored_slots() {
        let json = r#"[
            {"slot":1,"start_time":"10:00","end_time":"10:45","duration":45,"is_filled":true,
             "assignee":{"id":"s-3","label":"Staff 3"}},
            {"slot":2,"start_time":"10:55","end_time":"11:40","duration":45}
        ]"#;
        let board: SlotBoard<Assignee> = serde_json::from_str(json).unwrap();
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.open_slots().count(), 1);
    }
}
