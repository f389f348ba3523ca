use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::coord::Square;
use crate::move_index::IndexedMove;
use crate::moves::MoveId;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ListenerId(u64);

#[derive(Default, Debug)]
struct ListenerTable {
    next_id: u64,
    active: BTreeMap<ListenerId, Square>,
}

// Book-keeping for "click anywhere to dismiss" listeners. The UI layer installs a real
// listener for every entry in `active` and removes it as soon as the entry is gone.
#[derive(Clone, Default, Debug)]
pub struct ListenerRegistry {
    table: Rc<RefCell<ListenerTable>>,
}

impl ListenerRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn register(&self, anchor: Square) -> ListenerGuard {
        let mut table = self.table.borrow_mut();
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.active.insert(id, anchor);
        ListenerGuard { id, table: Rc::clone(&self.table) }
    }

    pub fn num_active(&self) -> usize { self.table.borrow().active.len() }

    pub fn active_anchors(&self) -> Vec<Square> { self.table.borrow().active.values().copied().collect() }
}

// Unregisters the listener when dropped, so every way of getting rid of a prompt also gets
// rid of its listener.
pub struct ListenerGuard {
    id: ListenerId,
    table: Rc<RefCell<ListenerTable>>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId { self.id }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) { self.table.borrow_mut().active.remove(&self.id); }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerGuard").field(&self.id).finish()
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PromptError {
    NoPrompt,
    NoSuchOption { option: usize, num_options: usize },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PromptOption {
    pub label: String,
    pub id: MoveId,
}

// Menu shown on a destination square when several moves end there. Options are not sorted
// and not merged: two options with the same label are still different moves.
#[derive(Debug)]
pub struct DisambiguationPrompt {
    square: Square,
    options: Vec<PromptOption>,
    _dismiss_listener: ListenerGuard,
}

impl DisambiguationPrompt {
    pub fn open(square: Square, candidates: Vec<IndexedMove>, listeners: &ListenerRegistry) -> Self {
        let options = candidates
            .into_iter()
            .map(|c| PromptOption { label: c.effect_label, id: c.id })
            .collect();
        DisambiguationPrompt {
            square,
            options,
            _dismiss_listener: listeners.register(square),
        }
    }

    pub fn square(&self) -> Square { self.square }
    pub fn options(&self) -> &[PromptOption] { &self.options }
    pub fn labels(&self) -> impl Iterator<Item = &str> { self.options.iter().map(|o| o.label.as_str()) }

    // Consumes the prompt: a successful choice is always followed by a commit.
    pub fn choose(self, option: usize) -> Result<MoveId, (Self, PromptError)> {
        match self.options.get(option) {
            Some(o) => Ok(o.id),
            None => {
                let err = PromptError::NoSuchOption { option, num_options: self.options.len() };
                Err((self, err))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Displacement;

    fn candidate(id: usize, label: &str) -> IndexedMove {
        IndexedMove {
            id: MoveId(id),
            displacement: Displacement::new(0, 1),
            effect_label: label.to_owned(),
        }
    }

    #[test]
    fn listener_released_on_drop() {
        let listeners = ListenerRegistry::new();
        let sq = Square::new(6, 2);
        let prompt = DisambiguationPrompt::open(sq, vec![candidate(1, "Q"), candidate(2, "N")], &listeners);
        assert_eq!(listeners.active_anchors(), vec![sq]);
        drop(prompt);
        assert_eq!(listeners.num_active(), 0);
    }

    #[test]
    fn choose_out_of_range_keeps_prompt() {
        let listeners = ListenerRegistry::new();
        let prompt = DisambiguationPrompt::open(
            Square::new(0, 7),
            vec![candidate(4, "Q"), candidate(9, "Q")],
            &listeners,
        );
        let (prompt, err) = prompt.choose(2).unwrap_err();
        assert_eq!(err, PromptError::NoSuchOption { option: 2, num_options: 2 });
        assert_eq!(listeners.num_active(), 1);
        assert_eq!(prompt.choose(1).unwrap(), MoveId(9));
        assert_eq!(listeners.num_active(), 0);
    }
}
