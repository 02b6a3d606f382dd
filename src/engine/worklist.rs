//! Free-resident worklist.
//!
//! Deferred acceptance reaches the same matching whatever order free
//! residents are drawn in, so the order is a solver setting rather than part
//! of the algorithm. All three orders start from the residents in id order.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::types::ResidentId;

/// Order in which free residents are drawn from the worklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProposalOrder {
    /// Queue: oldest free resident first
    #[default]
    Fifo,
    /// Stack: most recently freed resident first
    Lifo,
    /// Uniformly random free resident, from a seeded stream
    Shuffled(u64),
}

/// Worklist of free residents, drawn according to a [`ProposalOrder`].
#[derive(Debug, Clone)]
pub struct Worklist {
    order: ProposalOrder,
    items: VecDeque<ResidentId>,
    rng: Option<ChaCha8Rng>,
}

impl Worklist {
    /// Worklist holding residents `0..num_residents`
    pub fn new(order: ProposalOrder, num_residents: usize) -> Self {
        let rng = match order {
            ProposalOrder::Shuffled(seed) => Some(ChaCha8Rng::seed_from_u64(seed)),
            ProposalOrder::Fifo | ProposalOrder::Lifo => None,
        };
        Self {
            order,
            items: (0..num_residents).collect(),
            rng,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return a resident to the worklist
    #[inline]
    pub fn push(&mut self, r: ResidentId) {
        self.items.push_back(r);
    }

    /// Draw the next free resident
    pub fn pop(&mut self) -> Option<ResidentId> {
        match (&self.order, self.rng.as_mut()) {
            (ProposalOrder::Shuffled(_), Some(rng)) => {
                if self.items.is_empty() {
                    return None;
                }
                let idx = rng.gen_range(0..self.items.len());
                self.items.swap_remove_back(idx)
            }
            (ProposalOrder::Lifo, _) => self.items.pop_back(),
            _ => self.items.pop_front(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(worklist: &mut Worklist) -> Vec<ResidentId> {
        std::iter::from_fn(|| worklist.pop()).collect()
    }

    #[test]
    fn test_fifo_order() {
        let mut worklist = Worklist::new(ProposalOrder::Fifo, 3);
        assert_eq!(worklist.pop(), Some(0));
        worklist.push(0);
        assert_eq!(drain(&mut worklist), vec![1, 2, 0]);
    }

    #[test]
    fn test_lifo_order() {
        let mut worklist = Worklist::new(ProposalOrder::Lifo, 3);
        assert_eq!(worklist.pop(), Some(2));
        worklist.push(7);
        assert_eq!(drain(&mut worklist), vec![7, 1, 0]);
    }

    #[test]
    fn test_shuffled_draws_every_item_once() {
        let mut worklist = Worklist::new(ProposalOrder::Shuffled(11), 50);
        assert_eq!(worklist.len(), 50);

        let mut drawn = drain(&mut worklist);
        assert!(worklist.is_empty());
        assert_ne!(drawn, (0..50).collect::<Vec<_>>());

        drawn.sort_unstable();
        assert_eq!(drawn, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_is_reproducible() {
        let a = drain(&mut Worklist::new(ProposalOrder::Shuffled(5), 20));
        let b = drain(&mut Worklist::new(ProposalOrder::Shuffled(5), 20));
        assert_eq!(a, b);
    }
}
