// src/repository.rs

use crate::models::{Problem, ProblemList};
use log::debug;
use std::collections::HashMap;

/// In-memory problem store. Keeps file order for saving and an index by problem number.
#[derive(Debug, Clone, Default)]
pub struct ProblemStore {
    problems: Vec<Problem>,
    index: HashMap<u32, usize>,
}

impl ProblemStore {
    /// Builds a store from rows in file order.
    /// Returns the offending number if two rows share one.
    pub fn from_problems(problems: Vec<Problem>) -> Result<Self, u32> {
        let mut index = HashMap::with_capacity(problems.len());
        for (pos, p) in problems.iter().enumerate() {
            if index.insert(p.number, pos).is_some() {
                return Err(p.number);
            }
        }
        Ok(ProblemStore { problems, index })
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }

    pub fn get(&self, number: u32) -> Option<&Problem> {
        self.index.get(&number).map(|&pos| &self.problems[pos])
    }

    pub fn get_mut(&mut self, number: u32) -> Option<&mut Problem> {
        match self.index.get(&number) {
            Some(&pos) => self.problems.get_mut(pos),
            None => None,
        }
    }

    /// Clears status and date on every record.
    pub fn reset_all(&mut self) {
        debug!("[Store] Resetting {} problems", self.problems.len());
        for p in &mut self.problems {
            p.clear_completion();
        }
    }
}

// --- Queries for "Get Next Problem" ---

/// Problems of one list that have never been completed (or were reset).
pub fn find_incomplete(store: &ProblemStore, list: ProblemList) -> Vec<&Problem> {
    store
        .iter()
        .filter(|p| p.list == list && !p.is_complete())
        .collect()
}

/// Problems of one list sitting at a given repetition tier.
pub fn find_at_tier(store: &ProblemStore, list: ProblemList, tier: u8) -> Vec<&Problem> {
    store
        .iter()
        .filter(|p| p.list == list && p.completion_status == tier)
        .collect()
}

/// The candidate completed longest ago. A missing date sorts first; ties keep store order.
pub fn find_most_overdue<'a>(candidates: &[&'a Problem]) -> Option<&'a Problem> {
    candidates.iter().copied().min_by_key(|p| p.date_completed)
}
