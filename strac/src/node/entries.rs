// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use super::Node;
use crate::error::Result;

type Stage<'a> = Box<dyn FnOnce() -> Result<Vec<Node<'a>>> + 'a>;

/// Children of a directory node.
///
/// Each stage is one query, run only once the previous stage's nodes have
/// been handed out. The iterator is single pass. After yielding an error it
/// yields nothing more.
pub struct Entries<'a> {
    stages: VecDeque<Stage<'a>>,
    ready: VecDeque<Node<'a>>,
}

impl<'a> Entries<'a> {
    pub(crate) fn empty() -> Self {
        Self {
            stages: VecDeque::new(),
            ready: VecDeque::new(),
        }
    }

    /// Queue a query whose nodes follow those of earlier stages.
    pub(crate) fn then(mut self, stage: impl FnOnce() -> Result<Vec<Node<'a>>> + 'a) -> Self {
        self.stages.push_back(Box::new(stage));
        self
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<Node<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.ready.pop_front() {
                return Some(Ok(node));
            }
            let stage = self.stages.pop_front()?;
            match stage() {
                Ok(nodes) => self.ready.extend(nodes),
                Err(e) => {
                    self.stages.clear();
                    return Some(Err(e));
                }
            }
        }
    }
}

impl FusedIterator for Entries<'_> {}

impl fmt::Debug for Entries<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entries")
            .field("pending_stages", &self.stages.len())
            .field("ready", &self.ready.len())
            .finish()
    }
}
