// src/plan/filter.rs

//! Selecting parts of a plan.
//!
//! Every operation here is pure: it returns a new [`Plan`] holding the same
//! command objects in their original relative order, renumbered from 1, and
//! sharing the parent's sink and executor. The parent is never modified.
//! Indices that do not exist in the parent are ignored.

use std::sync::Arc;

use crate::plan::{Command, Plan};

impl Plan {
    /// Commands whose display index is in `indices`.
    pub fn subset(&self, name: impl Into<String>, indices: &[usize]) -> Plan {
        self.select(name, |i| indices.contains(&i))
    }

    /// Commands whose display index is *not* in `indices`.
    pub fn except_subset(&self, name: impl Into<String>, indices: &[usize]) -> Plan {
        self.select(name, |i| !indices.contains(&i))
    }

    /// Commands strictly before display index `index`.
    pub fn before(&self, name: impl Into<String>, index: usize) -> Plan {
        self.select(name, |i| i < index)
    }

    /// Commands strictly after display index `index`.
    pub fn after(&self, name: impl Into<String>, index: usize) -> Plan {
        self.select(name, |i| i > index)
    }

    fn select(&self, name: impl Into<String>, keep: impl Fn(usize) -> bool) -> Plan {
        let commands: Vec<Arc<Command>> = self
            .commands()
            .filter(|(index, _)| keep(*index))
            .map(|(_, command)| Arc::clone(command))
            .collect();
        self.derive(name, commands)
    }
}
