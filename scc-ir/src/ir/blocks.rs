//! Basic blocks

use super::instructions::Instruction;
use scc_common::LabelId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A straight-line run of instructions with at most one terminator, at
/// the end.
///
/// A block is closed once a terminator has been appended; later appends
/// are dropped. That rule is what lets the lowering engine walk
/// unreachable statement tails without emitting anything for them.
/// Predecessor edges are registered by the engine at each join, never
/// derived here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: LabelId,
    /// Debug name ("entry", "while.cond"). Carries no semantics.
    pub name: Option<String>,
    pub instructions: Vec<Instruction>,
    pub predecessors: Vec<LabelId>,
}

impl BasicBlock {
    pub fn new(id: LabelId) -> Self {
        BasicBlock {
            id,
            name: None,
            instructions: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    pub fn with_name(id: LabelId, name: &str) -> Self {
        BasicBlock {
            id,
            name: Some(name.to_string()),
            instructions: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    /// True once a terminator has been appended.
    pub fn is_closed(&self) -> bool {
        self.instructions.last().is_some_and(|i| i.is_terminator())
    }

    /// Appends unless the block is already closed. Reports whether the
    /// instruction was kept.
    pub fn add_instruction(&mut self, instruction: Instruction) -> bool {
        if self.is_closed() {
            return false;
        }
        self.instructions.push(instruction);
        true
    }

    /// Records a predecessor edge, keeping the list duplicate-free in
    /// first-seen order.
    pub fn add_predecessor(&mut self, pred: LabelId) {
        if !self.predecessors.contains(&pred) {
            self.predecessors.push(pred);
        }
    }

    /// Labels the closing terminator transfers to. Empty while the block
    /// is still open.
    pub fn successors(&self) -> Vec<LabelId> {
        self.instructions
            .last()
            .map_or_else(Vec::new, Instruction::branch_targets)
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.id)?;
        if let Some(name) = &self.name {
            write!(f, " ({})", name)?;
        }
        writeln!(f, ":")?;
        if !self.predecessors.is_empty() {
            let preds = self
                .predecessors
                .iter()
                .map(|p| format!("L{}", p))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "  ; preds: {}", preds)?;
        }
        for instruction in &self.instructions {
            writeln!(f, "  {}", instruction)?;
        }
        Ok(())
    }
}
