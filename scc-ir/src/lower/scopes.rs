//! Lexical scoping

use crate::ir::Operand;
use std::collections::HashMap;

/// Name-to-register bindings as a stack of layers.
///
/// The bottom layer holds the globals. Every lexical block pushes a layer
/// on entry and pops it on exit, so a lookup walks innermost-first and
/// shadowing resolves exactly: a popped layer takes all of its bindings
/// with it, uncovering whatever they shadowed.
#[derive(Debug)]
pub(crate) struct Scopes {
    layers: Vec<HashMap<String, Operand>>,
}

impl Scopes {
    pub(crate) fn with_globals(globals: HashMap<String, Operand>) -> Self {
        Scopes {
            layers: vec![globals],
        }
    }

    pub(crate) fn push_layer(&mut self) {
        self.layers.push(HashMap::new());
    }

    /// Discards the innermost layer. The globals layer is never popped.
    pub(crate) fn pop_layer(&mut self) {
        if self.layers.len() > 1 {
            self.layers.pop();
        }
    }

    /// Binds in the innermost layer, shadowing any outer binding of the
    /// same name.
    pub(crate) fn bind(&mut self, name: &str, register: Operand) {
        if let Some(layer) = self.layers.last_mut() {
            layer.insert(name.to_string(), register);
        }
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&Operand> {
        self.layers.iter().rev().find_map(|layer| layer.get(name))
    }
}
