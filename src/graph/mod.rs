//! Host build graph seam.
//!
//! The real incremental-rebuild engine lives outside this crate. Everything
//! here talks to it through [`BuildGraph`]; [`InMemoryGraph`] records
//! registrations for emission and for tests.

pub mod emit;

use crate::error::SitegenError;
use crate::types::{ActionHandle, GenerationAction};
use std::collections::HashMap;
use tracing::info;

/// Registration port into a host build engine.
pub trait BuildGraph {
    /// Register one action. Identifiers are unique per configuration pass.
    fn register(&mut self, action: GenerationAction) -> Result<ActionHandle, SitegenError>;

    /// Whether an action with this identifier is already registered.
    fn contains(&self, identifier: &str) -> bool;
}

/// Records registrations in order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGraph {
    actions: Vec<GenerationAction>,
    index: HashMap<String, usize>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered actions in registration order.
    pub fn actions(&self) -> &[GenerationAction] {
        &self.actions
    }

    pub fn get(&self, identifier: &str) -> Option<&GenerationAction> {
        self.index.get(identifier).map(|&i| &self.actions[i])
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn source_of(action: &GenerationAction) -> String {
    action
        .inputs
        .first()
        .map(|dep| dep.display())
        .unwrap_or_else(|| action.identifier.clone())
}

impl BuildGraph for InMemoryGraph {
    fn register(&mut self, action: GenerationAction) -> Result<ActionHandle, SitegenError> {
        if let Some(&existing) = self.index.get(&action.identifier) {
            return Err(SitegenError::DuplicateActionIdentifier {
                identifier: action.identifier.clone(),
                first: source_of(&self.actions[existing]),
                second: source_of(&action),
            });
        }

        let index = self.actions.len();
        info!(
            identifier = %action.identifier,
            inputs = action.inputs.len(),
            outputs = action.outputs.len(),
            "Registered action"
        );
        self.index.insert(action.identifier.clone(), index);
        let identifier = action.identifier.clone();
        self.actions.push(action);

        Ok(ActionHandle { identifier, index })
    }

    fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }
}
