//! Manifest reconciliation: elision, merge and the no-op plan oracle.
//!
//! The free functions in [`elide`] and [`merge`] are table-driven and know
//! nothing about Conductor. [`Reconciler`] binds them to the default tables of
//! one definition class and adds the class-specific second pass over a
//! workflow's `tasks`.

pub mod elide;
pub mod equality;
pub mod merge;
pub mod plan;

pub use plan::PlanAction;

use crate::defaults::DefaultTable;
use crate::manifest::{strip_server_owned, Manifest};
use condor_core_types::ResourceKind;

/// Reconciliation passes bound to one definition class.
#[derive(Debug, Clone)]
pub struct Reconciler {
    kind: ResourceKind,
    document: DefaultTable,
    tasks: Option<DefaultTable>,
}

impl Reconciler {
    /// Build a reconciler with explicit tables. `tasks` enables the
    /// task-array passes.
    pub fn new(kind: ResourceKind, document: DefaultTable, tasks: Option<DefaultTable>) -> Self {
        Self {
            kind,
            document,
            tasks,
        }
    }

    /// Reconciler with the built-in Conductor defaults for `kind`.
    pub fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::TaskDef => Self::new(kind, DefaultTable::task_def(), None),
            ResourceKind::WorkflowDef => Self::new(
                kind,
                DefaultTable::workflow_def(),
                Some(DefaultTable::workflow_task()),
            ),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn document_defaults(&self) -> &DefaultTable {
        &self.document
    }

    pub fn task_defaults(&self) -> Option<&DefaultTable> {
        self.tasks.as_ref()
    }

    /// The class elision pass: drop server-owned fields, elide the document,
    /// then elide each task element when the class has tasks.
    pub fn normalize(&self, manifest: &mut Manifest) {
        strip_server_owned(manifest);
        elide::elide(manifest, &self.document);
        if let Some(task_defaults) = &self.tasks {
            elide::elide_tasks(manifest, task_defaults);
        }
    }

    /// Merge server values into local state, document level then task level.
    pub fn merge_into(&self, from: &Manifest, into: &mut Manifest) {
        merge::merge(from, into);
        if self.tasks.is_some() {
            merge::merge_tasks(from, into);
        }
    }

    /// Normalize a server manifest and fold it into the last-known manifest.
    pub fn cleanup_and_merge(&self, mut current: Manifest, state: &mut Manifest) {
        self.normalize(&mut current);
        self.merge_into(&current, state);
    }

    /// `true` when `proposed` and `current` differ only in ways the server
    /// would erase (defaults, empties, server-owned fields).
    pub fn is_no_op_change(&self, proposed: &Manifest, current: &Manifest) -> bool {
        let mut proposed = proposed.clone();
        let mut current = current.clone();
        self.normalize(&mut proposed);
        self.normalize(&mut current);
        equality::manifests_equal(&proposed, &current)
    }
}
