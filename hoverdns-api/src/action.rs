//! Pending DNS mutations.

use std::fmt;

use crate::error::HoverError;

/// Kind of mutation an [`Action`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Add,
    Update,
    Delete,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "Add",
            Self::Update => "Update",
            Self::Delete => "Delete",
        })
    }
}

/// One intended TXT record mutation.
///
/// Immutable once built; consumed once by the executor and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    kind: ActionKind,
    fqdn: String,
    domain: String,
    value: String,
    ttl: u32,
}

impl Action {
    pub fn new(
        kind: ActionKind,
        fqdn: impl Into<String>,
        domain: impl Into<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            kind,
            fqdn: fqdn.into(),
            domain: domain.into(),
            value: value.into(),
            ttl,
        }
    }

    pub fn add(
        fqdn: impl Into<String>,
        domain: impl Into<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self::new(ActionKind::Add, fqdn, domain, value, ttl)
    }

    pub fn update(
        fqdn: impl Into<String>,
        domain: impl Into<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self::new(ActionKind::Update, fqdn, domain, value, ttl)
    }

    pub fn delete(fqdn: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::new(ActionKind::Delete, fqdn, domain, "", 0)
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{action:{} fqdn:{} domain:{} value:{} ttl:{}}}",
            self.kind, self.fqdn, self.domain, self.value, self.ttl
        )
    }
}

/// Ordered actions executed strictly in submission order.
///
/// No reordering and no deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionBatch {
    actions: Vec<Action>,
}

impl ActionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }
}

impl From<Vec<Action>> for ActionBatch {
    fn from(actions: Vec<Action>) -> Self {
        Self { actions }
    }
}

impl From<Action> for ActionBatch {
    fn from(action: Action) -> Self {
        Self {
            actions: vec![action],
        }
    }
}

impl FromIterator<Action> for ActionBatch {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ActionBatch {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// A mutation that failed without aborting its batch.
#[derive(Debug, Clone)]
pub struct ActionFailure {
    /// Position of the action in its batch.
    pub index: usize,
    pub action: Action,
    pub error: HoverError,
}

/// Outcome of a batch that ran to completion.
///
/// Failures are listed in submission order.
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    pub success_count: usize,
    pub failed_count: usize,
    pub failures: Vec<ActionFailure>,
}

impl ExecutionReport {
    pub(crate) fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub(crate) fn record_failure(&mut self, index: usize, action: &Action, error: HoverError) {
        self.failed_count += 1;
        self.failures.push(ActionFailure {
            index,
            action: action.clone(),
            error,
        });
    }

    /// Whether every action was applied.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_field() {
        let action = Action::add("test.example.com", "example.com", "ABCDE", 300);
        assert_eq!(
            action.to_string(),
            "{action:Add fqdn:test.example.com domain:example.com value:ABCDE ttl:300}"
        );
    }

    #[test]
    fn batch_preserves_order_and_duplicates() {
        let batch: ActionBatch = vec![
            Action::add("a.example.com", "example.com", "1", 300),
            Action::delete("a.example.com", "example.com"),
            Action::add("a.example.com", "example.com", "1", 300),
        ]
        .into();

        let kinds: Vec<ActionKind> = batch.iter().map(Action::kind).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::Add, ActionKind::Delete, ActionKind::Add]
        );
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn report_counts() {
        let action = Action::update("a.example.com", "example.com", "v", 300);
        let mut report = ExecutionReport::default();
        report.record_success();
        report.record_failure(
            1,
            &action,
            HoverError::MutationFailed {
                name: "a.example.com".into(),
                cause: "HTTP 500".into(),
            },
        );

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.failures[0].index, 1);
        assert!(!report.is_clean());
    }
}
