//! Rule checklist engine.
//!
//! Evaluates an ordered list of [`ChecklistItem`] definitions against a subject
//! and produces a [`ChecklistReport`]. Items marked as prerequisites run first,
//! in order; the first failing prerequisite stops evaluation and the report
//! holds only the prerequisites evaluated so far. Once every prerequisite
//! holds, all remaining items are evaluated regardless of individual failures,
//! and callers slice the single report by group tag.
//!
//! Definitions are never mutated: evaluation produces separate result records,
//! so one checklist can be shared across threads and runs.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

type Predicate<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;
type Detail<S> = Arc<dyn Fn(&S) -> Option<String> + Send + Sync>;

/// One named, predicate-backed requirement.
pub struct ChecklistItem<S, G> {
    pub id: String,
    pub user_text: String,
    pub groups: Vec<G>,
    pub prerequisite: bool,
    predicate: Predicate<S>,
    detail: Option<Detail<S>>,
}

impl<S, G> ChecklistItem<S, G> {
    /// A regular check, evaluated once all prerequisites hold.
    pub fn check<F>(
        id: impl Into<String>,
        user_text: impl Into<String>,
        groups: Vec<G>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            user_text: user_text.into(),
            groups,
            prerequisite: false,
            predicate: Arc::new(predicate),
            detail: None,
        }
    }

    /// A structural requirement; later items may assume it holds.
    pub fn prerequisite<F>(
        id: impl Into<String>,
        user_text: impl Into<String>,
        groups: Vec<G>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self {
            prerequisite: true,
            ..Self::check(id, user_text, groups, predicate)
        }
    }

    /// Explain a failure, e.g. why a present field was rejected. Only called
    /// when the predicate fails.
    pub fn with_detail<F>(mut self, detail: F) -> Self
    where
        F: Fn(&S) -> Option<String> + Send + Sync + 'static,
    {
        self.detail = Some(Arc::new(detail));
        self
    }

    pub fn passes(&self, subject: &S) -> bool {
        (self.predicate)(subject)
    }

    fn failure_detail(&self, subject: &S) -> Option<String> {
        self.detail.as_ref().and_then(|detail| detail(subject))
    }
}

impl<S, G: Clone> Clone for ChecklistItem<S, G> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            user_text: self.user_text.clone(),
            groups: self.groups.clone(),
            prerequisite: self.prerequisite,
            predicate: Arc::clone(&self.predicate),
            detail: self.detail.clone(),
        }
    }
}

impl<S, G: fmt::Debug> fmt::Debug for ChecklistItem<S, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecklistItem")
            .field("id", &self.id)
            .field("user_text", &self.user_text)
            .field("groups", &self.groups)
            .field("prerequisite", &self.prerequisite)
            .field("has_detail", &self.detail.is_some())
            .finish_non_exhaustive()
    }
}

/// An ordered list of checklist items.
pub struct RuleChecklist<S, G> {
    items: Vec<ChecklistItem<S, G>>,
}

impl<S, G: Clone> Clone for RuleChecklist<S, G> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<S, G: fmt::Debug> fmt::Debug for RuleChecklist<S, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChecklist")
            .field("items", &self.items)
            .finish()
    }
}

impl<S, G> Default for RuleChecklist<S, G> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<S, G: Clone + PartialEq> RuleChecklist<S, G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item (builder pattern).
    pub fn with_item(mut self, item: ChecklistItem<S, G>) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[ChecklistItem<S, G>] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ChecklistItem<S, G>> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Evaluate every item against `subject`.
    pub fn evaluate(&self, subject: &S) -> ChecklistReport<G> {
        let mut items = Vec::with_capacity(self.items.len());

        for item in self.items.iter().filter(|i| i.prerequisite) {
            let result = ChecklistResult::evaluate(item, subject);
            let passing = result.passing;
            items.push(result);
            if !passing {
                tracing::debug!(item = %item.id, "checklist prerequisite failed");
                return ChecklistReport {
                    items,
                    prerequisites_met: false,
                };
            }
        }

        for item in self.items.iter().filter(|i| !i.prerequisite) {
            items.push(ChecklistResult::evaluate(item, subject));
        }

        ChecklistReport {
            items,
            prerequisites_met: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One evaluated item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistResult<G> {
    pub id: String,
    pub user_text: String,
    pub groups: Vec<G>,
    pub prerequisite: bool,
    pub passing: bool,
    /// Why a failing item failed, when the item can tell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl<G: Clone> ChecklistResult<G> {
    fn evaluate<S>(item: &ChecklistItem<S, G>, subject: &S) -> Self {
        let passing = item.passes(subject);
        Self {
            id: item.id.clone(),
            user_text: item.user_text.clone(),
            groups: item.groups.clone(),
            prerequisite: item.prerequisite,
            passing,
            detail: if passing {
                None
            } else {
                item.failure_detail(subject)
            },
        }
    }
}

impl<G> ChecklistResult<G> {
    /// The user text, followed by the detail in parentheses when there is one.
    pub fn failure_text(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{} ({})", self.user_text, detail),
            None => self.user_text.clone(),
        }
    }
}

/// Outcome of one checklist evaluation.
///
/// Items that were never evaluated (because a prerequisite failed) are not
/// present at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistReport<G> {
    pub items: Vec<ChecklistResult<G>>,
    pub prerequisites_met: bool,
}

impl<G: PartialEq> ChecklistReport<G> {
    pub fn all_passing(&self) -> bool {
        self.prerequisites_met && self.items.iter().all(|i| i.passing)
    }

    pub fn get(&self, id: &str) -> Option<&ChecklistResult<G>> {
        self.items.iter().find(|i| i.id == id)
    }

    /// `Some(passing)` if the item was evaluated.
    pub fn passing(&self, id: &str) -> Option<bool> {
        self.get(id).map(|i| i.passing)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ChecklistResult<G>> {
        self.items.iter().filter(|i| !i.passing)
    }

    /// The first prerequisite that failed, if any.
    pub fn failed_prerequisite(&self) -> Option<&ChecklistResult<G>> {
        self.items.iter().find(|i| i.prerequisite && !i.passing)
    }

    /// Evaluated items tagged with any of `groups`, in checklist order.
    pub fn in_groups<'a>(
        &'a self,
        groups: &'a [G],
    ) -> impl Iterator<Item = &'a ChecklistResult<G>> + 'a {
        self.items
            .iter()
            .filter(move |i| i.groups.iter().any(|g| groups.contains(g)))
    }

    /// Failure texts of failing items tagged with any of `groups`.
    pub fn failure_texts(&self, groups: &[G]) -> Vec<String> {
        self.in_groups(groups)
            .filter(|i| !i.passing)
            .map(ChecklistResult::failure_text)
            .collect()
    }
}
