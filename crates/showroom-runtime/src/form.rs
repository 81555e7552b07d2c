#![forbid(unsafe_code)]

//! Contact form with simulated submission.
//!
//! A [`ContactForm`] collects text fields described by a [`FormSchema`],
//! validates required fields on submit, waits a fixed simulated latency on a
//! host timer, and then completes through a [`SubmissionHook`]. The default
//! hook always succeeds; tests inject failures.
//!
//! ```text
//!   EDITING ──submit (valid)──▶ SUBMITTING ──latency, Ok──▶ SUBMITTED
//!      ▲                            │                          │
//!      └──────── latency, Err ──────┘◀─── edit / reset ────────┘
//! ```
//!
//! # Invariants
//!
//! 1. A submit with an empty required field never leaves EDITING.
//! 2. A successful completion clears every field value.
//! 3. A failed completion returns to EDITING with values kept.
//! 4. Disposing while SUBMITTING cancels the latency timer and returns to
//!    EDITING without completing.

use std::collections::BTreeMap;
use std::fmt;

use web_time::{Duration, Instant};

use crate::host::{Component, Host, TimerId, release_timer};

/// Default simulated network latency.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

// ---------------------------------------------------------------------------
// Schema and draft
// ---------------------------------------------------------------------------

/// One labeled text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub required: bool,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required,
        }
    }
}

/// Field metadata for a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The site's contact form: name, phone and message are required.
    #[must_use]
    pub fn contact() -> Self {
        Self::new(vec![
            FieldSpec::new("name", "Full name", true),
            FieldSpec::new("phone", "Phone", true),
            FieldSpec::new("email", "Email", false),
            FieldSpec::new("subject", "Subject", false),
            FieldSpec::new("message", "Message", true),
        ])
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Submission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

impl FormStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        }
    }
}

/// Field values and status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormDraft {
    pub fields: BTreeMap<String, String>,
    pub status: FormStatus,
}

impl FormDraft {
    /// Empty values for every schema field.
    #[must_use]
    pub fn for_schema(schema: &FormSchema) -> Self {
        Self {
            fields: schema
                .fields()
                .iter()
                .map(|f| (f.name.clone(), String::new()))
                .collect(),
            status: FormStatus::Editing,
        }
    }

    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Whether every value is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(String::is_empty)
    }

    fn clear_values(&mut self) {
        for value in self.fields.values_mut() {
            value.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Required fields left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Names of the failing fields, in schema order.
    pub missing: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "required fields empty: {}", self.missing.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Why a submit was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Required fields are empty; status stays EDITING.
    Validation(ValidationError),
    /// A submission is already in flight.
    AlreadySubmitting,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation failed: {e}"),
            Self::AlreadySubmitting => f.write_str("a submission is already in progress"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::AlreadySubmitting => None,
        }
    }
}

impl From<ValidationError> for SubmitError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Submission hook
// ---------------------------------------------------------------------------

/// Decides the outcome of a simulated submission once the latency elapses.
pub trait SubmissionHook: fmt::Debug {
    /// `Err(message)` rejects the submission.
    fn complete(&mut self, draft: &FormDraft) -> Result<(), String>;
}

/// The default hook: every submission succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSucceed;

impl SubmissionHook for AlwaysSucceed {
    fn complete(&mut self, _draft: &FormDraft) -> Result<(), String> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

/// Form state machine bound to a host timer.
#[derive(Debug)]
pub struct ContactForm {
    schema: FormSchema,
    draft: FormDraft,
    latency: Duration,
    hook: Box<dyn SubmissionHook>,
    timer: Option<TimerId>,
    last_failure: Option<String>,
}

impl ContactForm {
    #[must_use]
    pub fn new(schema: FormSchema, latency: Duration) -> Self {
        Self {
            draft: FormDraft::for_schema(&schema),
            schema,
            latency,
            hook: Box::new(AlwaysSucceed),
            timer: None,
            last_failure: None,
        }
    }

    /// Replace the submission hook (builder pattern).
    #[must_use]
    pub fn with_hook(mut self, hook: impl SubmissionHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    /// Replace the submission hook in place.
    pub fn set_hook(&mut self, hook: Box<dyn SubmissionHook>) {
        self.hook = hook;
    }

    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[must_use]
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.draft.status
    }

    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.draft.value(field)
    }

    /// Message from the most recent rejected submission.
    #[must_use]
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Set a field value. Permitted in any status; typing after a completed
    /// submission starts a new one. Returns `false` for unknown fields.
    pub fn edit(&mut self, field: &str, value: impl Into<String>) -> bool {
        let Some(slot) = self.draft.fields.get_mut(field) else {
            tracing::debug!(target: "showroom.form", field, "edit of unknown field ignored");
            return false;
        };
        *slot = value.into();
        if self.draft.status == FormStatus::Submitted {
            self.set_status(FormStatus::Editing);
        }
        true
    }

    /// Required fields that are currently empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<String> = self
            .schema
            .fields()
            .iter()
            .filter(|f| f.required && self.draft.value(&f.name).is_none_or(str::is_empty))
            .map(|f| f.name.clone())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Start a submission: validate, enter SUBMITTING and arm the latency
    /// timer.
    pub fn submit(&mut self, host: &mut Host, now: Instant) -> Result<(), SubmitError> {
        if self.draft.status == FormStatus::Submitting {
            return Err(SubmitError::AlreadySubmitting);
        }
        if let Err(e) = self.validate() {
            tracing::debug!(target: "showroom.form", missing = ?e.missing, "submit blocked");
            return Err(e.into());
        }
        self.last_failure = None;
        self.set_status(FormStatus::Submitting);
        self.timer = Some(host.timers.schedule_once(self.name(), now + self.latency));
        Ok(())
    }

    /// Acknowledge a completed submission and return to EDITING.
    pub fn reset(&mut self) {
        if self.draft.status == FormStatus::Submitted {
            self.set_status(FormStatus::Editing);
        }
        self.last_failure = None;
    }

    fn complete(&mut self) {
        match self.hook.complete(&self.draft) {
            Ok(()) => {
                self.draft.clear_values();
                self.set_status(FormStatus::Submitted);
            }
            Err(message) => {
                tracing::debug!(target: "showroom.form", %message, "submission rejected");
                self.last_failure = Some(message);
                self.set_status(FormStatus::Editing);
            }
        }
    }

    fn set_status(&mut self, next: FormStatus) {
        if next != self.draft.status {
            tracing::debug!(
                target: "showroom.form",
                from = self.draft.status.as_str(),
                to = next.as_str(),
                "form status changed"
            );
            self.draft.status = next;
        }
    }
}

impl Component for ContactForm {
    fn name(&self) -> &'static str {
        "form"
    }

    fn mount(&mut self, _host: &mut Host, _now: Instant) {}

    fn on_timer(&mut self, _host: &mut Host, timer: TimerId, _at: Instant) -> bool {
        if self.timer != Some(timer) {
            return false;
        }
        self.timer = None;
        self.complete();
        true
    }

    fn dispose(&mut self, host: &mut Host) {
        release_timer(host, &mut self.timer);
        if self.draft.status == FormStatus::Submitting {
            self.set_status(FormStatus::Editing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(form: &mut ContactForm) {
        form.edit("name", "Sara");
        form.edit("phone", "0912");
        form.edit("message", "Hello");
    }

    fn fire(host: &mut Host, form: &mut ContactForm, now: Instant) {
        while let Some(f) = host.timers.pop_due(now) {
            form.on_timer(host, f.id, f.deadline);
        }
    }

    #[test]
    fn missing_required_fields_block_submit() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut form = ContactForm::new(FormSchema::contact(), DEFAULT_LATENCY);
        form.edit("name", "Sara");
        let err = form.submit(&mut host, t0).unwrap_err();
        assert_eq!(
            err,
            SubmitError::Validation(ValidationError {
                missing: vec!["phone".into(), "message".into()]
            })
        );
        assert_eq!(form.status(), FormStatus::Editing);
        assert!(host.timers.is_empty());
    }

    #[test]
    fn successful_submission_clears_fields() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut form = ContactForm::new(FormSchema::contact(), DEFAULT_LATENCY);
        filled(&mut form);
        form.submit(&mut host, t0).unwrap();
        assert_eq!(form.status(), FormStatus::Submitting);

        fire(&mut host, &mut form, t0 + Duration::from_millis(1499));
        assert_eq!(form.status(), FormStatus::Submitting);
        fire(&mut host, &mut form, t0 + DEFAULT_LATENCY);
        assert_eq!(form.status(), FormStatus::Submitted);
        assert!(form.draft().is_blank());
    }

    #[test]
    fn double_submit_is_refused() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut form = ContactForm::new(FormSchema::contact(), DEFAULT_LATENCY);
        filled(&mut form);
        form.submit(&mut host, t0).unwrap();
        assert_eq!(form.submit(&mut host, t0), Err(SubmitError::AlreadySubmitting));
        assert_eq!(host.timers.len(), 1);
    }

    #[test]
    fn edit_after_submitted_returns_to_editing() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut form = ContactForm::new(FormSchema::contact(), DEFAULT_LATENCY);
        filled(&mut form);
        form.submit(&mut host, t0).unwrap();
        fire(&mut host, &mut form, t0 + DEFAULT_LATENCY);
        assert!(form.edit("email", "a@b.c"));
        assert_eq!(form.status(), FormStatus::Editing);
        assert!(!form.edit("fax", "1"));
    }

    #[test]
    fn reset_acknowledges_completion() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut form = ContactForm::new(FormSchema::contact(), DEFAULT_LATENCY);
        filled(&mut form);
        form.submit(&mut host, t0).unwrap();
        fire(&mut host, &mut form, t0 + DEFAULT_LATENCY);
        form.reset();
        assert_eq!(form.status(), FormStatus::Editing);
    }

    #[derive(Debug)]
    struct Reject;

    impl SubmissionHook for Reject {
        fn complete(&mut self, _draft: &FormDraft) -> Result<(), String> {
            Err("network unreachable".into())
        }
    }

    #[test]
    fn injected_failure_keeps_values() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut form = ContactForm::new(FormSchema::contact(), DEFAULT_LATENCY).with_hook(Reject);
        filled(&mut form);
        form.submit(&mut host, t0).unwrap();
        fire(&mut host, &mut form, t0 + DEFAULT_LATENCY);
        assert_eq!(form.status(), FormStatus::Editing);
        assert_eq!(form.value("name"), Some("Sara"));
        assert_eq!(form.last_failure(), Some("network unreachable"));
    }

    #[test]
    fn dispose_cancels_pending_submission() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut form = ContactForm::new(FormSchema::contact(), DEFAULT_LATENCY);
        filled(&mut form);
        form.submit(&mut host, t0).unwrap();
        form.dispose(&mut host);
        assert!(host.is_idle());
        assert_eq!(form.status(), FormStatus::Editing);
        assert_eq!(form.value("message"), Some("Hello"));
    }
}
