//! Presentation sinks.
//!
//! A [`FormView`] is whatever actually shows the form: a DOM binding, a
//! terminal UI, or the in-memory [`PageView`] used by tests and the demo.
//! Views are told what to show through [`Effect`]s and hold no workflow state.

use std::collections::BTreeMap;
use std::fmt;

use crate::field::FieldId;
use crate::workflow::{Effect, Notice, NoticeLevel, SubmitControl};

/// Class applied to a control while it shows an error.
pub const ERROR_CLASS: &str = "is-error";

/// Class applied to an inline error slot while it has text.
pub const VISIBLE_CLASS: &str = "is-visible";

/// Trait for anything that can render a form.
pub trait FormView {
    /// Show `message` in the control's error slot and mark the control.
    fn set_error(&mut self, field: &FieldId, message: &str);

    /// Empty the control's error slot and unmark the control.
    fn clear_error(&mut self, field: &FieldId);

    fn show_confirmation(&mut self, summary: &str);

    fn hide_confirmation(&mut self);

    fn set_submit_control(&mut self, control: &SubmitControl);

    fn show_notice(&mut self, notice: &Notice);

    /// Reset every control to its empty value.
    fn clear_values(&mut self);

    /// Apply one effect. `Effect::Dispatch` is not a presentation concern and
    /// is ignored here.
    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::ShowError { field, message } => self.set_error(field, message),
            Effect::ClearError { field } => self.clear_error(field),
            Effect::ShowConfirmation { summary } => self.show_confirmation(summary),
            Effect::HideConfirmation => self.hide_confirmation(),
            Effect::SubmitControl(control) => self.set_submit_control(control),
            Effect::Notice(notice) => self.show_notice(notice),
            Effect::ClearValues => self.clear_values(),
            Effect::Dispatch(_) => {}
        }
    }
}

/// Rendered state of one control's inline error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    pub text: String,
    pub visible: bool,
}

/// In-memory rendering of a form.
///
/// Keeps exactly what a page would show, so tests can assert on visible state
/// without a browser.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    slots: BTreeMap<FieldId, ErrorSlot>,
    submit: SubmitControl,
    confirmation: Option<String>,
    notices: Vec<Notice>,
    value_resets: usize,
}

impl PageView {
    /// A view whose submit control starts in the given state.
    pub fn new(submit: SubmitControl) -> Self {
        Self {
            submit,
            ..Default::default()
        }
    }

    pub fn error_slot(&self, field: &str) -> Option<&ErrorSlot> {
        self.slots.get(field)
    }

    /// The error text currently shown for a control, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.error_slot(field)
            .filter(|slot| slot.visible)
            .map(|slot| slot.text.as_str())
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.error(field).is_some()
    }

    /// Presentation classes on the control itself.
    pub fn field_classes(&self, field: &str) -> Vec<&'static str> {
        if self.has_error(field) {
            vec![ERROR_CLASS]
        } else {
            Vec::new()
        }
    }

    /// Controls currently showing an error, in id order.
    pub fn fields_with_errors(&self) -> Vec<&FieldId> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.visible)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    /// Every notice shown so far, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// How many times the controls were reset.
    pub fn value_resets(&self) -> usize {
        self.value_resets
    }
}

impl FormView for PageView {
    fn set_error(&mut self, field: &FieldId, message: &str) {
        let slot = self.slots.entry(field.clone()).or_default();
        slot.text = message.to_string();
        slot.visible = true;
    }

    fn clear_error(&mut self, field: &FieldId) {
        let slot = self.slots.entry(field.clone()).or_default();
        slot.text.clear();
        slot.visible = false;
    }

    fn show_confirmation(&mut self, summary: &str) {
        self.confirmation = Some(summary.to_string());
    }

    fn hide_confirmation(&mut self) {
        self.confirmation = None;
    }

    fn set_submit_control(&mut self, control: &SubmitControl) {
        self.submit = control.clone();
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn clear_values(&mut self) {
        self.value_resets += 1;
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, slot) in &self.slots {
            if slot.visible {
                writeln!(f, "  [{id}] {}", slot.text)?;
            }
        }
        if let Some(summary) = &self.confirmation {
            writeln!(f, "  ┌ confirm")?;
            for line in summary.lines() {
                writeln!(f, "  │ {line}")?;
            }
            writeln!(f, "  └ (confirm / cancel)")?;
        }
        if let Some(notice) = self.last_notice() {
            let marker = match notice.level {
                NoticeLevel::Success => "✓",
                NoticeLevel::Error => "✗",
            };
            for line in notice.message.lines() {
                writeln!(f, "  {marker} {line}")?;
            }
        }
        let state = if self.submit.enabled { "" } else { " (disabled)" };
        write!(f, "  [{}]{state}", self.submit.label)
    }
}
