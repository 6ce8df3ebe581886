//! Registration form state: draft, errors and the submission lifecycle

use super::field::{FieldDefinition, FieldType, FieldValue, FormDefinition};
use super::submission::{build_response_record, Submission};
use super::validation::{validate_all, ValidationErrors};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Trait for focus cycling over fields and the buttons row
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Lifecycle of one modal instance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Loading,
    /// Editable; validation errors, if any, are shown inline
    Ready,
    Submitting,
    Success,
    /// The definition could not be loaded; only closing is possible
    Failed(String),
}

/// Which control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(usize),
    SubmitButton,
    CloseButton,
}

/// Dynamic registration form bound to one form definition
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub form_id: Uuid,
    pub program_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub definition: Option<FormDefinition>,
    /// Sorted by `sort_order`
    pub fields: Vec<FieldDefinition>,
    pub draft: HashMap<Uuid, FieldValue>,
    pub errors: ValidationErrors,
    pub phase: FormPhase,
    pub active_field_index: usize,
    /// Highlighted option within the active checkbox/radio field
    pub option_cursor: usize,
}

impl RegistrationForm {
    pub fn new(form_id: Uuid, program_id: Option<Uuid>, course_id: Option<Uuid>) -> Self {
        Self {
            form_id,
            program_id,
            course_id,
            definition: None,
            fields: Vec::new(),
            draft: HashMap::new(),
            errors: HashMap::new(),
            phase: FormPhase::Loading,
            active_field_index: 0,
            option_cursor: 0,
        }
    }

    /// Install the loaded definition and move to `Ready` with an empty draft
    pub fn load(&mut self, definition: FormDefinition, mut fields: Vec<FieldDefinition>) {
        fields.sort_by_key(|f| f.sort_order);
        self.definition = Some(definition);
        self.fields = fields;
        self.draft.clear();
        self.errors.clear();
        self.active_field_index = 0;
        self.option_cursor = 0;
        self.phase = FormPhase::Ready;
    }

    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Failed(message.into());
    }

    pub fn is_editable(&self) -> bool {
        self.phase == FormPhase::Ready
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn focus(&self) -> FocusTarget {
        let n = self.fields.len();
        match self.active_field_index {
            i if i < n => FocusTarget::Field(i),
            i if i == n => FocusTarget::SubmitButton,
            _ => FocusTarget::CloseButton,
        }
    }

    pub fn active_definition(&self) -> Option<&FieldDefinition> {
        match self.focus() {
            FocusTarget::Field(i) => self.fields.get(i),
            _ => None,
        }
    }

    pub fn value(&self, field_id: &Uuid) -> Option<&FieldValue> {
        self.draft.get(field_id)
    }

    pub fn error(&self, field_id: &Uuid) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    /// Text of a single-valued field, empty when unset
    pub fn text_value(&self, field_id: &Uuid) -> &str {
        self.value(field_id)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    /// Store a value for a field, clearing only that field's error
    pub fn set_value(&mut self, field_id: Uuid, value: FieldValue) {
        self.errors.remove(&field_id);
        self.draft.insert(field_id, value);
    }

    /// Apply a typed character to the focused field.
    ///
    /// Space toggles the highlighted option on checkbox and radio groups;
    /// other characters are ignored on choice fields.
    pub fn input_char(&mut self, c: char) {
        if !self.is_editable() {
            return;
        }
        let Some(field) = self.active_definition() else {
            return;
        };
        let (id, field_type) = (field.id, field.field_type.clone());
        match field_type {
            FieldType::Checkbox | FieldType::Radio => {
                if c == ' ' {
                    self.toggle_option();
                }
            }
            FieldType::Select => {}
            FieldType::Text
            | FieldType::Email
            | FieldType::Phone
            | FieldType::Textarea
            | FieldType::Other(_) => {
                let mut text = self.text_value(&id).to_string();
                text.push(c);
                self.set_value(id, FieldValue::Text(text));
            }
        }
    }

    /// Delete the last character of the focused text field
    pub fn backspace(&mut self) {
        if !self.is_editable() {
            return;
        }
        let Some(field) = self.active_definition() else {
            return;
        };
        if field.field_type.is_choice() {
            return;
        }
        let id = field.id;
        let mut text = self.text_value(&id).to_string();
        if text.pop().is_some() {
            self.set_value(id, FieldValue::Text(text));
        }
    }

    /// Enter inside a text area inserts a newline; returns whether it was consumed
    pub fn newline(&mut self) -> bool {
        let is_textarea = self
            .active_definition()
            .is_some_and(|f| f.field_type == FieldType::Textarea);
        if is_textarea && self.is_editable() {
            self.input_char('\n');
            return true;
        }
        false
    }

    /// Left/Right on a choice field.
    ///
    /// Selects cycle their value through "none selected" and every option;
    /// checkbox and radio groups move the option cursor.
    pub fn cycle_choice(&mut self, forward: bool) {
        if !self.is_editable() {
            return;
        }
        let Some(field) = self.active_definition() else {
            return;
        };
        let option_count = field.options.len();
        if option_count == 0 {
            return;
        }
        match field.field_type.clone() {
            FieldType::Select => {
                let id = field.id;
                // Position 0 is the "none selected" placeholder
                let current = self
                    .value(&id)
                    .and_then(FieldValue::as_text)
                    .and_then(|v| field.options.iter().position(|o| o == v))
                    .map_or(0, |i| i + 1);
                let slots = option_count + 1;
                let next = if forward {
                    (current + 1) % slots
                } else {
                    (current + slots - 1) % slots
                };
                let value = match next {
                    0 => String::new(),
                    i => field.options[i - 1].clone(),
                };
                self.set_value(id, FieldValue::Text(value));
            }
            FieldType::Checkbox | FieldType::Radio => {
                self.option_cursor = if forward {
                    (self.option_cursor + 1) % option_count
                } else {
                    (self.option_cursor + option_count - 1) % option_count
                };
            }
            _ => {}
        }
    }

    /// Toggle (checkbox) or select (radio) the highlighted option
    pub fn toggle_option(&mut self) {
        if !self.is_editable() {
            return;
        }
        let Some(field) = self.active_definition() else {
            return;
        };
        let Some(option) = field.options.get(self.option_cursor).cloned() else {
            return;
        };
        let (id, field_type) = (field.id, field.field_type.clone());
        match field_type {
            FieldType::Checkbox => {
                let mut set = match self.value(&id) {
                    Some(FieldValue::Set(set)) => set.clone(),
                    _ => BTreeSet::new(),
                };
                if !set.remove(&option) {
                    set.insert(option);
                }
                self.set_value(id, FieldValue::Set(set));
            }
            FieldType::Radio => self.set_value(id, FieldValue::Text(option)),
            _ => {}
        }
    }

    /// Recompute the whole error set; true when the draft is valid
    pub fn validate(&mut self) -> bool {
        self.errors = validate_all(&self.fields, &self.draft);
        self.errors.is_empty()
    }

    /// Validate and, if clean, move to `Submitting` and hand back the record to persist.
    ///
    /// Returns `None` when not editable (already submitting, loading, done)
    /// or when validation fails.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.is_editable() {
            return None;
        }
        if !self.validate() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some(Submission {
            form_id: self.form_id,
            program_id: self.program_id,
            course_id: self.course_id,
            responses: build_response_record(&self.fields, &self.draft),
        })
    }

    /// Apply the outcome of the insert call
    pub fn finish_submit(&mut self, succeeded: bool) {
        if !self.is_submitting() {
            return;
        }
        if succeeded {
            self.draft.clear();
            self.phase = FormPhase::Success;
        } else {
            self.phase = FormPhase::Ready;
        }
    }

    pub fn success_message(&self) -> &str {
        self.definition
            .as_ref()
            .map(FormDefinition::success_message_or_default)
            .unwrap_or(super::field::DEFAULT_SUCCESS_MESSAGE)
    }

    fn reset_option_cursor(&mut self) {
        let selected = self.active_definition().and_then(|field| {
            let current = self.value(&field.id)?.as_text()?;
            field.options.iter().position(|o| o == current)
        });
        self.option_cursor = selected.unwrap_or(0);
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 2 // fields, submit, close
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
        self.reset_option_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn definition() -> FormDefinition {
        FormDefinition {
            id: Uuid::new_v4(),
            name: "Retreat Registration".to_string(),
            description: None,
            success_message: Some("See you there!".to_string()),
            created_at: None,
        }
    }

    /// Name (required text) and Email (optional email)
    fn name_email_form() -> RegistrationForm {
        let def = definition();
        let mut form = RegistrationForm::new(def.id, None, None);
        form.load(
            def,
            vec![
                FieldDefinition::new("Email", FieldType::Email, false, 2),
                FieldDefinition::new("Name", FieldType::Text, true, 1),
            ],
        );
        form
    }

    fn type_str(form: &mut RegistrationForm, text: &str) {
        for c in text.chars() {
            form.input_char(c);
        }
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_form_is_loading() {
            let form = RegistrationForm::new(Uuid::new_v4(), None, None);
            assert_eq!(form.phase, FormPhase::Loading);
            assert!(!form.is_editable());
        }

        #[test]
        fn test_load_sorts_fields_and_becomes_ready() {
            let form = name_email_form();
            assert_eq!(form.phase, FormPhase::Ready);
            let labels: Vec<_> = form.fields.iter().map(|f| f.label.as_str()).collect();
            assert_eq!(labels, vec!["Name", "Email"]);
            assert!(form.draft.is_empty());
        }

        #[test]
        fn test_load_failed() {
            let mut form = RegistrationForm::new(Uuid::new_v4(), None, None);
            form.load_failed("form not found");
            assert_eq!(form.phase, FormPhase::Failed("form not found".to_string()));
            assert!(form.begin_submit().is_none());
        }

        #[test]
        fn test_input_ignored_while_loading() {
            let mut form = RegistrationForm::new(Uuid::new_v4(), None, None);
            form.input_char('a');
            assert!(form.draft.is_empty());
        }
    }

    mod focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_focus_cycles_through_fields_and_buttons() {
            let mut form = name_email_form();
            assert_eq!(form.focus(), FocusTarget::Field(0));
            form.next_field();
            assert_eq!(form.focus(), FocusTarget::Field(1));
            form.next_field();
            assert_eq!(form.focus(), FocusTarget::SubmitButton);
            form.next_field();
            assert_eq!(form.focus(), FocusTarget::CloseButton);
            form.next_field();
            assert_eq!(form.focus(), FocusTarget::Field(0));
        }

        #[test]
        fn test_prev_field_wraps_to_close_button() {
            let mut form = name_email_form();
            form.prev_field();
            assert_eq!(form.focus(), FocusTarget::CloseButton);
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = name_email_form();
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 3);
        }

        #[test]
        fn test_typing_on_button_is_ignored() {
            let mut form = name_email_form();
            form.set_active_field(2);
            form.input_char('x');
            assert!(form.draft.is_empty());
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_and_backspace() {
            let mut form = name_email_form();
            type_str(&mut form, "Adaa");
            form.backspace();
            let name_id = form.fields[0].id;
            assert_eq!(form.text_value(&name_id), "Ada");
        }

        #[test]
        fn test_editing_clears_only_that_fields_error() {
            let mut form = name_email_form();
            let name_id = form.fields[0].id;
            let email_id = form.fields[1].id;
            form.set_value(email_id, FieldValue::Text("bad".to_string()));
            assert!(!form.validate());
            assert_eq!(form.errors.len(), 2);

            form.input_char('A');

            assert!(form.error(&name_id).is_none());
            assert_eq!(
                form.error(&email_id),
                Some("Please enter a valid email address")
            );
        }

        #[test]
        fn test_newline_only_in_textarea() {
            let def = definition();
            let mut form = RegistrationForm::new(def.id, None, None);
            form.load(
                def,
                vec![
                    FieldDefinition::new("Name", FieldType::Text, false, 0),
                    FieldDefinition::new("Notes", FieldType::Textarea, false, 1),
                ],
            );
            assert!(!form.newline());
            form.next_field();
            type_str(&mut form, "a");
            assert!(form.newline());
            type_str(&mut form, "b");
            let notes_id = form.fields[1].id;
            assert_eq!(form.text_value(&notes_id), "a\nb");
        }
    }

    mod choices {
        use super::*;
        use pretty_assertions::assert_eq;

        fn choice_form(field_type: FieldType) -> RegistrationForm {
            let def = definition();
            let mut form = RegistrationForm::new(def.id, None, None);
            form.load(
                def,
                vec![FieldDefinition::new("Pick", field_type, false, 0)
                    .with_options(&["Yoga", "Pilates", "Tai Chi"])],
            );
            form
        }

        #[test]
        fn test_select_cycles_through_none() {
            let mut form = choice_form(FieldType::Select);
            let id = form.fields[0].id;
            form.cycle_choice(true);
            assert_eq!(form.text_value(&id), "Yoga");
            form.cycle_choice(false);
            assert_eq!(form.text_value(&id), "");
            form.cycle_choice(false);
            assert_eq!(form.text_value(&id), "Tai Chi");
        }

        #[test]
        fn test_select_ignores_typing() {
            let mut form = choice_form(FieldType::Select);
            form.input_char('x');
            assert!(form.draft.is_empty());
        }

        #[test]
        fn test_checkbox_toggles_set_membership() {
            let mut form = choice_form(FieldType::Checkbox);
            let id = form.fields[0].id;
            form.input_char(' ');
            form.cycle_choice(true);
            form.cycle_choice(true);
            form.input_char(' ');
            let expected: BTreeSet<String> =
                ["Yoga", "Tai Chi"].iter().map(|s| s.to_string()).collect();
            assert_eq!(form.value(&id), Some(&FieldValue::Set(expected)));

            form.cycle_choice(true); // wraps to Yoga
            form.input_char(' ');
            let expected: BTreeSet<String> = ["Tai Chi".to_string()].into_iter().collect();
            assert_eq!(form.value(&id), Some(&FieldValue::Set(expected)));
        }

        #[test]
        fn test_radio_selects_single_option() {
            let mut form = choice_form(FieldType::Radio);
            let id = form.fields[0].id;
            form.cycle_choice(true);
            form.input_char(' ');
            assert_eq!(form.text_value(&id), "Pilates");
            form.cycle_choice(false);
            form.toggle_option();
            assert_eq!(form.text_value(&id), "Yoga");
        }

        #[test]
        fn test_radio_cursor_starts_on_selection() {
            let mut form = choice_form(FieldType::Radio);
            form.cycle_choice(true);
            form.cycle_choice(true);
            form.toggle_option();
            form.next_field();
            form.prev_field();
            assert_eq!(form.option_cursor, 2);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_required_empty_blocks_submission() {
            let mut form = name_email_form();
            let name_id = form.fields[0].id;
            assert!(form.begin_submit().is_none());
            assert_eq!(form.phase, FormPhase::Ready);
            assert_eq!(form.errors.len(), 1);
            assert_eq!(form.error(&name_id), Some("Name is required"));
        }

        #[test]
        fn test_invalid_email_blocks_submission() {
            let mut form = name_email_form();
            let email_id = form.fields[1].id;
            type_str(&mut form, "Ada");
            form.next_field();
            type_str(&mut form, "not-an-email");
            assert!(form.begin_submit().is_none());
            assert_eq!(
                form.error(&email_id),
                Some("Please enter a valid email address")
            );
        }

        #[test]
        fn test_valid_draft_produces_label_keyed_record() {
            let mut form = name_email_form();
            type_str(&mut form, "Ada");
            form.next_field();
            type_str(&mut form, "ada@example.com");

            let submission = form.begin_submit().expect("valid draft");

            assert_eq!(form.phase, FormPhase::Submitting);
            assert_eq!(submission.form_id, form.form_id);
            assert_eq!(
                Value::Object(submission.responses),
                json!({"Name": "Ada", "Email": "ada@example.com"})
            );
        }

        #[test]
        fn test_unset_optional_field_is_empty_string() {
            let mut form = name_email_form();
            type_str(&mut form, "Ada");
            let submission = form.begin_submit().expect("valid draft");
            assert_eq!(submission.responses["Email"], json!(""));
        }

        #[test]
        fn test_attribution_ids_carried() {
            let def = definition();
            let program = Uuid::new_v4();
            let course = Uuid::new_v4();
            let mut form = RegistrationForm::new(def.id, Some(program), Some(course));
            form.load(def, vec![]);
            let submission = form.begin_submit().expect("no fields to fail");
            assert_eq!(submission.program_id, Some(program));
            assert_eq!(submission.course_id, Some(course));
        }

        #[test]
        fn test_no_second_submit_while_submitting() {
            let mut form = name_email_form();
            type_str(&mut form, "Ada");
            assert!(form.begin_submit().is_some());
            assert!(form.begin_submit().is_none());
            form.input_char('x');
            let name_id = form.fields[0].id;
            assert_eq!(form.text_value(&name_id), "Ada");
        }

        #[test]
        fn test_success_discards_draft() {
            let mut form = name_email_form();
            type_str(&mut form, "Ada");
            form.begin_submit();
            form.finish_submit(true);
            assert_eq!(form.phase, FormPhase::Success);
            assert!(form.draft.is_empty());
            assert_eq!(form.success_message(), "See you there!");
        }

        #[test]
        fn test_failure_returns_to_ready_with_draft() {
            let mut form = name_email_form();
            type_str(&mut form, "Ada");
            form.begin_submit();
            form.finish_submit(false);
            assert_eq!(form.phase, FormPhase::Ready);
            assert!(form.errors.is_empty());
            let name_id = form.fields[0].id;
            assert_eq!(form.text_value(&name_id), "Ada");
            assert!(form.begin_submit().is_some());
        }

        #[test]
        fn test_finish_without_submit_is_noop() {
            let mut form = name_email_form();
            form.finish_submit(true);
            assert_eq!(form.phase, FormPhase::Ready);
        }
    }
}
