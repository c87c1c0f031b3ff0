//! The form renderer: bound controls, debounced change pipeline, submission.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::control::{ChangeScope, Control};
use crate::debounce::Debouncer;
use crate::error::{FormError, Result, ValidationErrors};
use crate::render::{render_form, DEFAULT_SUBMIT_TEXT};
use crate::schema::Schema;
use crate::validation::validate_field;
use crate::value::Values;

/// Debounce window of the change pipeline when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Whether a change whose field failed validation still reaches the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropagationPolicy {
    /// Propagate every change; validation only produces inline errors.
    #[default]
    Permissive,
    /// Skip `set_values` and `on_change` when the changed field is invalid.
    ValidOnly,
}

/// Form behavior settings.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Window in which edits are coalesced.
    pub debounce: Duration,
    /// Validation gate for change propagation.
    pub policy: PropagationPolicy,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            policy: PropagationPolicy::Permissive,
        }
    }
}

impl FormConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debounce window.
    #[must_use]
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the propagation policy.
    #[must_use]
    pub fn policy(mut self, policy: PropagationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Inputs of a form render.
#[derive(Debug, Clone)]
pub struct FormProps {
    /// The schema. Identity (`Arc::ptr_eq`) decides whether a re-render is needed.
    pub form_data: Arc<Schema>,
    /// Initial values, read once when the form is created.
    pub values: Values,
    /// Label of the submit button.
    pub submit_text: Option<String>,
}

impl FormProps {
    /// Creates props for a schema and its initial values.
    pub fn new(form_data: Arc<Schema>, values: Values) -> Self {
        Self {
            form_data,
            values,
            submit_text: None,
        }
    }

    /// Sets the submit button label.
    #[must_use]
    pub fn submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = Some(text.into());
        self
    }
}

type SnapshotFn = Box<dyn FnMut(&Values)>;

/// Caller callbacks. Every callback is optional.
#[derive(Default)]
pub struct FormCallbacks {
    set_values: Option<Box<dyn FnMut(Values)>>,
    on_change: Option<SnapshotFn>,
    on_finish: Option<SnapshotFn>,
}

impl FormCallbacks {
    /// Creates an empty callback set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Receives the full snapshot after every debounced change, to replace
    /// the caller's stored values.
    #[must_use]
    pub fn set_values(mut self, f: impl FnMut(Values) + 'static) -> Self {
        self.set_values = Some(Box::new(f));
        self
    }

    /// Receives the full snapshot after every debounced change.
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&Values) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Receives the full snapshot after a successful submit.
    #[must_use]
    pub fn on_finish(mut self, f: impl FnMut(&Values) + 'static) -> Self {
        self.on_finish = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for FormCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormCallbacks")
            .field("set_values", &self.set_values.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}

/// An edit coming from a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A control that names its field (dropdown, button group).
    Scoped {
        /// Field name.
        field: String,
        /// New value.
        value: Value,
    },
    /// A native input event, attributed through the target's id.
    Target {
        /// Id of the element that fired the event, if any.
        target_id: Option<String>,
        /// New value, if the event carried one.
        value: Option<Value>,
    },
}

/// Result of one run of the change pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeOutcome {
    /// Field that was validated, if the change could be attributed.
    pub field: Option<String>,
    /// Validation failures of that field.
    pub errors: Vec<String>,
    /// Full value snapshot after the change.
    pub snapshot: Values,
    /// Whether `set_values`/`on_change` were invoked.
    pub propagated: bool,
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field validated; `on_finish` received this snapshot.
    Finished(Values),
    /// Submission was suppressed.
    Rejected(ValidationErrors),
}

impl SubmitOutcome {
    /// Returns whether the submit went through.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// Converts the outcome into the submitted snapshot or the errors that
    /// blocked it.
    pub fn into_result(self) -> Result<Values> {
        match self {
            Self::Finished(values) => Ok(values),
            Self::Rejected(errors) => Err(FormError::ValidationErrors(errors)),
        }
    }
}

#[derive(Debug)]
struct RenderMemo {
    form_data: Arc<Schema>,
    revision: u64,
    html: String,
}

/// A rendered, interactive form.
///
/// Edits are written into the form's own state right away; validation and
/// propagation to the caller run once the debounce window has passed without
/// further edits.
pub struct DynamicForm {
    props: FormProps,
    callbacks: FormCallbacks,
    config: FormConfig,
    state: Values,
    errors: ValidationErrors,
    revision: u64,
    pending: Debouncer<Option<String>>,
    memo: Option<RenderMemo>,
    render_count: u64,
}

impl fmt::Debug for DynamicForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicForm")
            .field("fields", &self.props.form_data.len())
            .field("state", &self.state)
            .field("errors", &self.errors)
            .field("revision", &self.revision)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

impl DynamicForm {
    /// Creates a form. `props.values` seeds the form state.
    pub fn new(props: FormProps, callbacks: FormCallbacks, config: FormConfig) -> Self {
        let state = props.values.clone();
        let pending = Debouncer::new(config.debounce);
        Self {
            props,
            callbacks,
            config,
            state,
            errors: ValidationErrors::new(),
            revision: 0,
            pending,
            memo: None,
            render_count: 0,
        }
    }

    /// Returns the current schema.
    pub fn form_data(&self) -> &Arc<Schema> {
        &self.props.form_data
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the form's own value state, including values of hidden fields.
    pub fn state(&self) -> &Values {
        &self.state
    }

    /// Returns the inline validation errors.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns the submit button label.
    pub fn submit_text(&self) -> &str {
        self.props
            .submit_text
            .as_deref()
            .unwrap_or(DEFAULT_SUBMIT_TEXT)
    }

    /// Returns how many times field dispatch actually ran.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Hands new props to the form.
    ///
    /// When `form_data` is the same `Arc` as before the props are ignored
    /// entirely and `false` is returned. Otherwise the schema is swapped in;
    /// `values` is not re-applied, since it only seeds the form.
    pub fn update(&mut self, props: FormProps) -> bool {
        if Arc::ptr_eq(&props.form_data, &self.props.form_data) {
            debug!("form data unchanged, skipping re-render");
            return false;
        }
        self.props = props;
        let schema = Arc::clone(&self.props.form_data);
        self.errors
            .retain(|name| schema.visible_field(name).is_some());
        true
    }

    /// Swaps in a new schema, keeping the other props.
    pub fn set_form_data(&mut self, form_data: Arc<Schema>) -> bool {
        let props = FormProps {
            form_data,
            ..self.props.clone()
        };
        self.update(props)
    }

    /// Records an edit of a rendered field, routed the way its control
    /// reports changes.
    pub fn edit(&mut self, field: &str, value: impl Into<Value>, now: Instant) -> Result<()> {
        let scope = self
            .props
            .form_data
            .visible_field(field)
            .map(|f| Control::for_field(f).scope())
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;

        let event = match scope {
            ChangeScope::Scoped => ChangeEvent::Scoped {
                field: field.to_string(),
                value: value.into(),
            },
            ChangeScope::Target => ChangeEvent::Target {
                target_id: Some(field.to_string()),
                value: Some(value.into()),
            },
        };
        self.handle(event, now)
    }

    /// Feeds a control event into the form and (re)starts the debounce window.
    pub fn handle(&mut self, event: ChangeEvent, now: Instant) -> Result<()> {
        let field = match event {
            ChangeEvent::Scoped { field, value } => {
                if self.props.form_data.visible_field(&field).is_none() {
                    warn!(field = %field, "edit of a field that is not rendered");
                    return Err(FormError::UnknownField(field));
                }
                self.write(&field, value);
                Some(field)
            }
            ChangeEvent::Target { target_id, value } => {
                let field =
                    target_id.filter(|id| self.props.form_data.visible_field(id).is_some());
                if let (Some(name), Some(value)) = (&field, value) {
                    self.write(name, value);
                }
                field
            }
        };

        debug!(field = ?field, "change scheduled");
        self.pending.call(field, now);
        Ok(())
    }

    /// Returns when the pending change becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    /// Returns whether a change is waiting for its debounce window.
    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Runs the pending change if its window has passed.
    pub fn poll(&mut self, now: Instant) -> Option<ChangeOutcome> {
        let field = self.pending.poll(now)?;
        Some(self.run_change(field))
    }

    /// Runs the pending change right away.
    pub fn flush(&mut self) -> Option<ChangeOutcome> {
        let field = self.pending.flush()?;
        Some(self.run_change(field))
    }

    /// Drops the pending change. Values already written stay in the form state.
    pub fn cancel(&mut self) {
        self.pending.cancel();
    }

    /// Validates every rendered field and, if all pass, hands the snapshot to
    /// `on_finish`.
    pub fn submit(&mut self) -> SubmitOutcome {
        let errors = self.validate_all();
        if !errors.is_empty() {
            warn!(invalid_fields = errors.len(), "submit rejected");
            return SubmitOutcome::Rejected(errors);
        }

        let snapshot = self.snapshot();
        info!(fields = snapshot.len(), "form submitted");
        if let Some(on_finish) = self.callbacks.on_finish.as_mut() {
            on_finish(&snapshot);
        }
        SubmitOutcome::Finished(snapshot)
    }

    /// Validates every rendered field, replacing the inline errors.
    pub fn validate_all(&mut self) -> ValidationErrors {
        let schema = Arc::clone(&self.props.form_data);
        let mut errors = ValidationErrors::new();
        for field in schema.visible_fields() {
            errors.set(&field.name, validate_field(field, self.state.get(&field.name)));
        }
        if errors != self.errors {
            self.errors = errors.clone();
            self.revision += 1;
        }
        errors
    }

    /// Returns the values of every rendered field; unset fields map to `null`.
    pub fn snapshot(&self) -> Values {
        self.props
            .form_data
            .visible_fields()
            .map(|f| {
                let value = self.state.get(&f.name).cloned().unwrap_or(Value::Null);
                (f.name.clone(), value)
            })
            .collect()
    }

    /// Renders the form markup, reusing the previous markup when neither the
    /// schema identity nor the form state changed.
    pub fn render(&mut self) -> &str {
        let fresh = self.memo.as_ref().is_some_and(|m| {
            Arc::ptr_eq(&m.form_data, &self.props.form_data) && m.revision == self.revision
        });

        if !fresh {
            let html = render_form(
                &self.props.form_data,
                &self.state,
                &self.errors,
                self.submit_text(),
            );
            self.render_count += 1;
            self.memo = Some(RenderMemo {
                form_data: Arc::clone(&self.props.form_data),
                revision: self.revision,
                html,
            });
        }

        self.memo.as_ref().map_or("", |m| m.html.as_str())
    }

    fn write(&mut self, field: &str, value: Value) {
        if self.state.get(field) != Some(&value) {
            self.state.insert(field, value);
            self.revision += 1;
        }
    }

    fn validate_one(&mut self, name: &str) -> Vec<String> {
        let Some(field) = self.props.form_data.visible_field(name) else {
            return Vec::new();
        };
        let messages = validate_field(field, self.state.get(name));
        if !messages.is_empty() {
            warn!(field = name, errors = ?messages, "field failed validation");
        }
        if self.errors.get(name).map_or(&[][..], Vec::as_slice) != messages.as_slice() {
            self.errors.set(name, messages.clone());
            self.revision += 1;
        }
        messages
    }

    fn run_change(&mut self, field: Option<String>) -> ChangeOutcome {
        let errors = field
            .as_deref()
            .map(|name| self.validate_one(name))
            .unwrap_or_default();

        let snapshot = self.snapshot();
        let propagated = match self.config.policy {
            PropagationPolicy::Permissive => true,
            PropagationPolicy::ValidOnly => errors.is_empty(),
        };

        if propagated {
            debug!(field = ?field, "propagating change");
            if let Some(set_values) = self.callbacks.set_values.as_mut() {
                set_values(snapshot.clone());
            }
            if let Some(on_change) = self.callbacks.on_change.as_mut() {
                on_change(&snapshot);
            }
        } else {
            debug!(field = ?field, "change held back by validation");
        }

        ChangeOutcome {
            field,
            errors,
            snapshot,
            propagated,
        }
    }
}
