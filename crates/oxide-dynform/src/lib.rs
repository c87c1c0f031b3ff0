//! # oxide-dynform
//!
//! Schema-driven dynamic forms: describe the fields once, get Bootstrap 5
//! markup, debounced per-field validation, and change/submit callbacks.
//!
//! This crate provides:
//! - A field schema with visibility conditions on fields and options
//! - Per-kind controls (dropdown, button group, textarea, typed inputs)
//! - A debounced change pipeline and a validating submit
//! - Schemas derived from a caller-owned value store
//! - A `tokio` driver for running a form inside an event loop
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! use oxide_dynform::{
//!     DynamicForm, FieldKind, FieldSpec, FormCallbacks, FormConfig, FormProps,
//!     OptionSpec, Schema, Values,
//! };
//!
//! let schema = Schema::new(vec![
//!     FieldSpec::new("pricingModel", "Pricing Model")
//!         .kind(FieldKind::Dropdown)
//!         .option(OptionSpec::new("click", "Cost per Click"))
//!         .option(OptionSpec::new("bid", "Lowest cost bid"))
//!         .required(),
//!     FieldSpec::new("email", "Email").kind(FieldKind::Email),
//! ])
//! .unwrap();
//!
//! let mut form = DynamicForm::new(
//!     FormProps::new(Arc::new(schema), Values::new()),
//!     FormCallbacks::new().on_change(|values| println!("changed: {values:?}")),
//!     FormConfig::new(),
//! );
//!
//! let start = Instant::now();
//! form.edit("pricingModel", "bid", start).unwrap();
//! let outcome = form.poll(start + Duration::from_millis(300)).unwrap();
//! assert_eq!(outcome.snapshot.get_str("pricingModel"), Some("bid"));
//!
//! let html = form.render();
//! assert!(html.contains(r#"value="bid" selected"#));
//! ```
//!
//! ## Visibility
//!
//! ```rust
//! use oxide_dynform::{FieldSpec, Schema, Values};
//!
//! let values = Values::new().with("pricingModel", "bid");
//! let model = values.get_str("pricingModel").map(str::to_owned);
//! let schema = Schema::new(vec![
//!     FieldSpec::new("pricingModel", "Pricing Model"),
//!     FieldSpec::new("clicksPerDay", "Total Click per day")
//!         .visible_when(move || model.as_deref() == Some("click")),
//! ])
//! .unwrap();
//!
//! assert_eq!(schema.visible_fields().count(), 1);
//! ```

pub mod control;
mod debounce;
mod derive;
pub mod driver;
mod error;
mod form;
pub mod render;
pub mod schema;
pub mod validation;
mod value;
pub mod widgets;

pub use debounce::Debouncer;
pub use derive::DerivedSchema;
pub use error::{FormError, Result, ValidationErrors};
pub use form::{
    ChangeEvent, ChangeOutcome, DynamicForm, FormCallbacks, FormConfig, FormProps,
    PropagationPolicy, SubmitOutcome, DEFAULT_DEBOUNCE,
};
pub use schema::{FieldKind, FieldSpec, LayoutWidth, OptionSpec, Schema, Visibility};
pub use value::{ValueStore, Values};
