#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use oxide_dynform::{
    DerivedSchema, DynamicForm, FieldKind, FieldSpec, FormCallbacks, FormConfig, FormProps,
    OptionSpec, Schema, ValueStore, Values,
};

/// Pricing form: the click-only fields follow the current pricing model.
pub fn pricing_schema(values: &Values) -> Schema {
    let model = values.get_str("pricingModel").map(str::to_owned);
    let click = move || model.as_deref() == Some("click");

    Schema::new(vec![
        FieldSpec::new("pricingModel", "Pricing Model")
            .kind(FieldKind::Dropdown)
            .placeholder("Placeholder Text")
            .required()
            .option(OptionSpec::new("impression", "Cost per 1000 impressions"))
            .option(OptionSpec::new("click", "Cost per Click"))
            .option(OptionSpec::new("bid", "Lowest cost bid")),
        FieldSpec::new("clicksPerDay", "Total Click per day")
            .kind(FieldKind::Number)
            .visible_when(click.clone()),
        FieldSpec::new("bidCpm", "BID cpm")
            .kind(FieldKind::Number)
            .visible_when(click),
    ])
    .unwrap_or_else(|e| panic!("pricing schema: {e}"))
}

pub fn pricing_values() -> Values {
    Values::new()
        .with("pricingModel", "click")
        .with("clicksPerDay", 190)
        .with("bidCpm", 0)
}

/// A form wired to a caller-owned store, recording every callback.
pub struct Harness {
    pub store: Rc<RefCell<ValueStore>>,
    pub derived: DerivedSchema,
    pub form: DynamicForm,
    pub set_calls: Rc<RefCell<Vec<Values>>>,
    pub changes: Rc<RefCell<Vec<Values>>>,
    pub finished: Rc<RefCell<Vec<Values>>>,
}

impl Harness {
    pub fn new(build: impl Fn(&Values) -> Schema + 'static, initial: Values) -> Self {
        Self::with_config(build, initial, FormConfig::new())
    }

    pub fn with_config(
        build: impl Fn(&Values) -> Schema + 'static,
        initial: Values,
        config: FormConfig,
    ) -> Self {
        let store = Rc::new(RefCell::new(ValueStore::new(initial.clone())));
        let mut derived = DerivedSchema::new(build);
        let schema = derived.current(&store.borrow());

        let set_calls = Rc::new(RefCell::new(Vec::new()));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let finished = Rc::new(RefCell::new(Vec::new()));

        let callbacks = {
            let store = Rc::clone(&store);
            let set_calls = Rc::clone(&set_calls);
            let changes = Rc::clone(&changes);
            let finished = Rc::clone(&finished);
            FormCallbacks::new()
                .set_values(move |values: Values| {
                    set_calls.borrow_mut().push(values.clone());
                    store.borrow_mut().replace(values);
                })
                .on_change(move |values: &Values| changes.borrow_mut().push(values.clone()))
                .on_finish(move |values: &Values| finished.borrow_mut().push(values.clone()))
        };

        let form = DynamicForm::new(FormProps::new(schema, initial), callbacks, config);

        Self {
            store,
            derived,
            form,
            set_calls,
            changes,
            finished,
        }
    }

    /// Re-derives the schema from the store and hands it to the form.
    pub fn refresh(&mut self) -> bool {
        let schema: Arc<Schema> = self.derived.current(&self.store.borrow());
        self.form.set_form_data(schema)
    }
}
