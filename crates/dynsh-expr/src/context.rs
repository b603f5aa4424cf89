//! Placeholder allocation for one translated command.

use dynsh_model::AttributeValue;
use dynsh_model::input::{ExpressionAttributeNames, ExpressionAttributeValues};
use tracing::trace;

/// Owns the name and value side-tables for one command.
///
/// Every allocation gets a fresh placeholder, even for a name or value that
/// was already seen: `pk` used in the key condition and again in the
/// projection maps to two different `#` placeholders. The `#` and `:`
/// counters are independent and only ever grow.
#[derive(Debug, Default)]
pub struct ExpressionContext {
    names: ExpressionAttributeNames,
    values: ExpressionAttributeValues,
    name_counter: usize,
    value_counter: usize,
}

impl ExpressionContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next `#n` placeholder for `name`.
    pub fn add_name(&mut self, name: impl Into<String>) -> String {
        let placeholder = format!("#{}", self.name_counter);
        self.name_counter += 1;
        let name = name.into();
        trace!(%placeholder, %name, "allocated name placeholder");
        self.names.insert(placeholder.clone(), name);
        placeholder
    }

    /// Allocate the next `:n` placeholder for `value`.
    pub fn add_value(&mut self, value: AttributeValue) -> String {
        let placeholder = format!(":{}", self.value_counter);
        self.value_counter += 1;
        trace!(%placeholder, %value, "allocated value placeholder");
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    /// The name table, or `None` if no name has been allocated.
    #[must_use]
    pub fn names(&self) -> Option<&ExpressionAttributeNames> {
        (!self.names.is_empty()).then_some(&self.names)
    }

    /// The value table, or `None` if no value has been allocated.
    #[must_use]
    pub fn values(&self) -> Option<&ExpressionAttributeValues> {
        (!self.values.is_empty()).then_some(&self.values)
    }

    /// Consume the context, yielding the name and value tables.
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        Option<ExpressionAttributeNames>,
        Option<ExpressionAttributeValues>,
    ) {
        let names = (!self.names.is_empty()).then_some(self.names);
        let values = (!self.values.is_empty()).then_some(self.values);
        (names, values)
    }
}
