//! Metadata methods for registered model elements.

use std::collections::BTreeMap;

use crate::model::error::ModelError;
use crate::model::Model;

impl Model {
    /// Attach metadata to a registered element.
    pub fn set_element_metadata(
        &mut self,
        name: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        if !self.is_registered(name) {
            return Err(ModelError::UnknownElement {
                name: name.to_string(),
            });
        }
        self.element_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), metadata);
        Ok(())
    }

    /// Get metadata for a registered element.
    pub fn get_element_metadata(&self, name: &str) -> Option<&serde_json::Value> {
        self.element_metadata
            .as_ref()
            .and_then(|meta| meta.get(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::error::ModelError;
    use crate::model::{Model, ModelElement, VariableSpec};
    use serde_json::json;

    #[test]
    fn metadata_round_trips_for_registered_elements() {
        let mut model = Model::new();
        let var = model
            .variable(VariableSpec::continuous())
            .expect("variable");
        model
            .register("capacity", ModelElement::Variable(var))
            .expect("register");

        model
            .set_element_metadata("capacity", json!({"unit": "MW"}))
            .expect("metadata");
        assert_eq!(
            model.get_element_metadata("capacity"),
            Some(&json!({"unit": "MW"}))
        );
    }

    #[test]
    fn metadata_requires_registration() {
        let mut model = Model::new();
        let result = model.set_element_metadata("ghost", json!(1));
        assert!(matches!(result, Err(ModelError::UnknownElement { .. })));
        assert!(model.get_element_metadata("ghost").is_none());
    }
}
