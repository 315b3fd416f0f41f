use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Order request exactly as a customer submitted it.
///
/// Every field is raw text; validation happens in the builder. Item quantities
/// are keyed by product id and may contain blanks or junk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderForm {
    pub customer_email: String,
    pub address: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub fragility: String,
    #[serde(default)]
    pub policy: String,
    #[serde(default)]
    pub items: BTreeMap<String, String>,
}

impl OrderForm {
    /// Product id to quantity, keeping only numeric entries with a positive quantity.
    pub fn requested_items(&self) -> BTreeMap<i64, i64> {
        self.items
            .iter()
            .filter_map(|(id, qty)| {
                let id = id.trim().parse::<i64>().ok()?;
                let qty = qty.trim().parse::<i64>().ok()?;
                (qty > 0).then_some((id, qty))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_items_drops_junk() {
        let mut form = OrderForm::default();
        form.items.insert("1".into(), "2".into());
        form.items.insert("2".into(), "0".into());
        form.items.insert("3".into(), "-4".into());
        form.items.insert("4".into(), "".into());
        form.items.insert("x".into(), "1".into());
        form.items.insert(" 5 ".into(), " 3 ".into());

        let requested = form.requested_items();
        assert_eq!(requested.len(), 2);
        assert_eq!(requested[&1], 2);
        assert_eq!(requested[&5], 3);
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let form: OrderForm =
            serde_json::from_str(r#"{"customer_email":"a@b.com","address":"Calle 1"}"#).unwrap();
        assert!(form.priority.is_empty());
        assert!(form.requested_items().is_empty());
    }
}
