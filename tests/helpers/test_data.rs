// Test Data Factory
//
// Request payloads for the HTTP tests.

use serde_json::{json, Value};
use uuid::Uuid;

pub struct TestDataFactory;

impl TestDataFactory {
    /// Coworker payload with a unique e-mail address
    pub fn coworker_payload(name: &str) -> Value {
        json!({
            "name": name,
            "email": format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4().simple()),
            "role": "Engineer"
        })
    }

    /// Contract payload with an initial value
    pub fn contract_payload(title: &str, initial_value: &str) -> Value {
        json!({
            "title": title,
            "description": "Fixed-price delivery",
            "initial_value": initial_value
        })
    }

    /// Contract payload assigned to a coworker
    pub fn assigned_contract_payload(title: &str, coworker_id: &str, initial_value: &str) -> Value {
        json!({
            "title": title,
            "coworker_id": coworker_id,
            "status": "Active",
            "initial_value": initial_value
        })
    }
}
