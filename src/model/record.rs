use serde::{Deserialize, Deserializer, Serialize};

/// A top-level project as returned by the schedule endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "lenient::required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub urgency: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub assign_to: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub project_manager: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub p_team: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub project_details: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subproject_details: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub parent_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub reopen_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub children: Vec<ChildRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub invoices: Vec<Invoice>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub ready_to_invoice: Vec<ReadyToInvoice>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub unpaid_invoices: Vec<UnpaidInvoice>,
}

/// A subproject nested one level under a project. Children never nest further.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    #[serde(deserialize_with = "lenient::required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub urgency: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub assign_to: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub project_manager: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub p_team: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub project_details: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subproject_details: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub parent_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub reopen_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub invoices: Vec<Invoice>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub ready_to_invoice: Vec<ReadyToInvoice>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub unpaid_invoices: Vec<UnpaidInvoice>,
}

/// An issued invoice (receivable)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default, deserialize_with = "lenient::string")]
    pub invoice_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub service_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub payment_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub comment: Option<String>,
}

/// Work completed but not yet invoiced (receivable)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadyToInvoice {
    #[serde(default, deserialize_with = "lenient::string")]
    pub invoice_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub service_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub project_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub comments: Option<String>,
}

/// A supplier invoice still to be paid (payable)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnpaidInvoice {
    #[serde(default, deserialize_with = "lenient::string")]
    pub invoice_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub comments: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub invoice_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub booked_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub received_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
}

impl ProjectRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl ChildRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Return `value` only if it holds non-blank text
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Deserializers tolerant of the loosely typed backend: ids and status codes
/// arrive as numbers from some databases, amounts as decimal strings.
mod lenient {
    use super::*;
    use serde_json::Value;

    fn value_to_string(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(value_to_string(Value::deserialize(deserializer)?))
    }

    pub fn required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        value_to_string(Value::deserialize(deserializer)?)
            .ok_or_else(|| serde::de::Error::custom("id must not be null"))
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// `null` is treated as an empty list
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}
