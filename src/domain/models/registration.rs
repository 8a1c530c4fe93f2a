use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registration attributes exactly as the client sent them.
///
/// Every field is kept loosely typed so that a wrong type becomes a field
/// error from validation instead of a rejected request body. Unknown keys
/// are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub surname: Option<Value>,
    pub name: Option<Value>,
    pub patronymic: Option<Value>,
    pub email: Option<Value>,
    pub age: Option<Value>,
    pub nationality: Option<Value>,
    pub country: Option<Value>,
    pub gender: Option<Value>,
    pub interests: Option<Value>,
    pub skills: Option<Value>,
}
