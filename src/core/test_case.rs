//! Remote test case model as returned by `GET /testcases`.
//!
//! Only the fields the checker reasons about are typed. Everything else the
//! TCM sends is kept in `extra` so a `PUT /testcases/{key}` echoes the full
//! case back without dropping data.

use clap::ValueEnum;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Platform whose automation status is tracked in a dedicated custom field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

/// Automation status of a case on one platform.
///
/// `None` is the absence of a value and travels as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AutomationStatus {
    #[default]
    None,
    Done,
    Wont,
    Deprecated,
    Duplicate,
}

impl AutomationStatus {
    /// Wire label, `None` for the empty status.
    pub fn label(self) -> Option<&'static str> {
        match self {
            AutomationStatus::None => None,
            AutomationStatus::Done => Some("Done"),
            AutomationStatus::Wont => Some("Won't"),
            AutomationStatus::Deprecated => Some("Deprecated"),
            AutomationStatus::Duplicate => Some("Duplicate"),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Done" => Some(AutomationStatus::Done),
            "Won't" | "Wont" | "Won’t" => Some(AutomationStatus::Wont),
            "Deprecated" => Some(AutomationStatus::Deprecated),
            "Duplicate" => Some(AutomationStatus::Duplicate),
            "" => Some(AutomationStatus::None),
            _ => None,
        }
    }
}

impl fmt::Display for AutomationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("None"))
    }
}

impl Serialize for AutomationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.label() {
            Some(label) => serializer.serialize_str(label),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for AutomationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw {
            None => AutomationStatus::None,
            Some(label) => AutomationStatus::from_label(&label).unwrap_or_else(|| {
                log::warn!("Unknown automation status [{}], treating as empty", label);
                AutomationStatus::None
            }),
        })
    }
}

/// Decodes an explicit `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{id, self}` reference used throughout the TCM API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSelf {
    pub id: i64,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

impl IdSelf {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            self_link: None,
        }
    }
}

/// Custom fields of a test case. Unknown fields pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFields {
    #[serde(rename = "Android Auto", default)]
    pub android_auto: AutomationStatus,
    #[serde(rename = "iOS Auto", default)]
    pub ios_auto: AutomationStatus,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl CustomFields {
    pub fn automation_status(&self, platform: Platform) -> AutomationStatus {
        match platform {
            Platform::Android => self.android_auto,
            Platform::Ios => self.ios_auto,
        }
    }

    pub fn with_automation_status(&self, platform: Platform, status: AutomationStatus) -> Self {
        let mut fields = self.clone();
        match platform {
            Platform::Android => fields.android_auto = status,
            Platform::Ios => fields.ios_auto = status,
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTestCase {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub status: IdSelf,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: CustomFields,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RemoteTestCase {
    pub fn new(id: i64, key: impl Into<String>, name: impl Into<String>, status_id: i64) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
            status: IdSelf::new(status_id),
            labels: Vec::new(),
            custom_fields: CustomFields::default(),
            extra: Map::new(),
        }
    }

    pub fn automation_status(&self, platform: Platform) -> AutomationStatus {
        self.custom_fields.automation_status(platform)
    }

    pub fn is_automated_on(&self, platform: Platform) -> bool {
        self.automation_status(platform) == AutomationStatus::Done
    }

    pub fn has_status(&self, status_id: i64) -> bool {
        self.status.id == status_id
    }

    /// Copy of this case carrying a new automation status for `platform`.
    ///
    /// The receiver is left untouched; the returned value is what gets pushed.
    #[must_use]
    pub fn with_automation_status(&self, platform: Platform, status: AutomationStatus) -> Self {
        Self {
            custom_fields: self.custom_fields.with_automation_status(platform, status),
            ..self.clone()
        }
    }
}
