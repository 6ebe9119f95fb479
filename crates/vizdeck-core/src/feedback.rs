use serde::{Deserialize, Serialize};

/// User-submitted feedback on a graphic. The code slots carry the editor
/// contents at submission time so a reviewer can reproduce what the reporter
/// saw.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<String>,
    pub feedback_type: String,
    pub feedback_message: String,
    pub message: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphic_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphic_version_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css0: Option<String>,
}
