use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::{Value, json};
use vizdeck_core::{Feedback, GraphicRecord, GraphicTypeRecord, User, UserAttribute};

use crate::error::{Error, Result};
use crate::{GraphicsApi, NewUser};

#[derive(Debug, Default)]
struct State {
    graphics: Vec<GraphicRecord>,
    graphic_types: Vec<GraphicTypeRecord>,
    users: Vec<User>,
    feedback: Vec<Feedback>,
    next_feedback_id: u64,
}

/// In-memory [`GraphicsApi`] for tests and local tooling. Same semantics as
/// the HTTP client minus the network: updates deep-merge PATCH bodies, lookups
/// miss with [`Error::NotFound`].
#[derive(Debug, Default)]
pub struct MemoryClient {
    state: RwLock<State>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a graphic type, the way a deployment would have provisioned it.
    pub fn insert_graphic_type(&self, graphic_type: GraphicTypeRecord) {
        self.write().graphic_types.push(graphic_type);
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(kind: &str, id: &str) -> Error {
    Error::NotFound {
        resource: format!("{kind} {id}"),
    }
}

#[async_trait]
impl GraphicsApi for MemoryClient {
    async fn graphics(&self, graphic_type_id: &str) -> Result<Vec<GraphicRecord>> {
        Ok(self
            .read()
            .graphics
            .iter()
            .filter(|graphic| graphic.graphic_type_id() == Some(graphic_type_id))
            .cloned()
            .collect())
    }

    async fn graphic(&self, graphic_id: &str) -> Result<GraphicRecord> {
        self.read()
            .graphics
            .iter()
            .find(|graphic| graphic.graphic_id() == Some(graphic_id))
            .cloned()
            .ok_or_else(|| not_found("graphic", graphic_id))
    }

    async fn create_graphic(&self, graphic: &GraphicRecord) -> Result<()> {
        let Some(graphic_id) = graphic.graphic_id() else {
            return Err(Error::Api {
                message: "graphic is missing a graphicId".to_string(),
            });
        };
        let mut state = self.write();
        if state
            .graphics
            .iter()
            .any(|existing| existing.graphic_id() == Some(graphic_id))
        {
            return Err(Error::Api {
                message: format!("graphic {graphic_id} already exists"),
            });
        }
        state.graphics.push(graphic.clone());
        Ok(())
    }

    async fn update_graphic(&self, graphic_id: &str, body: &Value) -> Result<()> {
        let mut state = self.write();
        let graphic = state
            .graphics
            .iter_mut()
            .find(|graphic| graphic.graphic_id() == Some(graphic_id))
            .ok_or_else(|| not_found("graphic", graphic_id))?;
        graphic.record_mut().deep_merge(body);
        Ok(())
    }

    async fn delete_graphic(&self, graphic_id: &str) -> Result<()> {
        let mut state = self.write();
        let before = state.graphics.len();
        state
            .graphics
            .retain(|graphic| graphic.graphic_id() != Some(graphic_id));
        if state.graphics.len() == before {
            return Err(not_found("graphic", graphic_id));
        }
        Ok(())
    }

    async fn duplicate_graphic(
        &self,
        source_graphic_id: &str,
        new_graphic_id: &str,
        new_graphic_name: &str,
    ) -> Result<()> {
        let mut state = self.write();
        let mut copy = state
            .graphics
            .iter()
            .find(|graphic| graphic.graphic_id() == Some(source_graphic_id))
            .cloned()
            .ok_or_else(|| not_found("graphic", source_graphic_id))?;
        copy.record_mut().set_value("graphicId", json!(new_graphic_id));
        copy.record_mut()
            .set_value("graphicName", json!(new_graphic_name));
        state.graphics.push(copy);
        Ok(())
    }

    async fn graphic_types(&self) -> Result<Vec<GraphicTypeRecord>> {
        Ok(self.read().graphic_types.clone())
    }

    async fn graphic_type(&self, graphic_type_id: &str) -> Result<GraphicTypeRecord> {
        self.read()
            .graphic_types
            .iter()
            .find(|graphic_type| graphic_type.graphic_type_id() == Some(graphic_type_id))
            .cloned()
            .ok_or_else(|| not_found("graphic type", graphic_type_id))
    }

    async fn save_graphic_type(
        &self,
        graphic_type_id: &str,
        graphic_type_name: Option<&str>,
    ) -> Result<()> {
        let mut state = self.write();
        match state
            .graphic_types
            .iter_mut()
            .find(|graphic_type| graphic_type.graphic_type_id() == Some(graphic_type_id))
        {
            Some(existing) => {
                if let Some(name) = graphic_type_name {
                    existing.record_mut().set_value("graphicTypeName", json!(name));
                }
            }
            None => {
                state.graphic_types.push(GraphicTypeRecord::from_value(json!({
                    "graphicTypeId": graphic_type_id,
                    "graphicTypeName": graphic_type_name,
                })));
            }
        }
        Ok(())
    }

    async fn update_graphic_type(&self, graphic_type_id: &str, body: &Value) -> Result<()> {
        let mut state = self.write();
        let graphic_type = state
            .graphic_types
            .iter_mut()
            .find(|graphic_type| graphic_type.graphic_type_id() == Some(graphic_type_id))
            .ok_or_else(|| not_found("graphic type", graphic_type_id))?;
        graphic_type.record_mut().deep_merge(body);
        Ok(())
    }

    async fn delete_graphic_type(&self, graphic_type_id: &str) -> Result<()> {
        let mut state = self.write();
        let before = state.graphic_types.len();
        state
            .graphic_types
            .retain(|graphic_type| graphic_type.graphic_type_id() != Some(graphic_type_id));
        if state.graphic_types.len() == before {
            return Err(not_found("graphic type", graphic_type_id));
        }
        Ok(())
    }

    async fn users(&self) -> Result<Vec<User>> {
        Ok(self.read().users.clone())
    }

    async fn add_user(&self, request: &NewUser) -> Result<()> {
        let mut state = self.write();
        let username = request
            .user_attributes
            .get("email")
            .cloned()
            .unwrap_or_else(|| format!("user-{}", state.users.len() + 1));
        let attributes = request
            .user_attributes
            .iter()
            .map(|(name, value)| UserAttribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        state.users.push(User {
            username,
            attributes,
            enabled: true,
            status: Some("CONFIRMED".to_string()),
            created: None,
            modified: None,
            group: Some(request.group),
            editor_access: Vec::new(),
            graphics_access: Vec::new(),
        });
        Ok(())
    }

    async fn update_user(&self, updates: &Value) -> Result<()> {
        let Some(username) = updates.get("Username").and_then(Value::as_str) else {
            return Err(Error::Api {
                message: "user update is missing a Username".to_string(),
            });
        };
        let mut state = self.write();
        let user = state
            .users
            .iter_mut()
            .find(|user| user.username == username)
            .ok_or_else(|| not_found("user", username))?;
        if let Some(group) = updates.get("group") {
            user.group = serde_json::from_value(group.clone())?;
        }
        if let Some(attributes) = updates.get("userAttributes").and_then(Value::as_object) {
            for (name, value) in attributes {
                let value = value.as_str().unwrap_or_default().to_string();
                match user.attributes.iter_mut().find(|a| &a.name == name) {
                    Some(attribute) => attribute.value = value,
                    None => user.attributes.push(UserAttribute {
                        name: name.clone(),
                        value,
                    }),
                }
            }
        }
        Ok(())
    }

    async fn delete_user(&self, email: &str) -> Result<()> {
        let mut state = self.write();
        let before = state.users.len();
        state
            .users
            .retain(|user| user.attribute("email") != Some(email));
        if state.users.len() == before {
            return Err(not_found("user", email));
        }
        Ok(())
    }

    async fn feedback(&self) -> Result<Vec<Feedback>> {
        Ok(self.read().feedback.clone())
    }

    async fn post_feedback(&self, feedback: &Feedback) -> Result<()> {
        let mut state = self.write();
        let mut feedback = feedback.clone();
        if feedback.feedback_id.is_none() {
            state.next_feedback_id += 1;
            feedback.feedback_id = Some(format!("feedback-{}", state.next_feedback_id));
        }
        state.feedback.push(feedback);
        Ok(())
    }

    async fn delete_feedback(&self, feedback_id: &str) -> Result<()> {
        let mut state = self.write();
        let before = state.feedback.len();
        state
            .feedback
            .retain(|feedback| feedback.feedback_id.as_deref() != Some(feedback_id));
        if state.feedback.len() == before {
            return Err(not_found("feedback", feedback_id));
        }
        Ok(())
    }
}
