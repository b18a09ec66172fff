use serde::{Deserialize, Serialize};

use crate::domain::types::ClientId;
use crate::domain::{Entity, EntityKind};

/// Client record as exchanged with the remote service.
///
/// `Client::default()` is the blank record bound to the create form: every
/// text field empty and no identifier until the service assigns one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ClientId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// Date of birth, kept in the service's string encoding (`YYYY-MM-DD`).
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
}

impl Client {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        birthday: String,
        city: String,
        zip: String,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            birthday: birthday.trim().to_string(),
            city: city.trim().to_string(),
            zip: zip.trim().to_string(),
        }
    }

    /// Returns the record with the provided identifier attached.
    #[must_use]
    pub fn with_id(mut self, id: ClientId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Entity for Client {
    type Id = ClientId;

    const KIND: EntityKind = EntityKind::Clients;

    fn id(&self) -> Option<&ClientId> {
        self.id.as_ref()
    }

    fn take_id(&mut self) -> Option<ClientId> {
        self.id.take()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_client_is_blank() {
        let client = Client::default();
        assert!(client.id.is_none());
        assert_eq!(
            serde_json::to_value(&client).expect("serializable"),
            json!({
                "firstName": "",
                "lastName": "",
                "email": "",
                "birthday": "",
                "city": "",
                "zip": "",
            })
        );
    }

    #[test]
    fn deserializes_service_payload() {
        let client: Client = serde_json::from_value(json!({
            "id": 1,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "birthday": "1815-12-10",
            "city": "London",
            "zip": "W1",
        }))
        .expect("valid payload");

        assert_eq!(client.id.map(ClientId::get), Some(1));
        assert_eq!(client.first_name, "Ada");
        assert_eq!(client.zip, "W1");
    }

    #[test]
    fn missing_fields_fall_back_to_empty_strings() {
        let client: Client = serde_json::from_value(json!({ "id": 3, "firstName": "A" }))
            .expect("valid payload");
        assert_eq!(client.last_name, "");
        assert_eq!(client.city, "");
    }

    #[test]
    fn new_normalizes_input() {
        let client = Client::new(
            " Ada ".into(),
            "Lovelace ".into(),
            " ADA@Example.com".into(),
            "1815-12-10".into(),
            "London".into(),
            " W1 ".into(),
        );
        assert_eq!(client.first_name, "Ada");
        assert_eq!(client.email, "ada@example.com");
        assert_eq!(client.zip, "W1");
        assert!(client.id.is_none());
    }
}
