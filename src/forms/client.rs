use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::forms::FormError;

/// Date format used by the service for `birthday`.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for creating or editing a client.
pub struct ClientForm {
    /// Present only when editing an existing client.
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_birthday"))]
    pub birthday: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
}

/// Accepts an empty birthday or a calendar date in [`BIRTHDAY_FORMAT`].
fn validate_birthday(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || NaiveDate::parse_from_str(value, BIRTHDAY_FORMAT).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("birthday"))
    }
}

impl TryFrom<ClientForm> for Client {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = form
            .id
            .map(ClientId::new)
            .transpose()
            .map_err(|_| FormError::InvalidClientId)?;

        let client = Client::new(
            form.first_name,
            form.last_name,
            form.email,
            form.birthday,
            form.city,
            form.zip,
        );

        Ok(Client { id, ..client })
    }
}

impl From<&Client> for ClientForm {
    /// Pre-fills the edit form from the staged current record.
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.map(ClientId::get),
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            email: client.email.clone(),
            birthday: client.birthday.clone(),
            city: client.city.clone(),
            zip: client.zip.clone(),
        }
    }
}
