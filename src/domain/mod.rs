//! Record types managed against the remote service.

use std::fmt::{Debug, Display, Formatter};

use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod client;
pub mod product;
pub mod types;

/// The two record kinds the application manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Clients,
    Products,
}

impl EntityKind {
    /// Collection name used both as the resource path and the state key.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Clients => "clients",
            EntityKind::Products => "products",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record synchronized with a REST collection.
///
/// `Default` must produce the blank, identifier-less record used to reset
/// the current record after a successful write.
pub trait Entity: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned {
    /// Service-assigned identifier placed in `{base}/{id}` request paths.
    type Id: Clone + Debug + Display + PartialEq;

    const KIND: EntityKind;

    fn id(&self) -> Option<&Self::Id>;

    /// Removes and returns the identifier, leaving a record fit for creation.
    fn take_id(&mut self) -> Option<Self::Id>;
}
