//! Path-to-view table for the list, create and edit screens.
//!
//! Editing a product opens as a modal over the product list, so a match
//! carries two view slots.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::Serialize;

use crate::domain::types::{ClientId, ProductId};

/// Screens the application can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Clients,
    CreateClient,
    EditClient,
    Products,
    CreateProduct,
    EditProduct,
}

/// Route names, as used for named navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteName {
    EditProduct,
    CreateProduct,
    Products,
    EditClient,
    CreateClient,
    Clients,
}

impl RouteName {
    pub const fn as_str(self) -> &'static str {
        match self {
            RouteName::EditProduct => "editProduct",
            RouteName::CreateProduct => "createProduct",
            RouteName::Products => "products",
            RouteName::EditClient => "editClient",
            RouteName::CreateClient => "createClient",
            RouteName::Clients => "clients",
        }
    }
}

impl Display for RouteName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `:id` parameter, typed by the record kind it addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteParams {
    None,
    Client(ClientId),
    Product(ProductId),
}

/// Result of resolving a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    /// Path after following redirects.
    pub path: String,
    /// View shown in the main slot.
    pub view: View,
    /// View shown in the modal slot, if any.
    pub modal: Option<View>,
    pub params: RouteParams,
}

#[derive(Clone, Copy)]
enum IdKind {
    None,
    Client,
    Product,
}

struct RouteDef {
    pattern: &'static str,
    name: RouteName,
    view: View,
    modal: Option<View>,
    id: IdKind,
}

const ROUTES: &[RouteDef] = &[
    RouteDef {
        pattern: "/products/:id/edit",
        name: RouteName::EditProduct,
        view: View::Products,
        modal: Some(View::EditProduct),
        id: IdKind::Product,
    },
    RouteDef {
        pattern: "/products/create",
        name: RouteName::CreateProduct,
        view: View::CreateProduct,
        modal: None,
        id: IdKind::None,
    },
    RouteDef {
        pattern: "/products",
        name: RouteName::Products,
        view: View::Products,
        modal: None,
        id: IdKind::None,
    },
    RouteDef {
        pattern: "/clients/:id/edit",
        name: RouteName::EditClient,
        view: View::EditClient,
        modal: None,
        id: IdKind::Client,
    },
    RouteDef {
        pattern: "/clients/create",
        name: RouteName::CreateClient,
        view: View::CreateClient,
        modal: None,
        id: IdKind::None,
    },
    RouteDef {
        pattern: "/clients",
        name: RouteName::Clients,
        view: View::Clients,
        modal: None,
        id: IdKind::None,
    },
];

const REDIRECTS: &[(&str, &str)] = &[("/", "/clients")];

/// Characters escaped when an identifier is placed into one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn decode_segment(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

/// Strips query, fragment and trailing slashes.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Matches `path` against `pattern`, returning the `:id` segment if any.
fn match_pattern<'a>(pattern: &str, path: &'a str) -> Option<Option<&'a str>> {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    let mut id = None;

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(id),
            (Some(":id"), Some(segment)) if !segment.is_empty() => id = Some(segment),
            (Some(expected), Some(segment)) if expected == segment => {}
            _ => return None,
        }
    }
}

/// Resolves `path` to the views it shows, following redirects.
///
/// The `:id` segment is percent-decoded before parsing. Returns `None` for
/// unknown paths and for identifiers that do not parse as the record kind's
/// id type.
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let mut path = normalize(path);
    if let Some((_, target)) = REDIRECTS.iter().find(|(from, _)| *from == path) {
        path = *target;
    }

    ROUTES.iter().find_map(|route| {
        let id = match_pattern(route.pattern, path)?;
        let params = match (route.id, id) {
            (IdKind::None, _) => RouteParams::None,
            (IdKind::Client, Some(raw)) => {
                RouteParams::Client(decode_segment(raw)?.parse().ok()?)
            }
            (IdKind::Product, Some(raw)) => {
                RouteParams::Product(decode_segment(raw)?.parse().ok()?)
            }
            (_, None) => return None,
        };

        Some(RouteMatch {
            name: route.name,
            path: path.to_string(),
            view: route.view,
            modal: route.modal,
            params,
        })
    })
}

/// Builds the path for a named route; edit routes need `id`, which is
/// percent-encoded as a single segment.
pub fn path_for(name: RouteName, id: Option<&str>) -> Option<String> {
    let route = ROUTES.iter().find(|route| route.name == name)?;
    match (route.id, id) {
        (IdKind::None, _) => Some(route.pattern.to_string()),
        (_, Some(id)) => {
            let segment = utf8_percent_encode(id, SEGMENT).to_string();
            Some(route.pattern.replace(":id", &segment))
        }
        (_, None) => None,
    }
}
