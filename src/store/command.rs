//! Typed operations accepted by the state container.

use crate::domain::Entity;
use crate::domain::client::Client;
use crate::domain::product::Product;
use crate::routes::{RouteMatch, RouteParams, View};

/// Operation on the store module of one record kind.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityCommand<E: Entity> {
    LoadAll,
    LoadOne(E::Id),
    Create(E),
    Edit(E),
    Delete(E::Id),
}

/// Every operation the root container can dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Clients(EntityCommand<Client>),
    Products(EntityCommand<Product>),
    ToggleLock,
}

impl Command {
    /// Loads a view needs before it can render, in dispatch order.
    pub fn for_route(route: &RouteMatch) -> Vec<Command> {
        let mut commands = Vec::new();

        for view in std::iter::once(route.view).chain(route.modal) {
            match (view, &route.params) {
                (View::Clients, _) => commands.push(Command::Clients(EntityCommand::LoadAll)),
                (View::Products, _) => commands.push(Command::Products(EntityCommand::LoadAll)),
                (View::EditClient, RouteParams::Client(id)) => {
                    commands.push(Command::Clients(EntityCommand::LoadOne(*id)))
                }
                (View::EditProduct, RouteParams::Product(id)) => {
                    commands.push(Command::Products(EntityCommand::LoadOne(id.clone())))
                }
                _ => {}
            }
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ClientId, ProductId};
    use crate::routes::resolve;

    #[test]
    fn list_views_load_collections() {
        let route = resolve("/clients").expect("known route");
        assert_eq!(
            Command::for_route(&route),
            vec![Command::Clients(EntityCommand::LoadAll)]
        );
    }

    #[test]
    fn edit_client_loads_the_record() {
        let route = resolve("/clients/3/edit").expect("known route");
        assert_eq!(
            Command::for_route(&route),
            vec![Command::Clients(EntityCommand::LoadOne(
                ClientId::new(3).expect("valid id")
            ))]
        );
    }

    #[test]
    fn edit_product_loads_list_and_record() {
        let route = resolve("/products/p-1/edit").expect("known route");
        assert_eq!(
            Command::for_route(&route),
            vec![
                Command::Products(EntityCommand::LoadAll),
                Command::Products(EntityCommand::LoadOne(
                    ProductId::new("p-1").expect("valid id")
                )),
            ]
        );
    }

    #[test]
    fn create_views_need_no_loads() {
        let route = resolve("/products/create").expect("known route");
        assert!(Command::for_route(&route).is_empty());
    }
}
