//! Request dispatch.
//!
//! Every command and query type implements [`Request`] and has exactly one
//! [`RequestHandler`]. The [`Dispatcher`] owns those handlers and resolves the
//! one matching a request type at compile time through [`Dispatch`].

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::commands::{
    CreateUserCommand, CreateUserCommandHandler, DeleteUserCommand, DeleteUserCommandHandler,
    UpdateUserCommand, UpdateUserCommandHandler,
};
use crate::database::ConnectionFactory;
use crate::errors::ApiError;
use crate::queries::{
    GetAllUsersQuery, GetAllUsersQueryHandler, GetUserByIdQuery, GetUserByIdQueryHandler,
    SearchUsersByEmailQuery, SearchUsersByEmailQueryHandler,
};

/// A command or query and the type its handler produces.
pub trait Request: Send + 'static {
    type Response: Send;
}

#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> Result<R::Response, ApiError>;
}

/// Resolves the handler registered for `R`.
pub trait Dispatch<R: Request> {
    fn handler(&self) -> &dyn RequestHandler<R>;
}

pub struct Dispatcher {
    create_user: CreateUserCommandHandler,
    update_user: UpdateUserCommandHandler,
    delete_user: DeleteUserCommandHandler,
    get_all_users: GetAllUsersQueryHandler,
    get_user_by_id: GetUserByIdQueryHandler,
    search_users_by_email: SearchUsersByEmailQueryHandler,
}

impl Dispatcher {
    pub fn new(connections: Arc<dyn ConnectionFactory>) -> Self {
        Self {
            create_user: CreateUserCommandHandler::new(Arc::clone(&connections)),
            update_user: UpdateUserCommandHandler::new(Arc::clone(&connections)),
            delete_user: DeleteUserCommandHandler::new(Arc::clone(&connections)),
            get_all_users: GetAllUsersQueryHandler::new(Arc::clone(&connections)),
            get_user_by_id: GetUserByIdQueryHandler::new(Arc::clone(&connections)),
            search_users_by_email: SearchUsersByEmailQueryHandler::new(connections),
        }
    }

    /// Run `request` through its handler and return the handler's result.
    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: Request,
        Self: Dispatch<R>,
    {
        debug!("Dispatching {}", std::any::type_name::<R>());
        <Self as Dispatch<R>>::handler(self).handle(request).await
    }
}

macro_rules! dispatch_to {
    ($($request:ty => $field:ident),* $(,)?) => {
        $(
            impl Dispatch<$request> for Dispatcher {
                fn handler(&self) -> &dyn RequestHandler<$request> {
                    &self.$field
                }
            }
        )*
    };
}

dispatch_to! {
    CreateUserCommand => create_user,
    UpdateUserCommand => update_user,
    DeleteUserCommand => delete_user,
    GetAllUsersQuery => get_all_users,
    GetUserByIdQuery => get_user_by_id,
    SearchUsersByEmailQuery => search_users_by_email,
}
