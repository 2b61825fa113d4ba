//! GraphQL API definitions.

pub mod appointment;
pub mod doctor;
mod mutation;
mod query;
pub mod scalar;
mod subscription;
pub mod user;

use crate::define_error;

pub use self::{
    appointment::Appointment,
    doctor::Doctor,
    mutation::Mutation,
    query::Query,
    subscription::Subscription,
    user::User,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum PrivilegeError {
        #[code = "NOT_A_DOCTOR"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must be a doctor"]
        Doctor,
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION"]
        #[status = BAD_REQUEST]
        #[message = "Invalid pagination arguments"]
        Invalid,
    }
}
