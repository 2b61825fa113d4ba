//! [`Query`] collection related to a single [`Doctor`].

use common::operations::By;

use crate::domain::{doctor, user, Doctor};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Doctor`] by its [`doctor::Id`].
pub type ById = DatabaseQuery<By<Option<Doctor>, doctor::Id>>;

/// Queries a [`Doctor`] by the [`user::Id`] of its owning account.
pub type ByUserId = DatabaseQuery<By<Option<Doctor>, user::Id>>;
