//! [`Query`] collection related to multiple [`User`]s.
//!
//! [`User`]: crate::domain::User

use common::operations::By;

use crate::read::doctor::directory;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the [`directory::ProfileImage`]s of all the [`User`]s having
/// one.
///
/// [`User`]: crate::domain::User
pub type ProfileImages =
    DatabaseQuery<By<Vec<directory::ProfileImage>, directory::All>>;
