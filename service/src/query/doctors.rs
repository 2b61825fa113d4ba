//! [`Query`] collection related to multiple [`Doctor`]s.
//!
//! [`Doctor`]: crate::domain::Doctor

use common::operations::By;

use crate::read::doctor::directory;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the whole doctors collection as directory [`directory::Record`]s.
pub type All = DatabaseQuery<By<Vec<directory::Record>, directory::All>>;
