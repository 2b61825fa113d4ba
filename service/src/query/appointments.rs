//! [`Query`] collection related to [`AppointmentRequest`]s.
//!
//! [`AppointmentRequest`]: crate::domain::AppointmentRequest

use common::operations::By;

use crate::domain::{doctor, AppointmentRequest};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`AppointmentRequest`]s addressed to the [`Doctor`] with
/// the provided [`doctor::Id`].
///
/// [`Doctor`]: crate::domain::Doctor
pub type ByDoctorId =
    DatabaseQuery<By<Vec<AppointmentRequest>, doctor::Id>>;
