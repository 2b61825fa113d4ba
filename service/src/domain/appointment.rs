//! [`AppointmentRequest`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Doctor;
use crate::domain::{doctor, user};

/// Request of an appointment with a [`Doctor`].
#[derive(Clone, Debug, From)]
pub struct AppointmentRequest {
    /// ID of this [`AppointmentRequest`].
    pub id: Id,

    /// ID of the [`Doctor`] the appointment is requested with.
    pub doctor_id: doctor::Id,

    /// [`DateTime`] the appointment is requested on.
    pub requested_on: RequestDateTime,

    /// Free-form [`Notes`] for the [`Doctor`].
    pub notes: Option<Notes>,

    /// Name of the requesting patient.
    pub patient_name: user::Name,

    /// Email of the requesting patient.
    pub patient_email: user::Email,

    /// Phone of the requesting patient.
    pub patient_phone: user::Phone,

    /// Whether the patient confirmed the request details.
    ///
    /// Always `true` for persisted requests.
    pub confirmed: bool,

    /// [`DateTime`] when this [`AppointmentRequest`] was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`AppointmentRequest`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Free-form notes of an [`AppointmentRequest`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Notes(String);

impl Notes {
    /// Creates a new [`Notes`] if the given `notes` value is valid.
    #[must_use]
    pub fn new(notes: impl Into<String>) -> Option<Self> {
        let notes = notes.into();
        Self::check(&notes).then_some(Self(notes))
    }

    /// Checks whether the given `notes` value is valid [`Notes`].
    fn check(notes: impl AsRef<str>) -> bool {
        let notes = notes.as_ref();
        !notes.is_empty() && notes.len() <= 2048
    }
}

impl FromStr for Notes {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Notes`")
    }
}

/// [`DateTime`] an appointment is requested on.
pub type RequestDateTime = DateTimeOf<(AppointmentRequest, unit::Request)>;

/// [`DateTime`] when an [`AppointmentRequest`] was created.
pub type CreationDateTime = DateTimeOf<(AppointmentRequest, unit::Creation)>;
