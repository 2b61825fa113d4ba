//! [`Doctor`] definitions.

use common::define_kind;
#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Doctor listed in the directory.
#[derive(Clone, Debug, From)]
pub struct Doctor {
    /// ID of this [`Doctor`].
    pub id: Id,

    /// Displayed name of this [`Doctor`].
    ///
    /// Denormalized copy of the owning [`User`]'s name, kept in sync on
    /// renames.
    pub name: user::Name,

    /// [`Specialization`] of this [`Doctor`].
    pub specialization: Specialization,

    /// [`Location`] where this [`Doctor`] receives patients.
    pub work_location: Location,

    /// ID of the [`User`] account this [`Doctor`] belongs to.
    pub user_id: user::Id,

    /// Registration [`Code`] of this [`Doctor`].
    pub code: Code,

    /// [`DateTime`] when this [`Doctor`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Doctor`].
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

define_kind! {
    #[doc = "Medical specialization of a [`Doctor`]."]
    enum Specialization {
        #[doc = "Cardiology."]
        Cardiology = 1,

        #[doc = "Dermatology."]
        Dermatology = 2,

        #[doc = "Neurology."]
        Neurology = 3,

        #[doc = "Pediatrics."]
        Pediatrics = 4,

        #[doc = "Psychiatry."]
        Psychiatry = 5,

        #[doc = "Radiology."]
        Radiology = 6,

        #[doc = "Surgery."]
        Surgery = 7,

        #[doc = "Urology."]
        Urology = 8,
    }
}

/// Work location of a [`Doctor`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `location` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// Registration code of a [`Doctor`].
///
/// 8 uppercase alphanumeric characters, issued once on signup.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Code(String);

impl Code {
    /// Length of a [`Code`], in characters.
    const LENGTH: usize = 8;

    /// Generates a new random [`Code`].
    #[must_use]
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string().to_uppercase();
        Self(hex[..Self::LENGTH].to_owned())
    }

    /// Creates a new [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Code`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        code.len() == Self::LENGTH
            && code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Code`")
    }
}

/// [`DateTime`] when a [`Doctor`] was created.
pub type CreationDateTime = DateTimeOf<(Doctor, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Code;

    #[test]
    fn generated_code_is_8_uppercase_alphanumerics() {
        for _ in 0..64 {
            let code = Code::generate();
            assert!(
                Code::new(AsRef::<str>::as_ref(&code).to_owned()).is_some(),
                "malformed code: {code}",
            );
        }
    }

    #[test]
    fn code_rejects_wrong_shapes() {
        assert!(Code::new("ABC123").is_none());
        assert!(Code::new("abcd1234").is_none());
        assert!(Code::new("ABCD 234").is_none());
        assert!(Code::new("ABCD1234").is_some());
    }
}
