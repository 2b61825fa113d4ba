//! [`Doctor`] read model definition.
//!
//! [`Doctor`]: crate::domain::Doctor

pub mod directory {
    //! Doctors directory listing definitions.

    use common::define_pagination;

    use crate::domain::{doctor, user};
    #[cfg(doc)]
    use crate::domain::{Doctor, User};

    define_pagination!(Enriched, Filter);

    /// Selector of all the directory rows at once.
    ///
    /// The directory is filtered and paginated in memory, so the store is
    /// only ever asked for whole collections.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct All;

    /// Single [`Doctor`] row of the directory listing.
    #[derive(Clone, Debug)]
    pub struct Record {
        /// ID of the [`Doctor`].
        pub id: doctor::Id,

        /// Displayed name of the [`Doctor`].
        pub name: user::Name,

        /// [`doctor::Specialization`] of the [`Doctor`].
        pub specialization: doctor::Specialization,

        /// [`doctor::Location`] of the [`Doctor`].
        pub work_location: doctor::Location,

        /// ID of the [`User`] account the [`Doctor`] belongs to.
        pub user_id: user::Id,
    }

    /// Profile image of a [`User`], keyed by the [`user::Id`].
    #[derive(Clone, Debug)]
    pub struct ProfileImage {
        /// ID of the [`User`] the image belongs to.
        pub user_id: user::Id,

        /// URL of the image.
        pub image_url: user::ImageUrl,
    }

    /// [`Record`] enriched with the profile image of its [`User`].
    #[derive(Clone, Debug)]
    pub struct Enriched {
        /// The directory [`Record`] itself.
        pub record: Record,

        /// Profile image of the [`Record`]'s [`User`], if any.
        pub image_url: Option<user::ImageUrl>,
    }

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Search query matching [`Record`]s by name,
        /// case-insensitively.
        ///
        /// [`None`] and an empty string both match everything.
        pub query: Option<String>,
    }
}
