//! [`Doctor`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, Query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A doctor listed in the directory.
#[derive(Clone, Debug, From)]
pub struct Doctor {
    /// ID of this [`Doctor`].
    pub id: Id,

    /// [`domain::Doctor`] representing this [`Doctor`].
    doctor: OnceCell<domain::Doctor>,
}

impl From<domain::Doctor> for Doctor {
    fn from(doctor: domain::Doctor) -> Self {
        Self {
            id: doctor.id.into(),
            doctor: OnceCell::new_with(Some(doctor)),
        }
    }
}

impl Doctor {
    /// Creates a new [`Doctor`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Doctor`] with the provided ID exists,
    /// otherwise accessing this [`Doctor`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            doctor: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Doctor`] representing this [`Doctor`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Doctor`] doesn't exist.
    async fn doctor(&self, ctx: &Context) -> Result<&domain::Doctor, Error> {
        let id = self.id.into();
        self.doctor
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::doctor::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|d| {
                        future::ready(d.ok_or_else(|| {
                            api::query::DoctorError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A doctor listed in the directory.
#[graphql_object(context = Context)]
impl Doctor {
    /// Unique identifier of this `Doctor`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Doctor.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Displayed name of this `Doctor`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Doctor.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<api::user::Name, Error> {
        Ok(self.doctor(ctx).await?.name.clone().into())
    }

    /// Medical specialization of this `Doctor`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Doctor.specialization",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn specialization(
        &self,
        ctx: &Context,
    ) -> Result<Specialization, Error> {
        Ok(self.doctor(ctx).await?.specialization.into())
    }

    /// Location where this `Doctor` receives patients.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Doctor.workLocation",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn work_location(&self, ctx: &Context) -> Result<Location, Error> {
        Ok(self.doctor(ctx).await?.work_location.clone().into())
    }

    /// Registration code of this `Doctor`.
    ///
    /// Visible to the owning `User` only.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Doctor.code",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn code(&self, ctx: &Context) -> Result<Option<Code>, Error> {
        let my_id = ctx.try_current_session().await?.map(|s| s.user_id);

        let doctor = self.doctor(ctx).await?;
        Ok((Some(api::user::Id::from(doctor.user_id)) == my_id)
            .then(|| doctor.code.clone().into()))
    }

    /// `User` account this `Doctor` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Doctor.user",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn user(&self, ctx: &Context) -> Result<api::User, Error> {
        let user_id = self.doctor(ctx).await?.user_id;
        #[expect(
            unsafe_code,
            reason = "`Doctor` loaded from repository guarantees `User` \
                      existence"
        )]
        Ok(unsafe { api::User::new_unchecked(user_id) })
    }

    /// `DateTime` when this `Doctor` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Doctor.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.doctor(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Doctor`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::doctor::Id)]
#[into(domain::doctor::Id)]
#[graphql(name = "DoctorId", transparent)]
pub struct Id(Uuid);

/// Medical specialization of a `Doctor`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "DoctorSpecialization")]
pub enum Specialization {
    /// Cardiology.
    Cardiology,

    /// Dermatology.
    Dermatology,

    /// Neurology.
    Neurology,

    /// Pediatrics.
    Pediatrics,

    /// Psychiatry.
    Psychiatry,

    /// Radiology.
    Radiology,

    /// Surgery.
    Surgery,

    /// Urology.
    Urology,
}

impl From<domain::doctor::Specialization> for Specialization {
    fn from(spec: domain::doctor::Specialization) -> Self {
        use domain::doctor::Specialization as S;

        match spec {
            S::Cardiology => Self::Cardiology,
            S::Dermatology => Self::Dermatology,
            S::Neurology => Self::Neurology,
            S::Pediatrics => Self::Pediatrics,
            S::Psychiatry => Self::Psychiatry,
            S::Radiology => Self::Radiology,
            S::Surgery => Self::Surgery,
            S::Urology => Self::Urology,
        }
    }
}

impl From<Specialization> for domain::doctor::Specialization {
    fn from(spec: Specialization) -> Self {
        use Specialization as S;

        match spec {
            S::Cardiology => Self::Cardiology,
            S::Dermatology => Self::Dermatology,
            S::Neurology => Self::Neurology,
            S::Pediatrics => Self::Pediatrics,
            S::Psychiatry => Self::Psychiatry,
            S::Radiology => Self::Radiology,
            S::Surgery => Self::Surgery,
            S::Urology => Self::Urology,
        }
    }
}

/// Work location of a `Doctor`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DoctorLocation",
    with = scalar::Via::<domain::doctor::Location>,
)]
pub struct Location(domain::doctor::Location);

/// Registration code of a `Doctor`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DoctorCode",
    with = scalar::Via::<domain::doctor::Code>,
)]
pub struct Code(domain::doctor::Code);

pub mod directory {
    //! Definitions related to the doctors directory listing.

    use common::pagination;
    use juniper::{graphql_object, GraphQLObject};
    use service::{directory, read};

    use crate::{api, Context, Error};

    use super::{Id, Specialization};

    /// Page of the doctors directory.
    #[derive(Clone, Debug)]
    pub struct Page {
        /// Underlying directory [`read::doctor::directory::Page`].
        page: read::doctor::directory::Page,

        /// Search query the page was narrowed by.
        query: Option<String>,
    }

    impl Page {
        /// Creates a new [`Page`] from the provided directory page and the
        /// search query it was narrowed by.
        #[must_use]
        pub fn new(
            page: read::doctor::directory::Page,
            query: Option<String>,
        ) -> Self {
            Self { page, query }
        }
    }

    /// Page of the doctors directory.
    #[graphql_object(name = "DoctorsPage", context = Context)]
    impl Page {
        /// Doctors of this `DoctorsPage`.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.doctors",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn doctors(&self) -> Vec<Entry> {
            self.page.items.iter().cloned().map(Entry).collect()
        }

        /// Number of this `DoctorsPage`, starting from 1.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.currentPage",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn current_page(&self) -> Result<i32, Error> {
            i32::try_from(self.page.current_page)
                .map_err(|e| Error::internal(&e))
        }

        /// Total number of pages in the directory listing.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.totalPages",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn total_pages(&self) -> Result<i32, Error> {
            i32::try_from(self.page.total_pages)
                .map_err(|e| Error::internal(&e))
        }

        /// Total number of doctors matching the search query.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.totalCount",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn total_count(&self) -> Result<i32, Error> {
            i32::try_from(self.page.total_count)
                .map_err(|e| Error::internal(&e))
        }

        /// Number of doctors per page.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.perPage",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn per_page(&self) -> Result<i32, Error> {
            i32::try_from(self.page.per_page).map_err(|e| Error::internal(&e))
        }

        /// Sequence of page buttons to render for this `DoctorsPage`.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.pageButtons",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn page_buttons(&self) -> Result<Vec<PageButton>, Error> {
            self.page
                .buttons()
                .into_iter()
                .map(|b| {
                    Ok(PageButton {
                        page: match b {
                            pagination::Button::Number(n) => Some(
                                i32::try_from(n)
                                    .map_err(|e| Error::internal(&e))?,
                            ),
                            pagination::Button::Ellipsis => None,
                        },
                        label: b.to_string(),
                    })
                })
                .collect()
        }

        /// Number of the previous page, floor-clamped at 1.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.prevPage",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn prev_page(&self) -> Result<i32, Error> {
            i32::try_from(self.page.prev_page())
                .map_err(|e| Error::internal(&e))
        }

        /// Number of the next page, ceiling-clamped at the last one.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.nextPage",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn next_page(&self) -> Result<i32, Error> {
            i32::try_from(self.page.next_page())
                .map_err(|e| Error::internal(&e))
        }

        /// Indicator whether this `DoctorsPage` is the first one.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.isFirst",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn is_first(&self) -> bool {
            self.page.is_first()
        }

        /// Indicator whether this `DoctorsPage` is the last one.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.isLast",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn is_last(&self) -> bool {
            self.page.is_last()
        }

        /// Message to display when the search yields no doctors.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.emptyMessage",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn empty_message(&self) -> Option<String> {
            self.page.items.is_empty().then(|| {
                directory::no_results_message(self.query.as_deref())
            })
        }

        /// Path of the doctors search screen carrying over the search query.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPage.searchPath",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn search_path(&self) -> String {
            directory::Target::Search {
                query: self.query.clone().unwrap_or_default(),
            }
            .path()
        }
    }

    /// Single doctor row of a directory page.
    #[derive(Clone, Debug)]
    pub struct Entry(read::doctor::directory::Enriched);

    /// Single doctor row of a directory page.
    #[graphql_object(name = "DoctorsPageEntry", context = Context)]
    impl Entry {
        /// Unique identifier of the doctor.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPageEntry.id",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn id(&self) -> Id {
            self.0.record.id.into()
        }

        /// Displayed name of the doctor.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPageEntry.name",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn name(&self) -> api::user::Name {
            self.0.record.name.clone().into()
        }

        /// Medical specialization of the doctor.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPageEntry.specialization",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn specialization(&self) -> Specialization {
            self.0.record.specialization.into()
        }

        /// Location where the doctor receives patients.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPageEntry.workLocation",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn work_location(&self) -> super::Location {
            self.0.record.work_location.clone().into()
        }

        /// URL of the doctor's profile image, if any.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPageEntry.imageUrl",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn image_url(&self) -> Option<api::user::ImageUrl> {
            self.0.image_url.clone().map(Into::into)
        }

        /// `Doctor` behind this entry.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPageEntry.doctor",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn doctor(&self) -> api::Doctor {
            #[expect(
                unsafe_code,
                reason = "entry loaded from repository guarantees `Doctor` \
                          existence"
            )]
            unsafe {
                api::Doctor::new_unchecked(self.0.record.id)
            }
        }

        /// Path of the appointment request screen for this doctor.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "DoctorsPageEntry.appointmentPath",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn appointment_path(&self) -> String {
            directory::Target::RequestAppointment {
                doctor_id: self.0.record.id,
            }
            .path()
        }
    }

    /// Single button of a `DoctorsPage` pagination control.
    #[derive(Clone, Debug, GraphQLObject)]
    #[graphql(name = "DoctorsPageButton", context = Context)]
    pub struct PageButton {
        /// Page the button navigates to, or `null` for an ellipsis marker.
        pub page: Option<i32>,

        /// Displayed label of the button.
        pub label: String,
    }
}
