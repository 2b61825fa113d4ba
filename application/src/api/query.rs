//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "user",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Doctor` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DOCTOR_NOT_EXISTS` - the `Doctor` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "doctor",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn doctor(
        id: api::doctor::Id,
        ctx: &Context,
    ) -> Result<api::Doctor, Error> {
        ctx.service()
            .execute(query::doctor::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| DoctorError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of the doctors directory, narrowed by the search
    /// query.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION` - the pagination arguments are not positive
    ///                          numbers.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "doctors",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            per_page = ?per_page,
            query = ?query,
        ),
    )]
    pub async fn doctors(
        query: Option<String>,
        page: Option<i32>,
        per_page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::doctor::directory::Page, Error> {
        ctx.service()
            .execute(query::directory::Search {
                query: query.clone(),
                page,
                per_page,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::doctor::directory::Page::new(page, query))
    }

    /// Returns the appointments requested with the currently authenticated
    /// `Doctor`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_A_DOCTOR` - the current `User` owns no `Doctor` directory
    ///                    entry.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myAppointments",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_appointments(
        ctx: &Context,
    ) -> Result<Vec<api::Appointment>, Error> {
        let my_id = ctx.current_session().await?.user_id;

        let doctor = ctx
            .service()
            .execute(query::doctor::ByUserId::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::PrivilegeError::Doctor.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::appointments::ByDoctorId::by(doctor.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|requests| requests.into_iter().map(Into::into).collect())
    }
}

impl AsError for query::directory::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::InvalidPagination { .. } => {
                Some(api::PaginationError::Invalid.into())
            }
        }
    }
}

define_error! {
    enum DoctorError {
        #[code = "DOCTOR_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Doctor` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}
