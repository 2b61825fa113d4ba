//! [`Appointment`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// A requested appointment with a `Doctor`.
#[derive(Clone, Debug, From)]
pub struct Appointment(domain::AppointmentRequest);

/// A requested appointment with a `Doctor`.
#[graphql_object(context = Context)]
impl Appointment {
    /// Unique identifier of this `Appointment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Doctor` the appointment is requested with.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.doctor",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn doctor(&self) -> api::Doctor {
        #[expect(
            unsafe_code,
            reason = "`Appointment` loaded from repository guarantees \
                      `Doctor` existence"
        )]
        unsafe {
            api::Doctor::new_unchecked(self.0.doctor_id)
        }
    }

    /// `DateTime` the appointment is requested on.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.requestedOn",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn requested_on(&self) -> DateTime {
        self.0.requested_on.coerce()
    }

    /// Free-form notes for the `Doctor`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.notes",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn notes(&self) -> Option<Notes> {
        self.0.notes.clone().map(Into::into)
    }

    /// Name of the requesting patient.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.patientName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn patient_name(&self) -> api::user::Name {
        self.0.patient_name.clone().into()
    }

    /// Email of the requesting patient.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.patientEmail",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn patient_email(&self) -> api::user::Email {
        self.0.patient_email.clone().into()
    }

    /// Phone of the requesting patient.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.patientPhone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn patient_phone(&self) -> api::user::Phone {
        self.0.patient_phone.clone().into()
    }

    /// Indicator whether the patient confirmed the request details.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.confirmed",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn confirmed(&self) -> bool {
        self.0.confirmed
    }

    /// `DateTime` when this `Appointment` was requested.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Appointment.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Appointment`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::appointment::Id)]
#[into(domain::appointment::Id)]
#[graphql(name = "AppointmentId", transparent)]
pub struct Id(Uuid);

/// Free-form notes of an `Appointment`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AppointmentNotes",
    with = scalar::Via::<domain::appointment::Notes>,
)]
pub struct Notes(domain::appointment::Notes);
