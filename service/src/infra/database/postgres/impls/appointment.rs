//! [`AppointmentRequest`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{appointment, doctor, AppointmentRequest},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Insert<AppointmentRequest>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Update<AppointmentRequest>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(request): Insert<AppointmentRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(request))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<AppointmentRequest>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(request): Update<AppointmentRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        let AppointmentRequest {
            id,
            doctor_id,
            requested_on,
            notes,
            patient_name,
            patient_email,
            patient_phone,
            confirmed,
            created_at,
        } = request;

        const SQL: &str = "\
            INSERT INTO appointment_requests (\
                id, doctor_id, requested_on, notes, \
                patient_name, patient_email, patient_phone, \
                confirmed, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::TIMESTAMPTZ, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, \
                $8::BOOL, $9::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET doctor_id = EXCLUDED.doctor_id, \
                requested_on = EXCLUDED.requested_on, \
                notes = EXCLUDED.notes, \
                patient_name = EXCLUDED.patient_name, \
                patient_email = EXCLUDED.patient_email, \
                patient_phone = EXCLUDED.patient_phone, \
                confirmed = EXCLUDED.confirmed, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &doctor_id,
                &requested_on,
                &notes,
                &patient_name,
                &patient_email,
                &patient_phone,
                &confirmed,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<AppointmentRequest>, doctor::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<AppointmentRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<AppointmentRequest>, doctor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let doctor_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, doctor_id, requested_on, notes, \
                   patient_name, patient_email, patient_phone, \
                   confirmed, created_at \
            FROM appointment_requests \
            WHERE doctor_id = $1::UUID \
            ORDER BY requested_on, id";
        Ok(self
            .query(SQL, &[&doctor_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| AppointmentRequest {
                id: row.get("id"),
                doctor_id: row.get("doctor_id"),
                requested_on: row.get("requested_on"),
                notes: row.get("notes"),
                patient_name: row.get("patient_name"),
                patient_email: row.get("patient_email"),
                patient_phone: row.get("patient_phone"),
                confirmed: row.get("confirmed"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}

impl<C>
    Database<Delete<By<AppointmentRequest, appointment::RequestDateTime>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<
            By<AppointmentRequest, appointment::RequestDateTime>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let deadline: appointment::RequestDateTime = by.into_inner();

        const SQL: &str = "\
            DELETE FROM appointment_requests \
            WHERE requested_on < $1::TIMESTAMPTZ";
        self.exec(SQL, &[&deadline])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
