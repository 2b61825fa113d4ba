//! [`CleanExpiredAppointments`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Delete, Perform, Start};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{appointment, AppointmentRequest},
    infra::{database, Database},
    Service,
};

use super::Task;

/// Configuration for [`CleanExpiredAppointments`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between [`AppointmentRequest`]s cleaning.
    pub interval: time::Duration,

    /// Time after the requested date once an unhandled
    /// [`AppointmentRequest`] is considered expired.
    pub timeout: time::Duration,
}

/// [`Task`] for cleaning expired [`AppointmentRequest`]s.
#[derive(Clone, Copy, Debug)]
pub struct CleanExpiredAppointments<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<CleanExpiredAppointments<Self>, Config>>>
    for Service<Db>
where
    CleanExpiredAppointments<Service<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<CleanExpiredAppointments<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = CleanExpiredAppointments {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::CleanExpiredAppointments` failed: {e}");
            });
        }
    }
}

impl<Db> Task<Perform<()>> for CleanExpiredAppointments<Service<Db>>
where
    Db: Database<
        Delete<By<AppointmentRequest, appointment::RequestDateTime>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let deadline =
            appointment::RequestDateTime::now() - self.config.timeout;
        self.service
            .database()
            .execute(Delete(By::new(deadline)))
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

/// Error of [`CleanExpiredAppointments`] execution.
pub type ExecutionError = Traced<database::Error>;
