//! Read entities definitions.

pub mod doctor;
