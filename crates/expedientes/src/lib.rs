//! `spjt-expedientes`: case files (expedientes) and their filings (actuaciones).

pub mod actuacion;
pub mod expediente;

pub use actuacion::{Actuacion, NuevaActuacion};
pub use expediente::{
    EstadoExpediente, EstadoFilter, Expediente, ExpedienteFilter, ExpedienteUpdate,
    NuevoExpediente,
};
