//! `spjt-documentos`: documents attached to case files and their signatures.

pub mod documento;
pub mod firma;

pub use documento::{
    Archivo, DEFAULT_MIME_TYPE, Documento, DocumentoFilter, MAX_UPLOAD_BYTES, UploadMetadata,
};
pub use firma::{FirmaRecord, FirmaRequest, TipoFirma, VerificacionFirma};
