//! Recording in-memory collaborators for the screen and controller tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use spjt_auth::{
    CapabilityTable, EstadoUsuario, NuevoUsuario, Role, User, UsuarioFilter, UsuarioUpdate,
};
use spjt_client::{
    AuthService, ClientError, ClientResult, Credentials, DocumentosService, ExpedientesService,
    LoginResponse, UsuarioPage, UsuariosService,
};
use spjt_core::{DocumentoId, ExpedienteId, UsuarioId};
use spjt_documentos::{
    Archivo, Documento, DocumentoFilter, FirmaRecord, FirmaRequest, UploadMetadata,
    VerificacionFirma,
};
use spjt_expedientes::{
    Actuacion, EstadoExpediente, Expediente, ExpedienteFilter, ExpedienteUpdate, NuevaActuacion,
    NuevoExpediente,
};

use crate::context::AppContext;

pub const PASSWORD: &str = "secreto";

pub fn user(rol: Role) -> User {
    User {
        id: UsuarioId::new(format!("u-{}", rol.as_str())).unwrap(),
        nombre: format!("Usuario {}", rol.display_name()),
        email: format!("{}@spjt.com", rol.as_str()),
        rol,
        institucion: "Juzgado Civil N° 1".into(),
        estado: EstadoUsuario::Activo,
        ultimo_acceso: None,
    }
}

pub fn expediente(id: &str, nro: &str, estado: EstadoExpediente) -> Expediente {
    Expediente {
        id: ExpedienteId::new(id).unwrap(),
        nro: nro.into(),
        caratula: format!("Pérez c/ García s/ {nro}"),
        fuero: "Civil".into(),
        estado,
        institucion_id: None,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        updated_at: None,
    }
}

pub fn documento(id: &str, expediente_id: &str, firmado: bool) -> Documento {
    Documento {
        id: DocumentoId::new(id).unwrap(),
        nombre: format!("Documento {id}"),
        descripcion: String::new(),
        tipo: "escrito".into(),
        expediente_id: ExpedienteId::new(expediente_id).unwrap(),
        firmado,
        size_bytes: Some(1024),
        created_at: Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap(),
    }
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
    fail_with: Mutex<Option<ClientError>>,
}

impl Recorder {
    fn record(&self, call: impl Into<String>) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call.into());
        match self.fail_with.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn fail_with(&self, error: ClientError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct FakeAuth {
    calls: Mutex<Vec<String>>,
    token: Mutex<bool>,
    identity: Mutex<Option<ClientResult<User>>>,
    login_role: Mutex<Role>,
    refresh_error: Mutex<Option<ClientError>>,
}

impl Default for FakeAuth {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            token: Mutex::new(false),
            identity: Mutex::new(None),
            login_role: Mutex::new(Role::Juez),
            refresh_error: Mutex::new(None),
        }
    }
}

impl FakeAuth {
    pub fn with_token(identity: ClientResult<User>) -> Self {
        let fake = Self::default();
        *fake.token.lock().unwrap() = true;
        *fake.identity.lock().unwrap() = Some(identity);
        fake
    }

    pub fn logging_in_as(role: Role) -> Self {
        let fake = Self::default();
        *fake.login_role.lock().unwrap() = role;
        fake
    }

    pub fn fail_refresh_with(&self, error: ClientError) {
        *self.refresh_error.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn logged_in(&self) -> LoginResponse {
        *self.token.lock().unwrap() = true;
        LoginResponse {
            token: "tok-1".into(),
            user: user(self.login_role.lock().unwrap().clone()),
        }
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        self.calls.lock().unwrap().push("login".into());
        if credentials.password != PASSWORD {
            return Err(ClientError::Unauthorized);
        }
        Ok(self.logged_in())
    }

    async fn current_user(&self) -> ClientResult<User> {
        self.calls.lock().unwrap().push("current_user".into());
        self.identity
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Err(ClientError::Unauthorized))
    }

    async fn refresh(&self) -> ClientResult<LoginResponse> {
        self.calls.lock().unwrap().push("refresh".into());
        if let Some(e) = self.refresh_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.logged_in())
    }

    async fn logout(&self) -> ClientResult<()> {
        self.calls.lock().unwrap().push("logout".into());
        *self.token.lock().unwrap() = false;
        Ok(())
    }

    async fn recover_password(&self, email: &str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(format!("recover_password {email}"));
        Ok(())
    }

    async fn register(&self, usuario: &NuevoUsuario) -> ClientResult<User> {
        self.calls.lock().unwrap().push(format!("register {}", usuario.email));
        let mut created = user(usuario.rol.clone());
        created.nombre = usuario.nombre.clone();
        created.email = usuario.email.clone();
        Ok(created)
    }

    fn has_token(&self) -> bool {
        *self.token.lock().unwrap()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Expedientes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeExpedientes {
    recorder: Recorder,
    items: Mutex<Vec<Expediente>>,
}

impl FakeExpedientes {
    pub fn seed(&self, items: Vec<Expediente>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn calls(&self) -> Vec<String> {
        self.recorder.calls()
    }

    pub fn fail_with(&self, error: ClientError) {
        self.recorder.fail_with(error);
    }

    fn find(&self, id: &ExpedienteId) -> ClientResult<Expediente> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                message: "Expediente no encontrado".into(),
            })
    }
}

#[async_trait]
impl ExpedientesService for FakeExpedientes {
    async fn list(&self, filter: &ExpedienteFilter) -> ClientResult<Vec<Expediente>> {
        let query: Vec<String> = filter
            .to_query()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        self.recorder.record(format!("list {}", query.join("&")))?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn get(&self, id: &ExpedienteId) -> ClientResult<Expediente> {
        self.recorder.record(format!("get {id}"))?;
        self.find(id)
    }

    async fn create(&self, nuevo: &NuevoExpediente) -> ClientResult<Expediente> {
        self.recorder.record(format!("create {}", nuevo.nro))?;
        let mut created = expediente("exp-new", &nuevo.nro, EstadoExpediente::Abierto);
        created.caratula = nuevo.caratula.clone();
        created.fuero = nuevo.fuero.clone();
        created.institucion_id = nuevo.institucion_id.clone();
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &ExpedienteId,
        update: &ExpedienteUpdate,
    ) -> ClientResult<Expediente> {
        self.recorder.record(format!("update {id}"))?;
        let mut current = self.find(id)?;
        if let Some(caratula) = &update.caratula {
            current.caratula = caratula.clone();
        }
        if let Some(fuero) = &update.fuero {
            current.fuero = fuero.clone();
        }
        if let Some(estado) = update.estado {
            current.estado = estado;
        }
        Ok(current)
    }

    async fn delete(&self, id: &ExpedienteId) -> ClientResult<()> {
        self.recorder.record(format!("delete {id}"))?;
        self.items.lock().unwrap().retain(|e| &e.id != id);
        Ok(())
    }

    async fn actuaciones(&self, id: &ExpedienteId) -> ClientResult<Vec<Actuacion>> {
        self.recorder.record(format!("actuaciones {id}"))?;
        Ok(Vec::new())
    }

    async fn create_actuacion(
        &self,
        id: &ExpedienteId,
        actuacion: &NuevaActuacion,
    ) -> ClientResult<Actuacion> {
        self.recorder.record(format!("create_actuacion {id} {}", actuacion.tipo))?;
        Ok(Actuacion {
            id: spjt_core::ActuacionId::new("act-1").unwrap(),
            expediente_id: id.clone(),
            tipo: actuacion.tipo.clone(),
            descripcion: actuacion.descripcion.clone(),
            fecha: Utc.with_ymd_and_hms(2024, 3, 3, 10, 0, 0).unwrap(),
            autor: None,
        })
    }

    async fn documentos(&self, id: &ExpedienteId) -> ClientResult<Vec<Documento>> {
        self.recorder.record(format!("documentos {id}"))?;
        Ok(vec![documento("doc-1", id.as_str(), false)])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Documentos
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeDocumentos {
    recorder: Recorder,
    items: Mutex<Vec<Documento>>,
    uploads: Mutex<Vec<(String, UploadMetadata)>>,
    signatures: Mutex<Vec<FirmaRequest>>,
}

impl FakeDocumentos {
    pub fn seed(&self, items: Vec<Documento>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn calls(&self) -> Vec<String> {
        self.recorder.calls()
    }

    pub fn fail_with(&self, error: ClientError) {
        self.recorder.fail_with(error);
    }

    pub fn uploads(&self) -> Vec<(String, UploadMetadata)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn signatures(&self) -> Vec<FirmaRequest> {
        self.signatures.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentosService for FakeDocumentos {
    async fn list(&self, _filter: &DocumentoFilter) -> ClientResult<Vec<Documento>> {
        self.recorder.record("list")?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn get(&self, id: &DocumentoId) -> ClientResult<Documento> {
        self.recorder.record(format!("get {id}"))?;
        Ok(documento(id.as_str(), "exp-1", false))
    }

    async fn upload(
        &self,
        expediente_id: &ExpedienteId,
        archivo: Archivo,
        metadata: &UploadMetadata,
    ) -> ClientResult<Documento> {
        self.recorder.record(format!("upload {expediente_id}"))?;
        self.uploads
            .lock()
            .unwrap()
            .push((archivo.mime_type().to_string(), metadata.clone()));
        let mut created = documento("doc-new", expediente_id.as_str(), false);
        created.nombre = metadata.get("nombre").unwrap_or(&archivo.nombre).to_string();
        Ok(created)
    }

    async fn sign(&self, id: &DocumentoId, request: &FirmaRequest) -> ClientResult<FirmaRecord> {
        self.recorder.record(format!("sign {id}"))?;
        self.signatures.lock().unwrap().push(request.clone());
        Ok(FirmaRecord {
            documento_id: id.clone(),
            tipo_firma: request.tipo_firma,
            firmante_id: UsuarioId::new("u-juez").unwrap(),
            firmante_nombre: "Usuario Juez".into(),
            fecha: Utc.with_ymd_and_hms(2024, 3, 4, 11, 0, 0).unwrap(),
            comentario: request.comentario.clone(),
        })
    }

    async fn verify(&self, id: &DocumentoId) -> ClientResult<VerificacionFirma> {
        self.recorder.record(format!("verify {id}"))?;
        Ok(VerificacionFirma {
            valida: true,
            firmas: Vec::new(),
            mensaje: None,
        })
    }

    async fn download(&self, id: &DocumentoId) -> ClientResult<Vec<u8>> {
        self.recorder.record(format!("download {id}"))?;
        Ok(b"%PDF-1.7".to_vec())
    }

    async fn delete(&self, id: &DocumentoId) -> ClientResult<()> {
        self.recorder.record(format!("delete {id}"))?;
        self.items.lock().unwrap().retain(|d| &d.id != id);
        Ok(())
    }

    async fn signature_history(&self, id: &DocumentoId) -> ClientResult<Vec<FirmaRecord>> {
        self.recorder.record(format!("signature_history {id}"))?;
        Ok(Vec::new())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Usuarios
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeUsuarios {
    recorder: Recorder,
    items: Mutex<Vec<User>>,
}

impl FakeUsuarios {
    pub fn seed(&self, items: Vec<User>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn calls(&self) -> Vec<String> {
        self.recorder.calls()
    }

    pub fn fail_with(&self, error: ClientError) {
        self.recorder.fail_with(error);
    }
}

#[async_trait]
impl UsuariosService for FakeUsuarios {
    async fn list(&self, filter: &UsuarioFilter) -> ClientResult<UsuarioPage> {
        let query: Vec<String> = filter
            .to_query()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        self.recorder.record(format!("list {}", query.join("&")))?;
        let data = self.items.lock().unwrap().clone();
        Ok(UsuarioPage {
            total: data.len() as u64,
            data,
            page: filter.page.unwrap_or(1),
        })
    }

    async fn create(&self, usuario: &NuevoUsuario) -> ClientResult<User> {
        self.recorder.record(format!("create {}", usuario.email))?;
        let mut created = user(usuario.rol.clone());
        created.id = UsuarioId::new("u-new").unwrap();
        created.nombre = usuario.nombre.clone();
        created.email = usuario.email.clone();
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &UsuarioId, update: &UsuarioUpdate) -> ClientResult<User> {
        let suffix = if update.password.is_some() { " password" } else { "" };
        self.recorder.record(format!("update {id}{suffix}"))?;
        let mut items = self.items.lock().unwrap();
        let current = items
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or(ClientError::Api {
                status: 404,
                message: "Usuario no encontrado".into(),
            })?;
        if let Some(nombre) = &update.nombre {
            current.nombre = nombre.clone();
        }
        if let Some(rol) = &update.rol {
            current.rol = rol.clone();
        }
        Ok(current.clone())
    }

    async fn set_estado(&self, id: &UsuarioId, estado: EstadoUsuario) -> ClientResult<User> {
        self.recorder.record(format!("set_estado {id} {}", estado.label()))?;
        let mut items = self.items.lock().unwrap();
        let current = items
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or(ClientError::Api {
                status: 404,
                message: "Usuario no encontrado".into(),
            })?;
        current.estado = estado;
        Ok(current.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────────────

pub struct Harness {
    pub ctx: AppContext,
    pub auth: Arc<FakeAuth>,
    pub expedientes: Arc<FakeExpedientes>,
    pub documentos: Arc<FakeDocumentos>,
    pub usuarios: Arc<FakeUsuarios>,
}

impl Harness {
    /// Session still loading.
    pub fn new(auth: FakeAuth) -> Self {
        let auth = Arc::new(auth);
        let expedientes = Arc::new(FakeExpedientes::default());
        let documentos = Arc::new(FakeDocumentos::default());
        let usuarios = Arc::new(FakeUsuarios::default());
        let ctx = AppContext::new(
            auth.clone(),
            expedientes.clone(),
            documentos.clone(),
            usuarios.clone(),
            Arc::new(CapabilityTable::builtin()),
        );

        Self {
            ctx,
            auth,
            expedientes,
            documentos,
            usuarios,
        }
    }

    pub async fn logged_in(role: Role) -> Self {
        let harness = Self::new(FakeAuth::logging_in_as(role));
        harness
            .ctx
            .auth
            .login(&Credentials {
                email: "someone@spjt.com".into(),
                password: PASSWORD.into(),
            })
            .await
            .unwrap();
        harness
    }

    /// Calls made to the resource collaborators (auth excluded).
    pub fn resource_calls(&self) -> Vec<String> {
        let mut calls = self.expedientes.calls();
        calls.extend(self.documentos.calls());
        calls.extend(self.usuarios.calls());
        calls
    }
}
