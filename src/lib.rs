use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Log filter error: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Tracing init error: {0}")]
    TracingInit(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Telemetry setup error: {0}")]
    Telemetry(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn metric_label(&self) -> String {
        format!("{self:?}").to_lowercase()
    }
}

/// VmGroup resource types
pub mod api;

/// Deep copy contract
pub mod deepcopy;
pub use deepcopy::DeepCopy;

/// Polymorphic resource object capability
pub mod object;
pub use object::Object;

/// Log and trace integrations
pub mod telemetry;
