pub mod health;
pub mod root;
pub mod transcribe;

pub use health::{health_handler, HealthResponse};
pub use root::{root_handler, ServiceDescriptor, SUPPORTED_FORMATS};
pub use transcribe::{transcribe_handler, TranscribeResponse, FILE_FIELD};
