pub mod collaborators;
pub mod recorder;

pub use collaborators::{CartService, ServiceError, ThemeService, VatService};
pub use recorder::{EventRecorder, MemoryRecorder, TrackEvent, TracingRecorder};
