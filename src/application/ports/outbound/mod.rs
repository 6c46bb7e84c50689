//! Outbound ports - interfaces the application requires from external systems

mod generation_port;

pub use generation_port::{
    ImageGenerationPort, ImagePayload, ImageStoreError, ImageStorePort, ProviderError,
    ProviderRegistry, TextGenerationPort,
};
