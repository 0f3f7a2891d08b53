//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Assessor` - Uniform capability interface one risk dimension implements
//! - `MemoryGateway` - Prior-interaction retrieval and experience storage
//! - `TextGeneration` - External text/LLM generation service

mod assessor;
mod memory_gateway;
mod text_generation;

pub use assessor::{Assessor, AssessorError};
pub use memory_gateway::{MemoryError, MemoryGateway};
pub use text_generation::{
    GenerationConfig, GenerationRequest, GeneratorInfo, SystemPrompts, TaskKind, TextGeneration,
    TextGenerationError,
};
