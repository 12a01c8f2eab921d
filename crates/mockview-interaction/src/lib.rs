//! Language-model backends for Mockview.

pub mod ollama_gateway;

pub use ollama_gateway::OllamaGateway;
