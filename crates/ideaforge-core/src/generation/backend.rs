use crate::errors::GatewayError;
use serde::{Deserialize, Serialize};

/// Sampling parameters for one gateway call.
///
/// Partial tables are allowed; missing fields take the serde defaults, not
/// the per-round-trip defaults from config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.9
}
fn default_top_k() -> u32 {
    40
}
fn default_top_p() -> f32 {
    0.95
}
fn default_max_output_tokens() -> u32 {
    1024
}

/// Response from a model gateway call.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    /// The model's response text, unparsed.
    pub text: String,
    /// Input tokens consumed.
    pub input_tokens: u64,
    /// Output tokens produced.
    pub output_tokens: u64,
}

/// Trait for text-generation gateways. Sync only — no async.
pub trait ModelGateway {
    /// Send a prompt and return the raw response text.
    fn generate(
        &self,
        credential: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GatewayResponse, GatewayError>;
}

impl<T: ModelGateway + ?Sized> ModelGateway for std::sync::Arc<T> {
    fn generate(
        &self,
        credential: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GatewayResponse, GatewayError> {
        (**self).generate(credential, prompt, config)
    }
}
