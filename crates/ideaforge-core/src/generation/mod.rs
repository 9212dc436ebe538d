pub mod backend;
pub mod gemini;
pub mod prompts;

use crate::contract::{decode, Contract};
use crate::errors::CoreError;
use std::time::Instant;

use backend::{GenerationConfig, ModelGateway};

/// Outcome of a successful round trip.
#[derive(Debug)]
pub struct RoundTrip<C> {
    pub record: C,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub elapsed_ms: u64,
}

/// One prompt → gateway → contract round trip. Both the idea and the
/// evaluation flows go through here.
pub fn round_trip<C: Contract>(
    gateway: &dyn ModelGateway,
    credential: &str,
    prompt: &str,
    config: &GenerationConfig,
) -> Result<RoundTrip<C>, CoreError> {
    let start = Instant::now();
    tracing::info!(
        schema = C::SCHEMA,
        prompt_chars = prompt.len(),
        temperature = config.temperature,
        "sending prompt"
    );

    let response = gateway.generate(credential, prompt, config).inspect_err(|e| {
        tracing::warn!(schema = C::SCHEMA, error = %e, "gateway call failed");
    })?;
    tracing::debug!(schema = C::SCHEMA, raw = %response.text, "raw model output");

    let record = decode::<C>(&response.text).inspect_err(|e| {
        tracing::warn!(
            schema = C::SCHEMA,
            error = %e,
            result_chars = response.text.len(),
            output_tokens = response.output_tokens,
            "model output violated contract"
        );
    })?;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        schema = C::SCHEMA,
        elapsed_ms,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "round trip complete"
    );

    Ok(RoundTrip {
        record,
        input_tokens: response.input_tokens,
        output_tokens: response.output_tokens,
        elapsed_ms,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedGateway;
    use super::*;
    use crate::errors::{ContractError, ErrorKind, GatewayError};
    use crate::models::IdeaDraft;

    const IDEA: &str = r#"```json
{"title": "T", "description": "D", "category": "C", "targetMarket": "M", "problem": "P", "solution": "S"}
```"#;

    fn config() -> GenerationConfig {
        GenerationConfig {
            temperature: 0.9,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }

    #[test]
    fn test_round_trip_decodes_record() {
        let gateway = ScriptedGateway::new(vec![Ok(IDEA.to_string())]);
        let result = round_trip::<IdeaDraft>(&gateway, "key", "prompt text", &config()).unwrap();
        assert_eq!(result.record.title, "T");
        assert!(result.output_tokens > 0);
        assert_eq!(gateway.prompts.lock().unwrap().as_slice(), ["prompt text"]);
    }

    #[test]
    fn test_round_trip_propagates_gateway_error() {
        let gateway = ScriptedGateway::new(vec![Err(GatewayError::Quota("slow down".into()))]);
        let err = round_trip::<IdeaDraft>(&gateway, "key", "p", &config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QuotaExceeded);
    }

    #[test]
    fn test_round_trip_propagates_contract_error() {
        let gateway = ScriptedGateway::new(vec![Ok(r#"{"title": "only"}"#.to_string())]);
        let err = round_trip::<IdeaDraft>(&gateway, "key", "p", &config()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Contract(ContractError::MissingField(ref f)) if f == "description"
        ));
    }
}
