use model::keygen::DEFAULT_KEY_BITS;
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const MIN_RSA_KEY_BITS: u32 = 2048;
pub const MAX_RSA_KEY_BITS: u32 = 8192;

/// Request body for POST /keygen. Both fields are optional; the bit size
/// bound only applies to RSA since Ed25519 ignores it.
#[derive(Deserialize, Debug, Validate)]
#[validate(schema(function = "validate_rsa_key_bits"))]
pub struct KeygenRequestBody {
    #[serde(default = "default_key_type")]
    pub key_type: String,
    #[serde(default = "default_key_bits")]
    pub key_bits: u32,
}

fn default_key_type() -> String {
    "rsa".to_owned()
}

fn default_key_bits() -> u32 {
    DEFAULT_KEY_BITS
}

fn validate_rsa_key_bits(body: &KeygenRequestBody) -> Result<(), ValidationError> {
    if body.key_type.eq_ignore_ascii_case("rsa")
        && !(MIN_RSA_KEY_BITS..=MAX_RSA_KEY_BITS).contains(&body.key_bits)
    {
        return Err(ValidationError::new("key_bits_out_of_range"));
    }
    Ok(())
}
