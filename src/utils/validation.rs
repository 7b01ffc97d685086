use crate::error::Result;
use validator::Validate;

/// Reject malformed payloads before they reach the network. Unparseable or
/// out-of-range fields are an input-sanitization error, not a slot rejection.
pub fn validate_payload<T: Validate>(val: &T) -> Result<()> {
    val.validate()?;
    Ok(())
}
