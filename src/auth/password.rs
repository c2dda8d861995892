use bcrypt::DEFAULT_COST;
use tracing::{error, warn};

/// bcrypt only looks at the first 72 bytes of the input.
const BCRYPT_MAX_BYTES: usize = 72;

fn truncated(plain: &str) -> &[u8] {
    let bytes = plain.as_bytes();
    &bytes[..bytes.len().min(BCRYPT_MAX_BYTES)]
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    bcrypt::hash(truncated(plain), DEFAULT_COST).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        anyhow::anyhow!(e)
    })
}

/// Never errors: a malformed stored hash rejects the password.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match bcrypt::verify(truncated(plain), hash) {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "bcrypt verify error, rejecting password");
            false
        }
    }
}
