use doctorfinder_domain::DoctorFinderError;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log line format (`json` or text).
pub const LOG_FORMAT_VAR: &str = "DOCTORFINDER_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides `default_directive`. Calling this twice is an error.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;
    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|value| value.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().try_init().map_err(|err| anyhow::anyhow!(err))?;
    } else {
        builder.try_init().map_err(|err| anyhow::anyhow!(err))?;
    }
    Ok(())
}

/// Log a failed Record API action with structured fields.
///
/// `action` should be a stable identifier; request payloads never reach the
/// log.
#[inline]
pub fn log_action_failure(action: &str, error: &DoctorFinderError) {
    error!(action, error_type = error.label(), error = %error, "request_failed");
}
