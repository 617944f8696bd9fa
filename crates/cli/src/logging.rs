use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log line format (`json` or text).
pub const LOG_FORMAT_VAR: &str = "DOCTORFINDER_LOG_FORMAT";

/// Install the global tracing subscriber, writing to stderr so command
/// output on stdout stays clean.
///
/// `RUST_LOG` overrides `default_directive`.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;
    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|value| value.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().try_init().map_err(|err| anyhow::anyhow!(err))?;
    } else {
        builder.try_init().map_err(|err| anyhow::anyhow!(err))?;
    }
    Ok(())
}
