use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr log subscriber.
///
/// Info by default, so every copy and every scan skip is logged; `-v` adds
/// settled pairs and timestamp comparisons. `RUST_LOG` wins when set.
pub fn init_tracing(verbose: u8) {
    let default = default_level(verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_unless_verbose() {
        assert_eq!(default_level(0), "info");
        assert_eq!(default_level(1), "debug");
        assert_eq!(default_level(3), "debug");
    }
}
