/// Log version info using the appropriate logging mechanism for the platform.
/// On Android, we use the `log` crate (which android_logger handles).
/// On other platforms, we use `tracing` (which our tracing_subscriber handles).
pub fn log_version_info() {
    #[cfg(target_os = "android")]
    {
        log::info!("{}", short_version_info());
    }
    #[cfg(not(target_os = "android"))]
    {
        tracing::info!("{}", short_version_info());
    }
}

pub fn short_version_info() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_names_the_package() {
        assert!(short_version_info().starts_with("progress-dialog"));
    }
}
