//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `alexandria <date> (<commit>)`
pub fn version_line() -> String {
    format!("alexandria {} ({})", BUILD_DATE, BUILD_COMMIT)
}
