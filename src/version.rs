// Copyright (c) 2024 Mike Tsao

//! Build identification.

/// The version string to show end users: a version-control description when
/// the build script provided one, otherwise the crate version.
pub fn app_version() -> &'static str {
    match (option_env!("GIT_DESCRIBE"), option_env!("GIT_REV_PARSE")) {
        (Some(describe), _) => describe,
        (None, Some(rev)) => rev,
        (None, None) => env!("CARGO_PKG_VERSION"),
    }
}
