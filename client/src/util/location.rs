//! Browser location helpers.
//!
//! SSR has no window; every helper answers `None` there.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

/// `window.location.origin`, e.g. `https://app.example.com`.
pub fn origin() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()?.location().origin().ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// `window.location.hash` including the leading `#`; `None` when the URL
/// has no fragment.
pub fn hash() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()?.location().hash().ok().and_then(present_fragment)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// The browser reports a missing fragment as `""` (or a bare `#`).
#[cfg(any(test, feature = "hydrate"))]
fn present_fragment(raw: String) -> Option<String> {
    (!raw.trim_start_matches('#').is_empty()).then_some(raw)
}
