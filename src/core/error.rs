use thiserror::Error;

/// Errors that can occur during shortcut registration.
///
/// Dispatch-side problems (unrecognised events, handler faults, removals of
/// things that no longer exist) are deliberately not errors: they are either
/// silently ignored or routed to the diagnostic sink.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum RegistryError {
    /// Registration was attempted with an empty key specification.
    #[error("no key combination supplied for registration")]
    NoKeys,
}
