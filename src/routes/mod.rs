/// Router Module Index
///
/// Routes are split by access level so the gates are applied once, at the module
/// boundary, rather than per handler.

/// Routes open to anonymous clients: health, registration, login.
pub mod public;

/// Resource routes behind the Authentication gate, with the per-resource
/// Authorization gate on every `/{resource}/{id}` route.
pub mod authenticated;
