//! Resource handlers.
//!
//! Every family follows the same shape: bind the body through `ValidatedBody`,
//! take the owner from `AuthUser` (never from the body), make one repository
//! call, and map the result to a status code. Ownership of `/{resource}/{id}`
//! routes is already enforced by the Authorization middleware before these run.

pub mod comments;
pub mod photos;
pub mod social_media;
pub mod users;
