//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation. Tokens are issued by the identity
//!   service that shares `JWT_SECRET` with this server.

pub mod jwt;
