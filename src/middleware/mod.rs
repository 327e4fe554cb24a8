/*
 * Responsibility
 * - Public interface of the middleware layer (re-exports)
 * - http: cross-cutting transport layers; auth: authentication gate + authorization
 */
pub mod auth;
pub mod bearer_auth;
pub mod http;
