// Composition root.
//
// Responsibilities
// - Read configuration from flags and environment.
// - Instantiate concrete adapters and wire them into use case handlers.
// - Expose the REST routes and the GraphQL schema.

pub mod api_error;
pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
