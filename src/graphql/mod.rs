pub mod handler;
pub mod schema_impl;

pub use handler::{graphiql, graphql};
pub use schema_impl::{create_schema, MutationRoot, QueryRoot, Schema};
