//! Ready made requesters built on top of the builder

pub mod graphql;
