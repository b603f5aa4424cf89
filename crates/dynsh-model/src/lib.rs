//! DynamoDB wire types for dynsh.
//!
//! Only the request side of the API is modelled: the shell translates user
//! input into these inputs and serializes them with the JSON protocol
//! (`awsJson1_0`).
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute_value;
pub mod input;
pub mod operations;
pub mod types;

pub use attribute_value::AttributeValue;
pub use operations::DynamoDBOperation;
pub use types::{ParseEnumError, ReturnConsumedCapacity, ReturnValue, Select};
