use super::*;

mod execute;
mod metadata;
mod query;
mod receiver;

pub use self::{execute::*, metadata::*, query::*, receiver::*};
