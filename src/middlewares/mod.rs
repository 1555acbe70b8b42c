pub mod optional_jwt;

pub use optional_jwt::{Caller, OptionalJWT};
