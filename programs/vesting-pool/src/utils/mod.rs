pub mod accounts;
pub mod admission;
pub mod release;
