pub mod convert;
pub mod jsonfix;
