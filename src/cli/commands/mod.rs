pub mod check;
pub mod greeting;
