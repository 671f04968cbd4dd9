pub mod engine;
pub mod equal_payment;
pub mod equal_principal;
pub mod terms;
