pub mod fatsecret;

pub use fatsecret::FatSecretClient;
