//! Filter module - trend/cycle decomposition

mod hp;

pub use hp::{
    Decomposition, FilterError, HpFilter, LAMBDA_ANNUAL, LAMBDA_MONTHLY, LAMBDA_QUARTERLY,
};
