#![no_std]

pub mod checked_math;
pub mod errors;
pub mod owners;
