#![cfg(test)]

pub mod distribution_tests;
