pub mod resolver_tests;
