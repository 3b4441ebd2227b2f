pub mod outcome_tests;
