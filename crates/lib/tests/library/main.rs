mod common;
mod launchpad_tests;
mod lifecycle_tests;
