mod content_type_tests;
mod integration_tests;
