mod cost_service_tests;
mod schedule_service_tests;
