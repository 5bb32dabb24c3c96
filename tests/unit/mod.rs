mod ingestion_tests;
mod property_tests;
mod replay_tests;
mod scenario_tests;
