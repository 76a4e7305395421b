pub mod records_testkit;
