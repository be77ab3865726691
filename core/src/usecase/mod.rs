pub mod monthly_report;
mod monthly_report_test;
