pub mod progress_ui;
pub mod run;
