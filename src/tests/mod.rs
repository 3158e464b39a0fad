//! End-to-end test suite for the daily analysis pipeline.
