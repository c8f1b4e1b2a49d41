pub mod quiz_result;
