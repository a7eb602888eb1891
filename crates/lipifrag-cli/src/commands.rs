pub mod batch;
pub mod fragment;
