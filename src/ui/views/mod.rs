pub mod charts_view;
pub mod requirements_view;
pub mod upload_view;
