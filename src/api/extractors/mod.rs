pub mod authorized;
pub mod drink_id;
pub mod json_body;
