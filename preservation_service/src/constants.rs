pub const SERVICE_NAME: &str = "preservation";
